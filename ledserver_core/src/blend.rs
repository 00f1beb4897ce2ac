use crate::Color;

/// Build the per-palette-entry blend runs.
///
/// Each palette index gets one run of `steps` colors fading toward its
/// cyclic successor (the last entry blends back into the first). A step
/// count of zero, or one that is not even, yields no runs at all.
pub fn build_blend_map(palette: &[Color], steps: u32) -> Vec<Vec<Color>> {
    if steps == 0 || steps % 2 != 0 {
        return Vec::new();
    }

    let mut map = Vec::with_capacity(palette.len());
    for (i, &color) in palette.iter().enumerate() {
        let next = palette[(i + 1) % palette.len()];

        let r = blend_channel(color.r, next.r, steps);
        let g = blend_channel(color.g, next.g, steps);
        let b = blend_channel(color.b, next.b, steps);

        let run = (0..steps as usize)
            .map(|k| Color { r: r[k], g: g[k], b: b[k] })
            .collect();
        map.push(run);
    }
    map
}

/// One channel's values across a blend run.
///
/// The same rounded delta is applied cumulatively each step; once the
/// running value passes `end` in the direction of travel it is pinned
/// to `end` for the remaining steps. Ties round to even, so a delta of
/// 127.5 becomes 128 while -127.5 becomes -128.
fn blend_channel(start: u8, end: u8, steps: u32) -> Vec<u8> {
    let end = i32::from(end);
    let mut value = i32::from(start);

    let delta = (f64::from(end - value) / f64::from(steps)).round_ties_even() as i32;

    let mut out = Vec::with_capacity(steps as usize);
    for _ in 0..steps {
        value += delta;
        if (value > end && delta > 0) || (value < end && delta < 0) {
            value = end;
        }
        out.push(value as u8);
    }
    out
}
