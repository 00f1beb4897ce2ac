use crate::Color;
use crate::blend::build_blend_map;

/// The fully expanded, circular color sequence the scroller walks.
///
/// Built from a palette by repeating each entry `block_size` times and,
/// when blending is enabled, appending that entry's blend run toward
/// its successor. The sequence is usually longer than the physical
/// strip and is never truncated here; indexing wraps instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterSequence {
    colors: Vec<Color>,
}

impl MasterSequence {
    pub fn build(palette: &[Color], blend_steps: u32, block_size: u32) -> Self {
        let blend_map = build_blend_map(palette, blend_steps);

        let mut colors = Vec::new();
        for (i, &color) in palette.iter().enumerate() {
            for _ in 0..block_size {
                colors.push(color);
            }
            if let Some(run) = blend_map.get(i) {
                colors.extend_from_slice(run);
            }
        }
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Circular read; indexing past the end wraps to the start.
    pub fn get(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    #[test]
    fn blocks_without_blending() {
        let palette = vec![hex("FF0000"), hex("00FF00")];
        let seq = MasterSequence::build(&palette, 0, 2);

        let expected: Vec<Color> = ["FF0000", "FF0000", "00FF00", "00FF00"]
            .iter()
            .map(|s| hex(s))
            .collect();
        assert_eq!(seq.colors(), &expected[..]);
        assert_eq!(seq.len(), palette.len() * 2);
    }

    #[test]
    fn length_with_blending_enabled() {
        let palette = vec![hex("FF0000"), hex("00FF00"), hex("0000FF")];
        let seq = MasterSequence::build(&palette, 4, 2);
        assert_eq!(seq.len(), palette.len() * (2 + 4));
    }

    #[test]
    fn blend_runs_follow_their_block() {
        let palette = vec![hex("000000"), hex("FFFFFF")];
        let seq = MasterSequence::build(&palette, 2, 2);

        // block of entry 0, its run toward entry 1, block of entry 1,
        // its run back toward entry 0
        let expected: Vec<Color> = [
            "000000", "000000", "808080", "FFFFFF", "FFFFFF", "FFFFFF", "7F7F7F", "000000",
        ]
        .iter()
        .map(|s| hex(s))
        .collect();
        assert_eq!(seq.colors(), &expected[..]);
    }

    #[test]
    fn indexing_wraps() {
        let palette = vec![hex("FF0000"), hex("00FF00")];
        let seq = MasterSequence::build(&palette, 0, 2);

        assert_eq!(seq.get(seq.len()), seq.get(0));
        assert_eq!(seq.get(seq.len() + 3), seq.get(3));
    }
}
