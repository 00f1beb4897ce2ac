use std::io::{BufRead, Write};

use crate::Color;

/// Frame marker understood by the strip firmware.
pub const FRAME_MARKER: &str = "$0";

/// Serialize a window into one wire frame:
/// `$0|` + 6 uppercase hex characters per LED + newline, ASCII only.
pub fn encode_frame(window: &[Color]) -> Vec<u8> {
    let mut line = String::with_capacity(FRAME_MARKER.len() + 1 + window.len() * 6 + 1);
    line.push_str(FRAME_MARKER);
    line.push('|');
    for color in window {
        line.push_str(&color.to_string());
    }
    line.push('\n');
    line.into_bytes()
}

/// Parse a frame line back into its window colors.
pub fn decode_frame(line: &str) -> anyhow::Result<Vec<Color>> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let Some(body) = line.strip_prefix(FRAME_MARKER).and_then(|s| s.strip_prefix('|')) else {
        anyhow::bail!("frame does not start with '{}|'", FRAME_MARKER);
    };
    if !body.is_ascii() || body.len() % 6 != 0 {
        anyhow::bail!("frame body is not a whole number of hex colors");
    }

    let mut window = Vec::with_capacity(body.len() / 6);
    for i in (0..body.len()).step_by(6) {
        window.push(Color::from_hex(&body[i..i + 6])?);
    }
    Ok(window)
}

/// The duplex channel to the strip: frames go out, one reply line is
/// drained after each frame. No retries; a failure here is fatal to
/// the caller.
pub trait Transport {
    fn send_frame(&mut self, frame: &[u8]) -> anyhow::Result<()>;

    /// Read and discard one reply line.
    fn drain_line(&mut self) -> anyhow::Result<()>;
}

/// Production transport over any line-oriented byte channel, e.g. the
/// two halves of a serial port handle.
#[derive(Debug)]
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Transport for LineTransport<R, W> {
    fn send_frame(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(frame)?;
        self.writer.flush()?;
        Ok(())
    }

    fn drain_line(&mut self) -> anyhow::Result<()> {
        // replies are not guaranteed to be UTF-8, so read raw bytes
        let mut discard = Vec::new();
        self.reader.read_until(b'\n', &mut discard)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn hex(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    #[test]
    fn encodes_the_exact_wire_line() {
        let window = vec![hex("FF0000"), hex("00FF00")];
        assert_eq!(encode_frame(&window), b"$0|FF000000FF00\n");
    }

    #[test]
    fn round_trips_a_window() -> anyhow::Result<()> {
        let window: Vec<Color> = ["FF0000", "FFA500", "FFFF00", "00FF00", "0000FF", "4B0082"]
            .iter()
            .map(|s| hex(s))
            .collect();

        let line = encode_frame(&window);
        let decoded = decode_frame(std::str::from_utf8(&line)?)?;
        assert_eq!(decoded, window);
        Ok(())
    }

    #[test]
    fn decode_rejects_missing_marker() {
        assert!(decode_frame("FF0000\n").is_err());
        assert!(decode_frame("$1|FF0000\n").is_err());
    }

    #[test]
    fn decode_rejects_ragged_body() {
        assert!(decode_frame("$0|FF00\n").is_err());
        assert!(decode_frame("$0|FF0000ZZ0000\n").is_err());
    }

    #[test]
    fn line_transport_writes_and_drains() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let reply = Cursor::new(b"ok\nextra".to_vec());
        let mut transport = LineTransport::new(reply, &mut out);

        transport.send_frame(b"$0|FF0000\n")?;
        transport.drain_line()?;

        assert_eq!(out, b"$0|FF0000\n");
        Ok(())
    }
}
