use std::fmt;

pub mod blend;
pub mod config;
pub mod proto;
pub mod scroll;
pub mod sequence;
pub mod snapshot;

mod runtime;

pub use blend::build_blend_map;
pub use config::{ConfigError, ConfigStore, ConfigWatcher, JsonFileStore, LedConfig, StoreFields};
pub use proto::{LineTransport, Transport, decode_frame, encode_frame};
pub use runtime::Runtime;
pub use scroll::Scroller;
pub use sequence::MasterSequence;
pub use snapshot::{SharedSnapshot, Snapshot};

pub fn version() -> &'static str {
    "0.1.0"
}

/// One 24-bit RGB color.
///
/// On the wire a color is always 6 uppercase hex characters; parsing
/// accepts either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn from_hex(s: &str) -> anyhow::Result<Self> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            anyhow::bail!("invalid hex color '{}'", s);
        }
        let value = u32::from_str_radix(s, 16)?;
        Ok(Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
