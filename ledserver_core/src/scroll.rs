use crate::Color;
use crate::sequence::MasterSequence;

/// The scrolling window: one color per physical LED plus the cursor
/// into the master sequence that supplies the next color.
#[derive(Debug, Clone)]
pub struct Scroller {
    window: Vec<Color>,
    cursor: usize,
}

impl Scroller {
    /// Fill the window by walking the sequence cyclically from index 0.
    /// The cursor starts at 0, so the first advance re-inserts the
    /// sequence head at the front of the window.
    pub fn new(sequence: &MasterSequence, led_count: usize) -> Self {
        let window = (0..led_count).map(|i| sequence.get(i)).collect();
        Self { window, cursor: 0 }
    }

    pub fn window(&self) -> &[Color] {
        &self.window
    }

    /// One scroll step: prepend the next master color, drop the tail so
    /// the window length never changes, advance the cursor with wrap.
    pub fn advance(&mut self, sequence: &MasterSequence) {
        let led_count = self.window.len();
        self.window.insert(0, sequence.get(self.cursor));
        self.window.truncate(led_count);
        self.cursor = (self.cursor + 1) % sequence.len();
    }
}
