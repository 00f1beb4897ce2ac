use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;

use crate::proto::{Transport, encode_frame};
use crate::scroll::Scroller;
use crate::snapshot::SharedSnapshot;

/// Delay between writing a frame and draining the device reply, so the
/// reply has a moment to arrive.
const DRAIN_DELAY: Duration = Duration::from_millis(1);

/// The emit loop: owns the transport and renders the shared snapshot
/// for the lifetime of the process.
pub struct Runtime<T> {
    transport: T,
    shared: SharedSnapshot,
    led_count: usize,
}

impl<T: Transport> Runtime<T> {
    pub fn new(transport: T, shared: SharedSnapshot, led_count: usize) -> Self {
        Self {
            transport,
            shared,
            led_count,
        }
    }

    /// Run forever; only a transport failure returns, as an error.
    pub fn run(mut self) -> anyhow::Result<()> {
        loop {
            self.run_span()?;
        }
    }

    /// Emit frames for the currently published snapshot. Returns once a
    /// new snapshot is observed, so the caller can rebuild the window
    /// from scratch; a swap therefore never lands mid-frame.
    fn run_span(&mut self) -> anyhow::Result<()> {
        let snapshot = self.shared.load();
        let mut scroller = Scroller::new(&snapshot.sequence, self.led_count);

        log::debug!(
            "scroll loop start: {} master colors, {:?} frame interval",
            snapshot.sequence.len(),
            snapshot.interval
        );

        loop {
            scroller.advance(&snapshot.sequence);
            self.transport
                .send_frame(&encode_frame(scroller.window()))
                .context("write frame to transport")?;

            // keep the device's outbound buffer from filling up
            thread::sleep(DRAIN_DELAY);
            self.transport.drain_line().context("drain device reply")?;

            thread::sleep(snapshot.interval);

            let current = self.shared.load();
            if !Arc::ptr_eq(&current, &snapshot) {
                log::debug!("configuration snapshot changed, restarting scroll loop");
                return Ok(());
            }
        }
    }
}
