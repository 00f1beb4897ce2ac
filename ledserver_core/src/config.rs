use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::sequence::MasterSequence;
use crate::snapshot::{SharedSnapshot, Snapshot};

/// Fixed cadence of the store poll loop, independent of the frame
/// interval.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Raw, unvalidated field values as supplied by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreFields {
    pub colors: Option<String>,
    pub sleep: Option<String>,
    pub blend: Option<String>,
    pub block: Option<String>,
}

/// The external key/value source the watcher polls.
pub trait ConfigStore {
    fn fetch(&mut self) -> anyhow::Result<StoreFields>;
}

/// Store backed by a flat JSON object on disk, re-read on every poll.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConfigStore for JsonFileStore {
    fn fetch(&mut self) -> anyhow::Result<StoreFields> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read config store {}", self.path.display()))?;
        serde_json::from_str(&text).context("parse config store json")
    }
}

/// Why a poll produced no new configuration. None of these are fatal:
/// the previously applied configuration stays in effect.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config store error: {0}")]
    Store(anyhow::Error),
    #[error("missing config field '{0}'")]
    MissingField(&'static str),
    #[error("invalid color token '{0}'")]
    InvalidColor(String),
    #[error("invalid interval: {0}")]
    InvalidInterval(String),
    #[error("invalid blend steps: {0}")]
    InvalidBlendSteps(String),
    #[error("invalid block size: {0}")]
    InvalidBlockSize(String),
}

/// A validated animation configuration, compared by value to detect
/// changes between polls.
#[derive(Debug, Clone, PartialEq)]
pub struct LedConfig {
    pub palette: Vec<Color>,
    pub interval: Duration,
    pub blend_steps: u32,
    pub block_size: u32,
}

impl LedConfig {
    /// The animation shown until the store delivers a first valid
    /// configuration: a short magenta runner on black.
    pub fn bootstrap() -> Self {
        let mut palette = vec![Color { r: 0xFF, g: 0x00, b: 0xFF }];
        palette.resize(9, Color::BLACK);
        Self {
            palette,
            interval: Duration::from_millis(80),
            blend_steps: 2,
            block_size: 2,
        }
    }

    /// Validate raw store fields, in field order, short-circuiting on
    /// the first failure.
    pub fn parse(fields: &StoreFields) -> Result<Self, ConfigError> {
        let colors = fields
            .colors
            .as_deref()
            .ok_or(ConfigError::MissingField("colors"))?;
        let mut palette = Vec::new();
        for token in colors.split(',') {
            let color = Color::from_hex(token)
                .map_err(|_| ConfigError::InvalidColor(token.to_string()))?;
            palette.push(color);
        }

        let sleep = fields
            .sleep
            .as_deref()
            .ok_or(ConfigError::MissingField("sleep"))?;
        let seconds: f64 = sleep
            .parse()
            .map_err(|_| ConfigError::InvalidInterval(sleep.to_string()))?;
        let interval = Duration::try_from_secs_f64(seconds)
            .map_err(|_| ConfigError::InvalidInterval(sleep.to_string()))?;

        let blend = fields
            .blend
            .as_deref()
            .ok_or(ConfigError::MissingField("blend"))?;
        let blend_steps: i64 = blend
            .parse()
            .map_err(|_| ConfigError::InvalidBlendSteps(blend.to_string()))?;
        if blend_steps < 0 || blend_steps % 2 != 0 {
            return Err(ConfigError::InvalidBlendSteps(blend.to_string()));
        }

        let block = fields
            .block
            .as_deref()
            .ok_or(ConfigError::MissingField("block"))?;
        let block_size: i64 = block
            .parse()
            .map_err(|_| ConfigError::InvalidBlockSize(block.to_string()))?;
        if block_size < 1 {
            return Err(ConfigError::InvalidBlockSize(block.to_string()));
        }

        Ok(Self {
            palette,
            interval,
            blend_steps: blend_steps as u32,
            block_size: block_size as u32,
        })
    }

    pub fn build_sequence(&self) -> MasterSequence {
        MasterSequence::build(&self.palette, self.blend_steps, self.block_size)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            sequence: self.build_sequence(),
            interval: self.interval,
        }
    }
}

/// Polls the store and republishes the animation snapshot whenever a
/// differing valid configuration shows up.
pub struct ConfigWatcher<S> {
    store: S,
    shared: SharedSnapshot,
    running: Option<LedConfig>,
}

impl<S: ConfigStore> ConfigWatcher<S> {
    pub fn new(store: S, shared: SharedSnapshot) -> Self {
        Self {
            store,
            shared,
            running: None,
        }
    }

    /// One poll cycle. `Ok(true)` means a new snapshot was published;
    /// an identical configuration is a no-op and the sequence is not
    /// rebuilt. The first valid poll always publishes.
    pub fn poll_once(&mut self) -> Result<bool, ConfigError> {
        let fields = self.store.fetch().map_err(ConfigError::Store)?;
        let config = LedConfig::parse(&fields)?;

        if self.running.as_ref() == Some(&config) {
            return Ok(false);
        }

        self.shared.store(config.to_snapshot());
        log::info!(
            "applied configuration: {} colors, block {}, blend {}, interval {:?}",
            config.palette.len(),
            config.block_size,
            config.blend_steps,
            config.interval
        );
        self.running = Some(config);
        Ok(true)
    }

    /// Poll forever on the fixed cadence. Failed polls are logged and
    /// leave the previous configuration in effect.
    pub fn run(mut self) {
        loop {
            if let Err(err) = self.poll_once() {
                log::warn!("config poll failed: {err}");
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}
