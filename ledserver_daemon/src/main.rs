use std::env;
use std::fs::OpenOptions;
use std::io::BufReader;
use std::thread;

use anyhow::Context;
use ledserver_core::{
    ConfigWatcher, JsonFileStore, LedConfig, LineTransport, Runtime, SharedSnapshot,
};

const DEFAULT_SERIAL_PORT: &str = "/dev/ttyACM0";
const DEFAULT_LED_COUNT: usize = 33;
const DEFAULT_CONFIG_FILE: &str = "ledserver.json";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("ledserver {} starting", ledserver_core::version());

    let port_name = env::var("SERIAL_PORT").unwrap_or_else(|_| DEFAULT_SERIAL_PORT.to_string());
    log::info!("using serial port: {port_name}");

    let led_count = env::var("NUM_LEDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_LED_COUNT);
    log::info!("total number of LEDs: {led_count}");

    let store_path = env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    log::info!("using config store: {store_path}");

    let port = OpenOptions::new()
        .read(true)
        .write(true)
        .open(&port_name)
        .with_context(|| format!("open serial port {port_name}"))?;
    let reader = BufReader::new(port.try_clone().context("clone serial handle")?);
    let transport = LineTransport::new(reader, port);

    // Render the bootstrap animation until the store supplies a config.
    let shared = SharedSnapshot::new(LedConfig::bootstrap().to_snapshot());

    let watcher = ConfigWatcher::new(JsonFileStore::new(&store_path), shared.clone());
    thread::spawn(move || watcher.run());

    // Transport failures propagate out of the emit loop and end the
    // process; config failures never reach this point.
    Runtime::new(transport, shared, led_count).run()
}
