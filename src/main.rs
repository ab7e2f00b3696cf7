mod app;
mod input;
mod render;

use std::fs;
use std::sync::Mutex;

use anyhow::Result;
use app::App;
use mentionpad::config::{data_dir, Config};
use tracing_subscriber::EnvFilter;

/// Log to a file; the terminal belongs to the UI
fn init_logging(config: &Config) {
    let log_dir = data_dir();
    if fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(log_file) = fs::File::create(log_dir.join("mentionpad.log")) else {
        return;
    };

    let filter = EnvFilter::try_from_env("MENTIONPAD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<()> {
    let config = Config::load();
    init_logging(&config);

    let mut app = App::new(&config)?;
    app.run()
}
