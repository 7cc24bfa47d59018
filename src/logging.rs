use std::fs::{self, File};

use env_logger::{Env, Target};

/// Initialize diagnostics logging.
///
/// The TUI owns the terminal, so log output goes to `dday.log` next to the
/// settings file instead of stderr. `RUST_LOG` overrides the default `info`
/// filter. Failure to set up the file silently disables logging.
pub fn init() {
    let Some(dir) = dirs::config_dir().map(|d| d.join("dday")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("dday.log")) else {
        return;
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
}
