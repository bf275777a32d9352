use std::fs::File;
use std::path::Path;

use anyhow::Context;
use simplelog::{ColorChoice, CombinedLogger, LevelFilter, TermLogger, TerminalMode, WriteLogger};

/// `RUST_LOG`-driven stderr logging, or terminal plus file when `log_file` is set.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Info,
                    simplelog::Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Debug, simplelog::Config::default(), file),
            ])
            .context("installing logger")?;
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
        }
    }
    Ok(())
}
