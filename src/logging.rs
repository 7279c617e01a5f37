//! Log output setup for the binaries.
//!
//! Library crates only use the `log` macros; the binaries pick where the
//! records go. The terminal game owns stdout, so it logs to a file. The score
//! server logs to the console.

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::{
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} {m}{n}";

/// Send log records at or above `level` to `file_path` (appending)
pub fn init_file(level: LevelFilter, file_path: &str) -> Result<()> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(file_path)
        .with_context(|| format!("opening log file {file_path}"))?;
    init_with("logfile", Box::new(logfile), level)
}

/// Send log records at or above `level` to stderr
pub fn init_console(level: LevelFilter) -> Result<()> {
    let console = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    init_with("console", Box::new(console), level)
}

fn init_with(name: &str, appender: Box<dyn log4rs::append::Append>, level: LevelFilter) -> Result<()> {
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build(name, appender),
        )
        .build(Root::builder().appender(name).build(level))
        .context("building log configuration")?;
    log4rs::init_config(config).context("installing logger")?;
    Ok(())
}
