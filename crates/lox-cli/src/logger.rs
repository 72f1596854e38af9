//! Minimal stderr backend for the `log` facade

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Install the logger; later calls only adjust the level
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_sets_max_level() {
        init(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(LOGGER.enabled(&Metadata::builder().level(log::Level::Debug).build()));
        assert!(!LOGGER.enabled(&Metadata::builder().level(log::Level::Trace).build()));
    }
}
