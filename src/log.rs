use std::{
    io::Write,
    sync::OnceLock,
    time::Instant,
};

use ::log::{LevelFilter, Log, Metadata, Record};

/// Logger writing to stderr where each record is prefixed with `c` to form
/// a legal DIMACS comment line, followed by the elapsed wall-clock time.
struct CommentLogger {
    start: Instant,
    level: LevelFilter,
}

impl Log for CommentLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(
            handle,
            "c [{:9.3}s {:>5}] {}",
            self.start.elapsed().as_secs_f64(),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<CommentLogger> = OnceLock::new();

/// Installs the comment logger at the given level. Subsequent calls are
/// no-ops, so tests may call this freely.
pub fn build_logger_for_level(level: LevelFilter) {
    let logger = LOGGER.get_or_init(|| CommentLogger {
        start: Instant::now(),
        level,
    });

    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn install_is_idempotent() {
        build_logger_for_level(LevelFilter::Info);
        build_logger_for_level(LevelFilter::Trace);
        log::info!("logger installed");
    }
}
