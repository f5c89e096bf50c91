use log::{debug, error, info, warn};
use std::sync::Once;
use std::time::Instant;

static INIT: Once = Once::new();

/// Operations slower than this are reported at warn level
pub const SLOW_OPERATION_MS: u64 = 100;

/// Initialize the logging system
/// Safe to call more than once; `RUST_LOG` overrides the defaults below
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info) // Default level
            .filter_module("dsmovie_lib", log::LevelFilter::Debug) // More verbose for our crate
            .filter_module("diesel", log::LevelFilter::Warn) // Reduce diesel noise
            .filter_module("r2d2", log::LevelFilter::Warn) // Pool checkouts
            .parse_env("RUST_LOG")
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .try_init();

        info!("Logging system initialized");
    });
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

/// Structured log lines shared by the services and repositories
pub struct LogContext;

impl LogContext {
    pub fn db_operation(operation: &str, table: &str, movies: Option<usize>) {
        match movies {
            Some(n) => debug!("DB: {} on {} touching {} movie(s)", operation, table, n),
            None => debug!("DB: {} on {}", operation, table),
        }
    }

    /// Title search; `results` is `None` when the search starts
    pub fn search_operation(title: &str, results: Option<usize>) {
        match results {
            Some(r) => info!("Search: title '{}' returned {} movies", title, r),
            None => debug!("Search: title '{}'", title),
        }
    }

    pub fn rating_refreshed(movie_id: i64, score: Option<f64>, count: i32) {
        match score {
            Some(mean) => debug!("Rating: movie {} at {:.2} over {} scores", movie_id, mean, count),
            None => debug!("Rating: movie {} has no scores", movie_id),
        }
    }

    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    pub fn slow_operation(operation: &str, duration_ms: u64, detail: &str) {
        warn!("Slow: {} took {}ms ({})", operation, duration_ms, detail);
    }
}

/// Times one operation and reports it when finished
pub struct TimedOperation {
    start: Instant,
    operation: &'static str,
}

impl TimedOperation {
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Logs at debug, or at warn past `SLOW_OPERATION_MS`. Returns elapsed ms.
    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        if duration > SLOW_OPERATION_MS {
            LogContext::slow_operation(self.operation, duration, info);
        } else {
            debug!("{} took {}ms ({})", self.operation, duration, info);
        }
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logger_can_be_called_twice() {
        init_logger();
        init_logger();
    }

    #[test]
    fn timed_operation_reports_elapsed_millis() {
        let timer = TimedOperation::new("sleep");
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(timer.finish_with_info("test") >= 5);
    }
}
