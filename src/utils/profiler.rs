use std::time::{Duration, Instant};

use log::Level;

/// Reports the lifetime of a scope (a stroke, a fill) through `log`.
///
/// Nothing is reported when the chosen level is filtered out.
pub struct ScopeTimer {
    label: &'static str,
    level: Level,
    start: Instant,
}

impl ScopeTimer {
    /// Timer reporting at debug level.
    pub fn new(label: &'static str) -> Self {
        Self::with_level(label, Level::Debug)
    }

    pub fn with_level(label: &'static str, level: Level) -> Self {
        Self {
            label,
            level,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        if log::log_enabled!(self.level) {
            log::log!(self.level, "[TIMER] {} took {:.2?}", self.label, self.elapsed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic() {
        let timer = ScopeTimer::with_level("test", Level::Trace);
        let a = timer.elapsed();
        let b = timer.elapsed();
        assert!(b >= a);
    }
}
