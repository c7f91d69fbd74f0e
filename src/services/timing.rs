//! Stage timing helpers.

use std::time::Instant;

/// Run `f` and log how long it took as `elapsed_ms`.
pub fn measure<T>(stage: &'static str, index: usize, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    tracing::debug!(stage, index, elapsed_ms = elapsed_ms(start), "Stage finished");
    result
}

pub fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
