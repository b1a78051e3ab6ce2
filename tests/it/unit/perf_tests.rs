//! Performance Instrumentation Tests

use domino::perf::{ScopedTimer, measure, measure_and_log};

#[test]
fn test_measure_returns_result_and_time() {
    let (value, elapsed_ms) = measure(|| (1..=100).sum::<u32>());
    assert_eq!(value, 5050);
    assert!(elapsed_ms >= 0.0);
}

#[test]
fn test_measure_and_log_passes_result_through() {
    let result: Result<u8, String> = measure_and_log("parse", 1000.0, || Ok(7));
    assert_eq!(result, Ok(7));
}

#[test]
fn test_scoped_timer_reports_name() {
    let timer = ScopedTimer::new("drag_move", 1000.0);
    assert_eq!(timer.name(), "drag_move");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_profile_scope_compiles_in_any_build() {
    fn handler() -> u32 {
        domino::profile_scope!("handler");
        domino::profile_scope!("handler_slow", 50.0);
        3
    }
    assert_eq!(handler(), 3);
}
