// Small helpers for the demo app

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since `start_ms` as `m:ss.mmm` (or `s.mmms` under a minute).
pub fn format_elapsed(start_ms: f64, at_ms: f64) -> String {
    let total = (at_ms - start_ms).max(0.0) as u64;
    let m = total / 60_000;
    let s = (total % 60_000) / 1000;
    let ms = total % 1000;
    if m > 0 {
        format!("{}:{:02}.{:03}", m, s, ms)
    } else {
        format!("{}.{:03}s", s, ms)
    }
}
