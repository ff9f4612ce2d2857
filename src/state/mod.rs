pub mod touch;

pub use touch::{TOUCHED_CLASS, TOUCH_STARTED_CLASS, TapTarget, TouchPhase};
