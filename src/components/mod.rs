pub mod app;
pub mod tap_log;
pub mod tap_pad;
