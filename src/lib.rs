//! Immediate taps for touch screens.
//!
//! Binds touch and click listeners to DOM elements so a tap fires its callback
//! on `touchend` instead of waiting for the browser's delayed synthetic click.
//! While a finger is down the element carries the `touch-started` class; held
//! past `touch_delay` it also gets `touched`. Moving the finger cancels the tap
//! unless `cancel_on_move` is off, and an optional `only_if` predicate gates
//! both the state change and the callback.
//!
//! [`tap::TapHandler`] holds the logic and is generic over the element type
//! and the timer, so it runs (and is tested) without a browser. [`dom`] wires
//! it to `web_sys::Element`, [`hooks::use_fast_tap`] to Yew components, and
//! `fastTap` is exported to JavaScript.
//!
//! ```ignore
//! use yew_fast_tap::{TapBinding, TapOptions, TouchSupport};
//!
//! let binding = TapBinding::attach(
//!     vec![button],
//!     None,
//!     TapOptions::new()
//!         .touch_delay(150)
//!         .callback(|el, _ev| log::info!("tapped {}", el.id())),
//!     TouchSupport::current(),
//! )?;
//! ```

pub mod dom;
pub mod hooks;
pub mod model;
pub mod schedule;
pub mod state;
pub mod tap;

pub use dom::{TapBinding, WindowScheduler, fast_tap, options_from_js};
pub use hooks::use_fast_tap;
pub use model::{TapCallback, TapOptions, TapPredicate, TapSettings, TouchSupport};
pub use schedule::Scheduler;
pub use state::{TapTarget, TouchPhase};
pub use tap::{Outcome, TapEvent, TapHandler};
