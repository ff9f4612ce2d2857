//! Configuration types for tap bindings.
//! `TapSettings` is the plain-data part (serde); `TapOptions` adds the closures.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::rc::Rc;

/// Callback fired on a completed tap with the resolved element and the
/// event that completed it.
pub type TapCallback<T, Ev> = Rc<dyn Fn(&T, &Ev)>;
/// Gate evaluated at touch begin and again at fire time.
pub type TapPredicate<T> = Rc<dyn Fn(&T) -> bool>;

/// Whether the runtime delivers touch events. Decides which listener set a
/// binding wires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchSupport {
    Touch,
    NoTouch,
}

impl TouchSupport {
    pub fn is_touch(self) -> bool {
        matches!(self, TouchSupport::Touch)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TapSettings {
    /// Clear state and skip the callback when the finger moves before release.
    #[serde(deserialize_with = "truthy")]
    pub cancel_on_move: bool,
    /// Milliseconds before a held touch gets the `touched` class.
    #[serde(deserialize_with = "lenient_delay")]
    pub touch_delay: u32,
    /// Delegation filter; only descendants matching it are handled.
    #[serde(deserialize_with = "string_or_none")]
    pub selector: Option<String>,
}

impl Default for TapSettings {
    fn default() -> Self {
        Self {
            cancel_on_move: true,
            touch_delay: 0,
            selector: None,
        }
    }
}

impl TapSettings {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

// Negative, fractional or non-numeric delays fall back to host timer
// semantics: anything below zero (or garbage) runs on the next tick.
fn lenient_delay<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(de)?;
    let ms = v.as_f64().unwrap_or(0.0);
    if !ms.is_finite() || ms <= 0.0 {
        return Ok(0);
    }
    Ok(ms.min(u32::MAX as f64) as u32)
}

// Flags follow JS truthiness so `0`, `""` or `null` switch an option off.
fn truthy<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;
    Ok(match Value::deserialize(de)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn string_or_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Full binding configuration for targets of type `T` and events of type `Ev`.
pub struct TapOptions<T, Ev> {
    pub callback: Option<TapCallback<T, Ev>>,
    pub only_if: Option<TapPredicate<T>>,
    pub settings: TapSettings,
}

impl<T, Ev> Default for TapOptions<T, Ev> {
    fn default() -> Self {
        Self {
            callback: None,
            only_if: None,
            settings: TapSettings::default(),
        }
    }
}

impl<T, Ev> Clone for TapOptions<T, Ev> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
            only_if: self.only_if.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl<T, Ev> fmt::Debug for TapOptions<T, Ev> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapOptions")
            .field("callback", &self.callback.is_some())
            .field("only_if", &self.only_if.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

impl<T, Ev> TapOptions<T, Ev> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: TapSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn callback<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, &Ev) + 'static,
    {
        self.callback = Some(Rc::new(f));
        self
    }

    pub fn only_if<P>(mut self, p: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.only_if = Some(Rc::new(p));
        self
    }

    pub fn cancel_on_move(mut self, on: bool) -> Self {
        self.settings.cancel_on_move = on;
        self
    }

    pub fn touch_delay(mut self, ms: u32) -> Self {
        self.settings.touch_delay = ms;
        self
    }

    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.settings.selector = Some(selector.into());
        self
    }

    /// Apply a selector given at bind time; it wins over the configured one.
    pub fn with_selector_override(mut self, selector: Option<&str>) -> Self {
        if let Some(selector) = selector {
            self.settings.selector = Some(selector.to_owned());
        }
        self
    }

    /// Evaluate the gate; an absent predicate always passes.
    pub fn allows(&self, target: &T) -> bool {
        self.only_if.as_ref().is_none_or(|p| p(target))
    }
}

/// A bare closure is shorthand for `{ callback }` with every other option at
/// its default.
impl<T, Ev, F> From<F> for TapOptions<T, Ev>
where
    F: Fn(&T, &Ev) + 'static,
{
    fn from(f: F) -> Self {
        Self::new().callback(f)
    }
}
