//! Browser side of tap handling: phase storage as CSS classes on
//! `web_sys::Element`, `setTimeout` scheduling, capability detection and
//! listener registration.

use std::cell::OnceCell;
use std::rc::Rc;

use js_sys::{Array, Function, JSON, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Element, Event, Node};

use crate::model::{TapOptions, TapSettings, TouchSupport};
use crate::schedule::Scheduler;
use crate::state::{TOUCHED_CLASS, TOUCH_STARTED_CLASS, TapTarget, TouchPhase};
use crate::tap::{Outcome, TapHandler};

impl TapTarget for Element {
    fn phase(&self) -> TouchPhase {
        let classes = self.class_list();
        TouchPhase::from_flags(
            classes.contains(TOUCH_STARTED_CLASS),
            classes.contains(TOUCHED_CLASS),
        )
    }

    fn set_phase(&self, phase: TouchPhase) {
        let classes = self.class_list();
        let res = match phase {
            TouchPhase::Idle => classes.remove_2(TOUCH_STARTED_CLASS, TOUCHED_CLASS),
            TouchPhase::Started => classes
                .add_1(TOUCH_STARTED_CLASS)
                .and_then(|_| classes.remove_1(TOUCHED_CLASS)),
            TouchPhase::Touched => classes.add_2(TOUCH_STARTED_CLASS, TOUCHED_CLASS),
        };
        if let Err(e) = res {
            log::warn!("touch class update failed: {:?}", e);
        }
    }

    fn closest_within(&self, selector: &str, scope: &Self) -> Option<Self> {
        let mut cur = Some(self.clone());
        while let Some(el) = cur {
            if &el == scope {
                return None;
            }
            match el.matches(selector) {
                Ok(true) => {
                    let node: &Node = el.as_ref();
                    return scope.contains(Some(node)).then_some(el);
                }
                Ok(false) => {}
                Err(e) => {
                    log::warn!("invalid tap selector {:?}: {:?}", selector, e);
                    return None;
                }
            }
            cur = el.parent_element();
        }
        None
    }
}

/// Defers tasks with `window.setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowScheduler;

impl Scheduler for WindowScheduler {
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window; dropping deferred task");
            return;
        };
        let cb = Closure::once_into_js(move || task());
        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(e) =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), timeout)
        {
            log::warn!("setTimeout failed: {:?}", e);
        }
    }
}

impl TouchSupport {
    /// Probe the page for touch events (`'ontouchstart' in window`).
    pub fn detect() -> Self {
        let touch = web_sys::window()
            .map(|w| Reflect::has(&w, &JsValue::from_str("ontouchstart")).unwrap_or(false))
            .unwrap_or(false);
        if touch { TouchSupport::Touch } else { TouchSupport::NoTouch }
    }

    /// First detection result for this page; later capability changes are
    /// not observed.
    pub fn current() -> Self {
        thread_local! {
            static SUPPORT: OnceCell<TouchSupport> = const { OnceCell::new() };
        }
        SUPPORT.with(|s| *s.get_or_init(|| {
            let support = TouchSupport::detect();
            log::debug!("touch support: {:?}", support);
            support
        }))
    }
}

struct Listener {
    target: Element,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Listeners installed on a set of elements. Dropping the binding removes
/// them; [`TapBinding::forget`] keeps them for the page lifetime.
pub struct TapBinding {
    elements: Vec<Element>,
    listeners: Vec<Listener>,
}

impl TapBinding {
    /// Bind tap handling to `elements`. An explicit `selector` takes
    /// precedence over the one in the options.
    pub fn attach(
        elements: Vec<Element>,
        selector: Option<&str>,
        options: impl Into<TapOptions<Element, Event>>,
        support: TouchSupport,
    ) -> Result<Self, JsValue> {
        let options = options.into().with_selector_override(selector);
        let handler = Rc::new(TapHandler::new(options, support, Rc::new(WindowScheduler)));
        let events = handler.events();

        let mut binding = TapBinding {
            elements,
            listeners: Vec::with_capacity(events.len()),
        };
        for scope in binding.elements.clone() {
            for &kind in &events {
                let handler = handler.clone();
                let bound = scope.clone();
                let closure = Closure::wrap(Box::new(move |e: Event| {
                    let origin = e
                        .target()
                        .and_then(|t| t.dyn_into::<Element>().ok())
                        .unwrap_or_else(|| bound.clone());
                    if handler.handle(kind, &bound, &origin, &e) == Outcome::PreventDefault {
                        e.prevent_default();
                    }
                }) as Box<dyn FnMut(Event)>);
                // On error the partially built binding drops and unregisters.
                scope.add_event_listener_with_callback(kind.dom_name(), closure.as_ref().unchecked_ref())?;
                binding.listeners.push(Listener {
                    target: scope.clone(),
                    kind: kind.dom_name(),
                    closure,
                });
            }
        }
        log::debug!(
            "tap binding: {} element(s), {} listener(s)",
            binding.elements.len(),
            binding.listeners.len()
        );
        Ok(binding)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Leak the listeners so they live as long as the page, returning the
    /// bound elements.
    pub fn forget(mut self) -> Vec<Element> {
        for l in self.listeners.drain(..) {
            l.closure.forget();
        }
        std::mem::take(&mut self.elements)
    }
}

impl Drop for TapBinding {
    fn drop(&mut self) {
        for l in self.listeners.drain(..) {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
    }
}

/// Build options from a JS value: a bare function is the callback, an object
/// may carry `callback`, `onlyIf`, `cancelOnMove`, `touchDelay` and
/// `selector`. Anything unusable falls back to defaults.
pub fn options_from_js(value: &JsValue) -> TapOptions<Element, Event> {
    if let Some(f) = value.dyn_ref::<Function>() {
        return TapOptions::new().callback(js_callback(f.clone()));
    }
    if !value.is_object() {
        log::debug!("tap options are neither function nor object; using defaults");
        return TapOptions::new();
    }

    let settings = match JSON::stringify(value) {
        Ok(raw) => TapSettings::from_json(&String::from(raw)).unwrap_or_else(|e| {
            log::warn!("malformed tap options ({}); using defaults", e);
            TapSettings::default()
        }),
        Err(e) => {
            log::warn!("tap options not serializable ({:?}); using defaults", e);
            TapSettings::default()
        }
    };
    let mut options = TapOptions::from_settings(settings);
    match function_field(value, "callback") {
        Some(f) => options = options.callback(js_callback(f)),
        None => log::debug!("tap options carry no callable callback"),
    }
    if let Some(f) = function_field(value, "onlyIf") {
        options = options.only_if(move |el: &Element| {
            f.call1(el, el).map(|v| v.is_truthy()).unwrap_or_else(|e| {
                log::warn!("onlyIf threw: {:?}", e);
                false
            })
        });
    }
    options
}

fn function_field(value: &JsValue, key: &str) -> Option<Function> {
    Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.dyn_into::<Function>().ok())
}

fn js_callback(f: Function) -> impl Fn(&Element, &Event) + 'static {
    move |el: &Element, ev: &Event| {
        if let Err(e) = f.call2(el, el, ev) {
            log::warn!("tap callback threw: {:?}", e);
        }
    }
}

/// JS entry point: `fastTap(elements, selector, options)`. Returns
/// `elements` for chaining. Listeners stay installed for the page lifetime.
#[wasm_bindgen(js_name = fastTap)]
pub fn fast_tap(elements: Array, selector: Option<String>, options: JsValue) -> Array {
    let options = options_from_js(&options);
    let support = TouchSupport::current();
    for value in elements.iter() {
        let Ok(el) = value.dyn_into::<Element>() else {
            log::debug!("fastTap: skipping non-element entry");
            continue;
        };
        match TapBinding::attach(vec![el], selector.as_deref(), options.clone(), support) {
            Ok(binding) => {
                binding.forget();
            }
            Err(e) => log::warn!("fastTap: listener registration failed: {:?}", e),
        }
    }
    elements
}
