//! Tap recognition: turns touch/click events on a bound scope into `TouchPhase`
//! updates and at most one callback per completed touch.
//!
//! [`TapHandler`] knows nothing about the DOM. It is handed the bound scope,
//! the element the event originated from and the event itself; the `dom`
//! module does the listener plumbing.

use std::rc::Rc;

use crate::model::{TapOptions, TouchSupport};
use crate::schedule::Scheduler;
use crate::state::{TapTarget, TouchPhase};

/// Events a binding listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TapEvent {
    TouchStart,
    TouchMove,
    TouchEnd,
    Click,
}

impl TapEvent {
    /// DOM event type name.
    pub fn dom_name(self) -> &'static str {
        match self {
            TapEvent::TouchStart => "touchstart",
            TapEvent::TouchMove => "touchmove",
            TapEvent::TouchEnd => "touchend",
            TapEvent::Click => "click",
        }
    }
}

/// What the listener should do with the native event afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Not for this binding (delegation miss, gate closed, nothing to end).
    Ignored,
    Handled,
    /// Suppress the browser's default action.
    PreventDefault,
}

/// Tap recognizer for one binding: options, capability and timer.
pub struct TapHandler<T, Ev> {
    options: TapOptions<T, Ev>,
    support: TouchSupport,
    scheduler: Rc<dyn Scheduler>,
}

impl<T: TapTarget, Ev> TapHandler<T, Ev> {
    pub fn new(options: TapOptions<T, Ev>, support: TouchSupport, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            options,
            support,
            scheduler,
        }
    }

    pub fn options(&self) -> &TapOptions<T, Ev> {
        &self.options
    }

    pub fn support(&self) -> TouchSupport {
        self.support
    }

    /// Event types to listen for. Without touch support and without a
    /// callback there is nothing to do at all.
    pub fn events(&self) -> Vec<TapEvent> {
        if self.support.is_touch() {
            let mut events = vec![TapEvent::TouchStart, TapEvent::TouchEnd, TapEvent::Click];
            if self.options.settings.cancel_on_move {
                events.push(TapEvent::TouchMove);
            }
            events
        } else if self.options.callback.is_some() {
            vec![TapEvent::Click]
        } else {
            Vec::new()
        }
    }

    /// Element an event is attributed to: the scope itself for direct
    /// bindings, the matching descendant for delegated ones.
    pub fn resolve(&self, scope: &T, origin: &T) -> Option<T> {
        match self.options.settings.selector.as_deref() {
            None => Some(scope.clone()),
            Some(selector) => origin.closest_within(selector, scope),
        }
    }

    pub fn handle(&self, kind: TapEvent, scope: &T, origin: &T, event: &Ev) -> Outcome {
        let Some(target) = self.resolve(scope, origin) else {
            log::trace!("{} outside delegated selector", kind.dom_name());
            return Outcome::Ignored;
        };
        match (self.support, kind) {
            (TouchSupport::Touch, TapEvent::TouchStart) => self.touch_start(&target),
            (TouchSupport::Touch, TapEvent::TouchEnd) => self.touch_end(&target, event),
            (TouchSupport::Touch, TapEvent::TouchMove) if self.options.settings.cancel_on_move => {
                self.touch_move(&target)
            }
            // The touch sequence already produced the tap; the synthetic click
            // that follows must not do anything.
            (TouchSupport::Touch, TapEvent::Click) => Outcome::PreventDefault,
            (TouchSupport::NoTouch, TapEvent::Click) => {
                if self.fire(&target, event) {
                    Outcome::Handled
                } else {
                    Outcome::Ignored
                }
            }
            _ => Outcome::Ignored,
        }
    }

    fn touch_start(&self, target: &T) -> Outcome {
        if !self.options.allows(target) {
            return Outcome::Ignored;
        }
        target.set_phase(target.phase().begin());

        // No handle is kept: a released or cancelled touch makes this a no-op.
        let held = target.clone();
        self.scheduler.defer(
            self.options.settings.touch_delay,
            Box::new(move || {
                let phase = held.phase();
                if phase.is_started() {
                    held.set_phase(phase.promote());
                }
            }),
        );
        Outcome::Handled
    }

    fn touch_end(&self, target: &T, event: &Ev) -> Outcome {
        if !target.phase().is_started() {
            return Outcome::Ignored;
        }
        target.set_phase(TouchPhase::Idle);
        self.fire(target, event);
        Outcome::Handled
    }

    fn touch_move(&self, target: &T) -> Outcome {
        if target.phase().is_started() {
            log::debug!("touch cancelled by move");
        }
        target.set_phase(TouchPhase::Idle);
        Outcome::Handled
    }

    /// Run the callback if there is one and the gate is open right now.
    fn fire(&self, target: &T, event: &Ev) -> bool {
        let Some(callback) = self.options.callback.as_ref() else {
            return false;
        };
        if !self.options.allows(target) {
            log::debug!("tap suppressed by only_if");
            return false;
        }
        log::debug!("tap fired");
        callback(target, event);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Clone, Default)]
    struct Cellar(Rc<Cell<TouchPhase>>);

    impl TapTarget for Cellar {
        fn phase(&self) -> TouchPhase {
            self.0.get()
        }
        fn set_phase(&self, phase: TouchPhase) {
            self.0.set(phase);
        }
        fn closest_within(&self, _selector: &str, _scope: &Self) -> Option<Self> {
            None
        }
    }

    #[derive(Default)]
    struct Queue(RefCell<Vec<(u32, Box<dyn FnOnce()>)>>);

    impl Scheduler for Queue {
        fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            self.0.borrow_mut().push((delay_ms, task));
        }
    }

    impl Queue {
        fn run_all(&self) {
            let tasks: Vec<_> = self.0.borrow_mut().drain(..).collect();
            for (_, task) in tasks {
                task();
            }
        }
    }

    fn handler(opts: TapOptions<Cellar, ()>, support: TouchSupport) -> (TapHandler<Cellar, ()>, Rc<Queue>) {
        let queue = Rc::new(Queue::default());
        (TapHandler::new(opts, support, queue.clone()), queue)
    }

    fn counter() -> (Rc<Cell<u32>>, TapOptions<Cellar, ()>) {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        (hits, TapOptions::new().callback(move |_: &Cellar, _: &()| h.set(h.get() + 1)))
    }

    #[test]
    fn touch_event_set_depends_on_cancel_on_move() {
        let (h, _) = handler(TapOptions::new(), TouchSupport::Touch);
        assert_eq!(
            h.events(),
            vec![TapEvent::TouchStart, TapEvent::TouchEnd, TapEvent::Click, TapEvent::TouchMove]
        );
        let (h, _) = handler(TapOptions::new().cancel_on_move(false), TouchSupport::Touch);
        assert!(!h.events().contains(&TapEvent::TouchMove));
    }

    #[test]
    fn fallback_without_callback_listens_to_nothing() {
        let (h, _) = handler(TapOptions::new(), TouchSupport::NoTouch);
        assert!(h.events().is_empty());
        let (_, opts) = counter();
        let (h, _) = handler(opts, TouchSupport::NoTouch);
        assert_eq!(h.events(), vec![TapEvent::Click]);
    }

    #[test]
    fn zero_delay_still_defers_promotion() {
        let (_, opts) = counter();
        let (h, queue) = handler(opts, TouchSupport::Touch);
        let el = Cellar::default();
        h.handle(TapEvent::TouchStart, &el, &el, &());
        assert_eq!(el.phase(), TouchPhase::Started);
        queue.run_all();
        assert_eq!(el.phase(), TouchPhase::Touched);
    }

    #[test]
    fn release_clears_both_flags_and_fires_once() {
        let (hits, opts) = counter();
        let (h, queue) = handler(opts, TouchSupport::Touch);
        let el = Cellar::default();
        h.handle(TapEvent::TouchStart, &el, &el, &());
        queue.run_all();
        assert_eq!(h.handle(TapEvent::TouchEnd, &el, &el, &()), Outcome::Handled);
        assert_eq!(el.phase(), TouchPhase::Idle);
        assert_eq!(h.handle(TapEvent::TouchEnd, &el, &el, &()), Outcome::Ignored);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn state_toggles_without_callback() {
        let (h, queue) = handler(TapOptions::new(), TouchSupport::Touch);
        let el = Cellar::default();
        h.handle(TapEvent::TouchStart, &el, &el, &());
        queue.run_all();
        assert_eq!(el.phase(), TouchPhase::Touched);
        h.handle(TapEvent::TouchEnd, &el, &el, &());
        assert_eq!(el.phase(), TouchPhase::Idle);
    }

    #[test]
    fn click_is_suppressed_on_touch_path() {
        let (hits, opts) = counter();
        let (h, _) = handler(opts, TouchSupport::Touch);
        let el = Cellar::default();
        assert_eq!(h.handle(TapEvent::Click, &el, &el, &()), Outcome::PreventDefault);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn gate_closing_before_release_clears_state_without_firing() {
        let (hits, opts) = counter();
        let open = Rc::new(Cell::new(true));
        let gate = open.clone();
        let (h, _) = handler(opts.only_if(move |_| gate.get()), TouchSupport::Touch);
        let el = Cellar::default();
        h.handle(TapEvent::TouchStart, &el, &el, &());
        open.set(false);
        h.handle(TapEvent::TouchEnd, &el, &el, &());
        assert_eq!(el.phase(), TouchPhase::Idle);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn fallback_click_respects_gate() {
        let (hits, opts) = counter();
        let open = Rc::new(Cell::new(false));
        let gate = open.clone();
        let (h, _) = handler(opts.only_if(move |_| gate.get()), TouchSupport::NoTouch);
        let el = Cellar::default();
        assert_eq!(h.handle(TapEvent::Click, &el, &el, &()), Outcome::Ignored);
        open.set(true);
        assert_eq!(h.handle(TapEvent::Click, &el, &el, &()), Outcome::Handled);
        assert_eq!(hits.get(), 1);
        assert_eq!(el.phase(), TouchPhase::Idle);
    }

    #[test]
    fn stale_deferred_check_promotes_a_newer_touch() {
        let (_, opts) = counter();
        let (h, queue) = handler(opts.touch_delay(100), TouchSupport::Touch);
        let el = Cellar::default();
        h.handle(TapEvent::TouchStart, &el, &el, &());
        h.handle(TapEvent::TouchEnd, &el, &el, &());
        h.handle(TapEvent::TouchStart, &el, &el, &());
        // Both checks are pending; the first one sees the second touch.
        assert_eq!(queue.0.borrow().len(), 2);
        let first = queue.0.borrow_mut().remove(0);
        (first.1)();
        assert_eq!(el.phase(), TouchPhase::Touched);
    }
}
