// Per-element touch state: the two presentational flags as one enum.

/// CSS class marking an element whose touch has begun and not yet ended.
pub const TOUCH_STARTED_CLASS: &str = "touch-started";
/// CSS class marking a touch held past the configured delay.
pub const TOUCHED_CLASS: &str = "touched";

/// Interaction phase of a single element.
///
/// `Touched` implies `touch-started`; the combination "touched but not started"
/// cannot be expressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchPhase {
    #[default]
    Idle,
    /// `touch-started` only.
    Started,
    /// Both `touch-started` and `touched`.
    Touched,
}

impl TouchPhase {
    /// Rebuild a phase from the two flags. A stray `touched` without
    /// `touch-started` reads as idle.
    pub fn from_flags(started: bool, touched: bool) -> Self {
        match (started, touched) {
            (true, true) => TouchPhase::Touched,
            (true, false) => TouchPhase::Started,
            (false, _) => TouchPhase::Idle,
        }
    }

    pub fn is_started(self) -> bool {
        !matches!(self, TouchPhase::Idle)
    }

    pub fn is_touched(self) -> bool {
        matches!(self, TouchPhase::Touched)
    }

    /// Touch begin. An element already in `Touched` keeps its styling.
    pub fn begin(self) -> Self {
        match self {
            TouchPhase::Idle => TouchPhase::Started,
            other => other,
        }
    }

    /// Deferred long-press check: only a still-started touch is promoted.
    pub fn promote(self) -> Self {
        match self {
            TouchPhase::Idle => TouchPhase::Idle,
            _ => TouchPhase::Touched,
        }
    }
}

/// Storage for an element's [`TouchPhase`] plus the delegation lookup.
///
/// Implementors are cheap handles (`Clone` shares the underlying element), so
/// a deferred task can hold its own copy and observe later writes.
pub trait TapTarget: Clone + 'static {
    fn phase(&self) -> TouchPhase;

    fn set_phase(&self, phase: TouchPhase);

    /// Nearest ancestor-or-self of `self` matching `selector` that lies
    /// strictly inside `scope`.
    fn closest_within(&self, selector: &str, scope: &Self) -> Option<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_is_idempotent() {
        assert_eq!(TouchPhase::Idle.begin(), TouchPhase::Started);
        assert_eq!(TouchPhase::Started.begin(), TouchPhase::Started);
        assert_eq!(TouchPhase::Touched.begin(), TouchPhase::Touched);
    }

    #[test]
    fn promote_ignores_cleared_state() {
        assert_eq!(TouchPhase::Idle.promote(), TouchPhase::Idle);
        assert_eq!(TouchPhase::Started.promote(), TouchPhase::Touched);
        assert_eq!(TouchPhase::Touched.promote(), TouchPhase::Touched);
    }

    #[test]
    fn flags_round_trip_through_phase() {
        assert_eq!(TouchPhase::from_flags(false, false), TouchPhase::Idle);
        assert_eq!(TouchPhase::from_flags(false, true), TouchPhase::Idle);
        assert_eq!(TouchPhase::from_flags(true, false), TouchPhase::Started);
        assert_eq!(TouchPhase::from_flags(true, true), TouchPhase::Touched);
        assert!(TouchPhase::Touched.is_started());
        assert!(!TouchPhase::Started.is_touched());
    }
}
