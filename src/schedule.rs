/// One-shot deferred execution on the current (single) event loop.
///
/// Tasks are never cancelled; a task whose work became stale must check for
/// that itself when it runs. A zero delay still defers: the task must not run
/// inside `defer`.
pub trait Scheduler {
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}
