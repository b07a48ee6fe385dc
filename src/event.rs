//! Event and log callback system.
//!
//! clampkit does not pull in a logging framework. Hosts that want to observe
//! pagination changes or the truncation state machine register a callback
//! here; without one, emitting is a cheap no-op.
//!
//! Event names used by the crate:
//!
//! - `pagination.change` with data `page=<n>`
//! - `truncate.phase` with data `<from>-><to>`
//! - `truncate.resolved` with data `cut=<n>`

use std::sync::{Arc, Mutex, PoisonError};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type EventFn = dyn Fn(&str, &str) + Send + Sync;
type LogFn = dyn Fn(LogLevel, &str) + Send + Sync;

/// A replaceable process-wide callback.
///
/// The slot lock is only held to swap or clone the callback, never while it
/// runs, so a callback may emit, replace or clear callbacks itself.
struct Slot<T: ?Sized>(Mutex<Option<Arc<T>>>);

impl<T: ?Sized> Slot<T> {
    const fn new() -> Self {
        Self(Mutex::new(None))
    }

    fn set(&self, callback: Option<Arc<T>>) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = callback;
    }

    fn get(&self) -> Option<Arc<T>> {
        self.0.lock().ok().and_then(|guard| guard.as_ref().map(Arc::clone))
    }
}

static EVENTS: Slot<EventFn> = Slot::new();
static LOGS: Slot<LogFn> = Slot::new();

/// Set the global event callback, replacing any previous one.
///
/// The callback runs outside the internal lock and may call
/// [`emit_event`] or [`set_event_callback`] itself. An emit racing with a
/// replacement may still reach the previous callback once.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    let callback: Arc<EventFn> = Arc::new(callback);
    EVENTS.set(Some(callback));
}

/// Emit an event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    if let Some(callback) = EVENTS.get() {
        callback(name, data);
    }
}

/// Set the global log callback, replacing any previous one.
///
/// Same reentrancy rules as [`set_event_callback`].
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let callback: Arc<LogFn> = Arc::new(callback);
    LOGS.set(Some(callback));
}

/// Emit a log message.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Some(callback) = LOGS.get() {
        callback(level, message);
    }
}

/// Emit a log message built lazily.
///
/// The closure only runs when a log callback is installed, so hot paths can
/// format freely.
pub(crate) fn emit_log_with(level: LogLevel, message: impl FnOnce() -> String) {
    if let Some(callback) = LOGS.get() {
        callback(level, &message());
    }
}

/// Remove both callbacks.
pub fn clear_callbacks() {
    EVENTS.set(None);
    LOGS.set(None);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Callbacks are process-wide and other tests emit concurrently, so the
    // assertions only look for the entries this test produced.
    #[test]
    fn test_event_and_log_callbacks() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = Arc::clone(&events);
        set_event_callback(move |name, data| {
            events_clone
                .lock()
                .unwrap()
                .push(format!("{name}:{data}"));
        });
        emit_event("test.event", "x=1");
        assert!(
            events
                .lock()
                .unwrap()
                .iter()
                .any(|entry| entry == "test.event:x=1")
        );

        let logs = Arc::new(Mutex::new(Vec::new()));
        let logs_clone = Arc::clone(&logs);
        set_log_callback(move |level, msg| {
            logs_clone.lock().unwrap().push((level, msg.to_string()));
        });
        emit_log(LogLevel::Info, "hello");
        emit_log_with(LogLevel::Debug, || format!("lazy {}", 42));
        {
            let logs = logs.lock().unwrap();
            assert!(logs.contains(&(LogLevel::Info, "hello".to_string())));
            assert!(logs.contains(&(LogLevel::Debug, "lazy 42".to_string())));
        }

        // A callback may emit again without deadlocking.
        let nested = Arc::new(Mutex::new(Vec::new()));
        let nested_clone = Arc::clone(&nested);
        set_event_callback(move |name, data| {
            nested_clone.lock().unwrap().push(format!("{name}:{data}"));
            if name == "test.outer" {
                emit_event("test.inner", data);
                emit_log(LogLevel::Debug, "from inside a callback");
            }
        });
        emit_event("test.outer", "n=1");
        {
            let nested = nested.lock().unwrap();
            assert!(nested.iter().any(|entry| entry == "test.inner:n=1"));
        }
        assert!(
            logs.lock()
                .unwrap()
                .contains(&(LogLevel::Debug, "from inside a callback".to_string()))
        );

        clear_callbacks();
        let before = logs.lock().unwrap().len();
        emit_log(LogLevel::Warn, "dropped");
        assert_eq!(logs.lock().unwrap().len(), before);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
