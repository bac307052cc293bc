//! Invoking a subject while catching both error returns and panics.
//!
//! A panic hook is installed once per process. While a capture is active on
//! the current thread the hook records the panic message, location and stack
//! trace instead of printing them; on every other thread, or outside a
//! capture, it defers to whichever hook was installed before.

use crate::subject::{Subject, SubjectError};
use crate::value::Value;
use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Cell, RefCell};
use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

/// Why an invocation produced no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// One-line description of the failure.
    pub message: String,
    /// Messages of the underlying errors, outermost first.
    pub causes: Vec<String>,
    /// Rendered stack trace.
    pub trace: String,
    pub panicked: bool,
}

struct PanicRecord {
    message: String,
    location: Option<String>,
    trace: String,
}

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
    static LAST_PANIC: RefCell<Option<PanicRecord>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !CAPTURING.with(Cell::get) {
                previous(info);
                return;
            }
            let record = PanicRecord {
                message: payload_message(info.payload()),
                location: info
                    .location()
                    .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column())),
                trace: render_trace(&Backtrace::force_capture()),
            };
            LAST_PANIC.with(|slot| *slot.borrow_mut() = Some(record));
        }));
    });
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn render_trace(trace: &Backtrace) -> String {
    match trace.status() {
        BacktraceStatus::Captured => trace.to_string(),
        _ => "<stack trace unavailable on this platform>".to_string(),
    }
}

impl Failure {
    fn from_error(err: &SubjectError) -> Self {
        let mut causes: Vec<String> = Vec::new();
        let mut last = err.to_string();
        let mut next = err.source();
        while let Some(cause) = next {
            let text = cause.to_string();
            if text != last {
                causes.push(text.clone());
            }
            last = text;
            next = cause.source();
        }
        Self {
            message: err.to_string(),
            causes,
            trace: render_trace(err.trace()),
            panicked: false,
        }
    }

    fn from_panic(payload: Box<dyn Any + Send>, record: Option<PanicRecord>) -> Self {
        match record {
            Some(record) => {
                let message = match record.location {
                    Some(location) => format!("panicked at {}: {}", location, record.message),
                    None => format!("panicked: {}", record.message),
                };
                Self {
                    message,
                    causes: Vec::new(),
                    trace: record.trace,
                    panicked: true,
                }
            }
            None => Self {
                message: format!("panicked: {}", payload_message(payload.as_ref())),
                causes: Vec::new(),
                trace: "<stack trace was not recorded>".to_string(),
                panicked: true,
            },
        }
    }
}

/// Calls `subject` with `args`, turning an `Err` return or a panic into a [`Failure`].
pub fn invoke<S: Subject + ?Sized>(subject: &S, args: &[Value]) -> Result<Value, Failure> {
    install_hook();
    LAST_PANIC.with(|slot| slot.borrow_mut().take());
    let was_capturing = CAPTURING.with(|c| c.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| subject.call(args)));
    CAPTURING.with(|c| c.set(was_capturing));

    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(Failure::from_error(&err)),
        Err(payload) => {
            let record = LAST_PANIC.with(|slot| slot.borrow_mut().take());
            Err(Failure::from_panic(payload, record))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Function;
    use crate::values;

    #[test]
    fn returns_value_on_success() {
        let id = Function::new("id", |args: &[Value]| Ok(args[0].clone()));
        assert_eq!(invoke(&id, &values![5]), Ok(Value::Int(5)));
    }

    #[test]
    fn error_return_becomes_failure() {
        let boom = Function::new("boom", |_: &[Value]| Err(SubjectError::new("boom")));
        let failure = invoke(&boom, &values![1]).unwrap_err();
        assert_eq!(failure.message, "boom");
        assert!(!failure.panicked);
        assert!(!failure.trace.is_empty());
    }

    #[test]
    fn source_chain_is_collected() {
        let bad = Function::new("bad", |_: &[Value]| {
            let parse = "x".parse::<i64>().unwrap_err();
            Err(SubjectError::wrap("could not read input", parse))
        });
        let failure = invoke(&bad, &values![]).unwrap_err();
        assert_eq!(failure.causes, vec!["invalid digit found in string".to_string()]);
    }

    #[test]
    fn panic_is_caught_with_location() {
        let explode = Function::new("explode", |_: &[Value]| -> Result<Value, SubjectError> {
            panic!("index out of range")
        });
        let failure = invoke(&explode, &values![]).unwrap_err();
        assert!(failure.panicked);
        assert!(failure.message.contains("index out of range"));
        assert!(failure.message.contains("capture.rs"));
    }

    #[test]
    fn capture_flag_is_restored() {
        let explode = Function::new("explode", |_: &[Value]| -> Result<Value, SubjectError> {
            panic!("once")
        });
        let _ = invoke(&explode, &values![]);
        assert!(!CAPTURING.with(Cell::get));
    }
}
