//! Factory methods for signal classification testing.

use crate::bridge::signal::{GuestError, SignalKind};

/// Guest errors as a Python guest raises them, paired with the expected classification
/// under [`crate::bridge::signal::SignalRegistry::python`].
pub fn python_guest_errors() -> Vec<(GuestError, Option<SignalKind>)> {
    vec![
        (
            GuestError::new("StopIteration", "done"),
            Some(SignalKind::IterationExhausted),
        ),
        (
            GuestError::new("StopIteration", ""),
            Some(SignalKind::IterationExhausted),
        ),
        (
            GuestError::new("StopAsyncIteration", "stream closed"),
            Some(SignalKind::AsyncIterationExhausted),
        ),
        (
            GuestError::new("GeneratorExit", "").with_bases(["BaseException"]),
            None,
        ),
        (
            GuestError::new("ValueError", "done").with_bases(["Exception", "BaseException"]),
            None,
        ),
        (
            GuestError::new("RuntimeError", "generator raised StopIteration")
                .with_bases(["Exception", "BaseException"])
                .with_traceback("File \"<stdin>\", line 2, in gen"),
            None,
        ),
        (
            GuestError::new("CursorExhausted", "no more rows").with_bases([
                "StopIteration",
                "Exception",
                "BaseException",
            ]),
            Some(SignalKind::IterationExhausted),
        ),
    ]
}
