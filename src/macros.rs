#![allow(unused_macros)]

/// Helper macro for emitting category-gated diagnostic records
///
/// Expands to a [`log::debug!`] call that only fires if the category is enabled in
/// [`crate::bridge::diagnostics`].
///
/// ```rust, ignore
///  diag!(DiagFlags::TYPE, "resolve: root={}", token);
/// ```
macro_rules! diag {
    ($flag:expr, $($arg:tt)+) => {
        if $crate::bridge::diagnostics::enabled($flag) {
            log::debug!($($arg)+);
        }
    };
}
