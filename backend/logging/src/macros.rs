//! Call-site macros converting trailing arguments into [`LogValue`](crate::LogValue)s.
//! Prefixed with `log_` so they can be imported next to `tracing`'s macros.
//!
//! ```ignore
//! rotalog::log_warning!(logger, "count=%d", 42);
//! ```

#[macro_export]
macro_rules! log_print {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.print($template, &[$($crate::LogValue::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug($template, &[$($crate::LogValue::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.info($template, &[$($crate::LogValue::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.warning($template, &[$($crate::LogValue::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_alert {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.alert($template, &[$($crate::LogValue::from($arg)),*])
    };
}
