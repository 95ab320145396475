//! Canonical logging macros
//!
//! Every comparison entry point brackets its work with these so that a log
//! pipeline sees one `start` and exactly one `end` or `end_error` per call.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use esdiff_core::log_op_start;
/// log_op_start!("suppress");
/// log_op_start!("suppress", resource = "elasticsearch_transform");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use esdiff_core::log_op_end;
/// log_op_end!("suppress", duration_ms = 0);
/// log_op_end!("suppress", duration_ms = 0, equivalent = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into [`ExError`](crate::errors::ExError).
///
/// # Example
///
/// ```
/// # use esdiff_core::log_op_error;
/// use esdiff_core::errors::EsDiffError;
///
/// let err = EsDiffError::MalformedJson { side: "old".into(), reason: "EOF".into() };
/// log_op_error!("diff_json", err.clone(), duration_ms = 0);
/// log_op_error!("transform_diff", err, duration_ms = 0, kind = "transform");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            side = ex_err.side().unwrap_or(""),
            "{}",
            ex_err
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)+) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            side = ex_err.side().unwrap_or(""),
            $($field)+,
            "{}",
            ex_err
        );
    }};
}
