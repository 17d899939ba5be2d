//! Span and event helpers for business operations.
//!
//! Report composition runs inside a [`business_span!`] so its outcome shows
//! up on the trace; writes that change attendance emit an [`audit_event!`].

use tracing::Span;

/// Create a span for a business operation with OpenTelemetry status fields.
///
/// # Example
/// ```ignore
/// let span = business_span!("report.yearly", school.id = %school_id);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! business_span {
    ($operation:expr) => {
        tracing::info_span!(
            $operation,
            otel.kind = "internal",
            otel.status_code = tracing::field::Empty,
            error.message = tracing::field::Empty
        )
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::info_span!(
            $operation,
            otel.kind = "internal",
            otel.status_code = tracing::field::Empty,
            error.message = tracing::field::Empty,
            $($field)*
        )
    };
}

/// Log an audit event at INFO level.
///
/// Use this for writes that teachers and auditors may ask about later:
/// saving attendance, declaring holidays, switching the active session.
#[macro_export]
macro_rules! audit_event {
    ($action:expr, $resource:expr, $($field:tt)*) => {
        tracing::info!(
            audit.action = $action,
            audit.resource = $resource,
            $($field)*
        )
    };
}

/// Mark the span as successful.
pub fn record_success(span: &Span) {
    span.record("otel.status_code", "OK");
}

/// Mark the span as failed with an error message.
pub fn record_error(span: &Span, message: &str) {
    span.record("otel.status_code", "ERROR");
    span.record("error.message", message);
}
