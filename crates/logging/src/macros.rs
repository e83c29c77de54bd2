//! # Logging Macros
//!
//! Convenience macros for structured logging.

/// Log a completed API request with method, path, status, duration and request ID.
///
/// # Example
///
/// ```rust
/// use logging::{log_api_request, RequestId};
///
/// let request_id = RequestId::new();
/// log_api_request!("GET", "/departments/1", 200, 12, request_id);
/// ```
#[macro_export]
macro_rules! log_api_request {
    ($method:expr, $path:expr, $status:expr, $duration_ms:expr, $request_id:expr) => {
        $crate::info!(
            target: "api",
            method = %$method,
            path = %$path,
            status = %$status,
            duration_ms = %$duration_ms,
            request_id = %$request_id,
            "API request"
        )
    };
}

/// Measure and log the duration of a block of code at debug level.
///
/// Works with `.await` inside the block.
///
/// # Example
///
/// ```rust
/// use logging::measure_duration;
///
/// let total = measure_duration!("tree", "sum", {
///     (1 ..= 10).sum::<u32>()
/// });
/// assert_eq!(total, 55);
/// ```
#[macro_export]
macro_rules! measure_duration {
    ($target:expr, $context:expr, $block:block) => {{
        let start = std::time::Instant::now();
        let result = $block;
        $crate::debug!(
            target: $target,
            context = %$context,
            duration_ms = start.elapsed().as_millis() as u64,
            "Operation completed"
        );
        result
    }};
}
