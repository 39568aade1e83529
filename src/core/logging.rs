//! Logging setup and request-scoped context.
//!
//! The request ID lives in a tokio task-local so log lines emitted deep in the
//! summarization path can be correlated without threading the ID through every
//! call. Task-locals do not cross `tokio::spawn`, so the summarizer re-enters
//! the scope inside its worker task.

use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

tokio::task_local! {
    /// Task-local storage for the current request ID.
    pub static REQUEST_ID: String;
}

/// Get the current request ID from context, if set.
///
/// Returns an empty string if no request ID is set.
pub fn get_request_id() -> String {
    REQUEST_ID.try_with(|id| id.clone()).unwrap_or_default()
}

/// Generate a new unique request ID using UUID v4.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Custom time formatter that uses local timezone (respects TZ environment variable)
struct LocalTime;

impl tracing_subscriber::fmt::time::FormatTime for LocalTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Build the filter string from an optional `RUST_LOG` value.
///
/// Noise suppression for the HTTP libraries is always appended, otherwise a
/// bare `RUST_LOG=trace` would flood the output with hyper internals.
pub fn filter_directives(rust_log: Option<&str>) -> String {
    let base = rust_log.unwrap_or("info,summarize_server=debug");
    format!("{},hyper=warn,hyper::proto=warn,h2=warn,reqwest=warn", base)
}

/// Install the global tracing subscriber.
///
/// Set `NO_COLOR` to disable ANSI colors (file logging).
pub fn init_tracing() {
    let no_color = std::env::var("NO_COLOR").is_ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = tracing_subscriber::EnvFilter::new(filter_directives(rust_log.as_deref()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime)
                .with_ansi(!no_color),
        )
        .init();
}
