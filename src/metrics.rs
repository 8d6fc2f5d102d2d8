//! Metrics instrumentation
//!
//! Thin wrappers over the [`metrics`] facade so call sites stay one line and
//! metric names live in a single place. Without a recorder installed these
//! are no-ops.

/// Label values, kept to a small fixed set to bound cardinality
pub mod labels {
    /// Establishment failed with an I/O error
    pub const REASON_IO: &str = "io";
    /// Establishment hit the configured connect timeout
    pub const REASON_TIMEOUT: &str = "timeout";
}

/// Counter metrics
pub mod counters {
    /// A session was established
    pub fn connection_established() {
        metrics::counter!("beanstalk_connect_connections_established_total").increment(1);
    }

    /// Establishment failed, labelled by reason
    pub fn connection_failed(reason: &'static str) {
        metrics::counter!(
            "beanstalk_connect_connections_failed_total",
            "reason" => reason
        )
        .increment(1);
    }

    /// A queue context was handed out, labelled by whether the memoized
    /// connection was reused or newly established
    pub fn context_created(reused: bool) {
        metrics::counter!(
            "beanstalk_connect_contexts_created_total",
            "reused" => if reused { "true" } else { "false" }
        )
        .increment(1);
    }
}

/// Histogram metrics
pub mod histograms {
    /// Time to establish a session, in milliseconds
    pub fn connect_duration(millis: u64) {
        metrics::histogram!("beanstalk_connect_connect_duration_milliseconds")
            .record(millis as f64);
    }
}
