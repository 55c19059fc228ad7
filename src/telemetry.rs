//! Telemetry helpers for applications embedding `stack-rs`.
//!
//! Stacking emits `tracing` events only; installing a subscriber is left to
//! the host. Restack summaries are logged at `debug`, per-dataset detail at
//! `trace` and failed recomputes at `warn`, all under the `stack_rs` target.

/// Filter used when `RUST_LOG` is unset: this crate's restack summaries plus
/// warnings from everything else.
pub const DEFAULT_TRACING_FILTER: &str = "warn,stack_rs=debug";

/// Initializes a `tracing` subscriber with [`DEFAULT_TRACING_FILTER`] when the
/// `telemetry` feature is enabled. `RUST_LOG` takes precedence when set.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_TRACING_FILTER));
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Initializes a `tracing` subscriber from explicit filter directives, for
/// example `"stack_rs=trace"` to see per-dataset accumulation.
///
/// Returns `false` when the feature is disabled, the directives do not parse
/// or a global subscriber is already installed.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        return match tracing_subscriber::EnvFilter::try_new(directives) {
            Ok(filter) => install(filter),
            Err(_) => false,
        };
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_scopes_detail_to_this_crate() {
        assert!(DEFAULT_TRACING_FILTER.starts_with("warn,"));
        assert!(DEFAULT_TRACING_FILTER.contains("stack_rs=debug"));
    }

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn initialization_is_a_no_op_without_the_feature() {
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_filter("stack_rs=trace"));
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn malformed_directives_are_rejected() {
        assert!(!init_tracing_with_filter("stack_rs=loudest"));
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn default_filter_parses() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_TRACING_FILTER).is_ok());
    }
}
