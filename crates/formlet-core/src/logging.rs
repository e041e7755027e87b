//! Logging integration for the formlet engine.
//!
//! Provides a helper for configuring [`tracing`]-based logging. The engine
//! itself only emits `debug!`/`trace!` events; embedding applications call
//! [`init`] (or install their own subscriber) to see them.

/// Sets up a global tracing subscriber.
///
/// The filter directive follows the usual `EnvFilter` syntax (e.g.
/// `"formlet=debug"`). When `pretty` is set a human-readable format with
/// file/line information is used; otherwise output is structured JSON.
///
/// Installation is best-effort: if a subscriber is already set, this is a
/// no-op rather than a panic, so tests can call it repeatedly.
pub fn init(filter: &str, pretty: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if pretty {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("formlet=debug", true);
        init("formlet=trace", false);
        tracing::debug!("still alive after double init");
    }

    #[test]
    fn test_init_falls_back_on_bad_filter() {
        init("not a [valid] directive!!", true);
    }
}
