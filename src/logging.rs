/// Logging Module
///
/// Diagnostics go to stderr so stdout stays reserved for emitted records.
use std::env;
use tracing_subscriber::{fmt::MakeWriter, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "info";

/// Install the global subscriber, filtered by `RUST_LOG`
pub fn init() {
    subscriber(env_filter(env::var("RUST_LOG").ok().as_deref()), std::io::stderr).init();
}

/// Filter from the given directives, `info` when unset or unparsable
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn subscriber<W>(filter: EnvFilter, writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).finish()
}
