//! Subscriber setup.
//!
//! The config file names the log filter, but loading it can already emit
//! events (migrations). Those run under a temporary subscriber with the
//! default filter; the configured one is installed afterwards.

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::TumbuhConfig;

/// `RUST_LOG` wins over `filter` when set.
pub fn subscriber<W>(filter: &str, json: bool, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);
    if json {
        Box::new(builder.json().finish())
    } else {
        Box::new(builder.finish())
    }
}

/// Run `f` with the default filter active on this thread.
pub fn during_startup<W, T>(json: bool, writer: W, f: impl FnOnce() -> T) -> T
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let startup = subscriber(TumbuhConfig::default().log_filter(), json, writer);
    tracing::subscriber::with_default(startup, f)
}

/// Install the configured subscriber. Logs go to stderr so stdout stays
/// parseable JSON.
pub fn init(config: &TumbuhConfig) -> eyre::Result<()> {
    tracing::subscriber::set_global_default(subscriber(
        config.log_filter(),
        config.json_logs,
        std::io::stderr,
    ))?;
    Ok(())
}
