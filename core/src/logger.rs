//----------------------------------------------------------------------------------------- std lib
use std::io::Write;
use std::time::Instant;
//--------------------------------------------------------------------------------- other libraries
use env_logger::fmt::style::Style;
use log::info;
use once_cell::sync::Lazy;

use crate::format_duration;

// This will get initialized below.
/// Returns the init [`Instant`]
pub static INIT_INSTANT: Lazy<Instant> = Lazy::new(Instant::now);

/// Returns the seconds since [`INIT_INSTANT`].
#[must_use]
#[inline]
pub fn uptime() -> u64 {
    INIT_INSTANT.elapsed().as_secs()
}

/// The filter used when `RUST_LOG` isn't set: everything off except folio's own crates.
#[must_use]
#[inline]
pub fn default_filter(filter: log::LevelFilter) -> String {
    format!("off,folio={filter}")
}

//---------------------------------------------------------------------------------------------------- Logger init function
#[allow(clippy::module_name_repetitions)]
/// Initializes the logger.
///
/// This enables console logging on all the internals of folio.
///
/// Functionality is provided by [`log`].
///
/// If `RUST_LOG` is set it takes precedence over `filter`.
///
/// # Panics
/// This must only be called _once_.
#[inline]
pub fn init_logger(filter: log::LevelFilter) {
    // Initialize timer.
    let now = Lazy::force(&INIT_INSTANT);

    let env = std::env::var("RUST_LOG").unwrap_or_default();

    let mut builder = env_logger::Builder::new();
    if env.is_empty() {
        builder.parse_filters(&default_filter(filter));
    } else {
        builder.parse_filters(&env);
    }

    builder
        .format(move |buf, record| {
            let level_style = buf.default_level_style(record.level()).bold();
            let dimmed = Style::new().dimmed();
            let level = match record.level() {
                log::Level::Debug => "D",
                log::Level::Trace => "T",
                log::Level::Info => "I",
                log::Level::Warn => "W",
                log::Level::Error => "E",
            };
            writeln!(
                buf,
                // Longest PATH in the repo: `storage/src/db/schemas/exhibition.rs` - `36` characters
                // Longest file in the repo: `storage/src/db/crud/series.rs`        - `3` digits
                //
                //      Longest PATH ---|        |--- Longest file
                //                      |        |
                //                      v        v
                "| {level_style}{level}{level_style:#} | {dimmed}{}{dimmed:#} | {dimmed}{: >36}{dimmed:#} @ {dimmed}{: <4}{dimmed:#} | {}",
                format_duration(&now.elapsed()),
                record.file_static().unwrap_or("???"),
                record.line().unwrap_or(0),
                record.args(),
            )
        })
        .write_style(env_logger::WriteStyle::Always)
        .init();

    if env.is_empty() {
        info!("Log Level (Flag) ... {filter}");
    } else {
        info!("Log Level (RUST_LOG) ... {env}");
    }
}

/// Initializes the tracing layer.
///
/// Tracing events (e.g. the per-request events of the http server) are written to stderr,
/// filtered by `FOLIO_TRACE` if set.
#[must_use]
#[inline]
pub fn init_tracing() -> impl tracing::Subscriber + Send + Sync {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _};

    #[cfg(not(feature = "verbose_tracing"))]
    let default = "off,folio=info,tower_http=debug";
    #[cfg(feature = "verbose_tracing")]
    let default = "trace,h2=off";

    let filter = EnvFilter::try_from_env("FOLIO_TRACE").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr),
    )
}
