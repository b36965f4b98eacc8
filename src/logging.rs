//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `level` is an `EnvFilter` directive string such as `info` or
/// `shortlink=debug,sqlx=warn`, falling back to `info` if it does not parse.
/// `format` is `json` for one JSON object per line, anything else for
/// human-readable text.
///
/// Logs go to stderr so command output on stdout stays machine readable.
pub fn init(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
