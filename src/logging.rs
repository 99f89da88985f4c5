use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Filter from `RUST_LOG`, else `LOG_LEVEL` applied to the workspace crates.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(default_directives(&level))
    })
}

fn default_directives(level: &str) -> String {
    [
        "registrar",
        "registrar_client",
        "registrar_form",
        "registrar_core",
    ]
    .iter()
    .map(|target| format!("{target}={level}"))
    .chain(std::iter::once("reqwest=warn".to_string()))
    .collect::<Vec<_>>()
    .join(",")
}

/// Install the global subscriber. Logs go to stderr so tables on stdout stay clean.
pub fn init_tracing(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(env_filter());

    match format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .init(),
    }
}
