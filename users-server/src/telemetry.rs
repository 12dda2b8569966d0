use crate::config::LogFormat;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

pub type RequestTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
>;

pub fn default_filter(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Concise => "users_server=info,users_core=info,tower_http=info",
        LogFormat::Verbose => "users_server=debug,users_core=debug,tower_http=debug",
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Errors go to stderr, everything else to stdout.
pub fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(format)));
    let writer = std::io::stderr
        .with_max_level(Level::ERROR)
        .or_else(std::io::stdout);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer);

    match format {
        LogFormat::Concise => builder.compact().with_target(false).init(),
        LogFormat::Verbose => builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .init(),
    }
}

/// Per-request logger. Responses are logged at `INFO`; request start
/// events and headers only show up under the verbose format.
pub fn request_trace_layer(format: LogFormat) -> RequestTraceLayer {
    let verbose = format == LogFormat::Verbose;

    TraceLayer::new_for_http()
        .make_span_with(
            DefaultMakeSpan::new()
                .level(Level::INFO)
                .include_headers(verbose),
        )
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis)
                .include_headers(verbose),
        )
}
