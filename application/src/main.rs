use std::{
    io,
    sync::{Arc, OnceLock},
    time,
};

use application::{
    page::{admin, cart, contact, diamonds, enquiries, live},
    Args, Config, PageSizes, Service,
};
use axum::{
    extract::MatchedPath,
    response::Redirect,
    routing::{get, post},
    Extension, Router,
};
use axum_client_ip::InsecureClientIp;
use service::{infra::api, Http};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{
        self,
        format::{Compact, DefaultFields, Format},
    },
    layer::{Layer as _, SubscriberExt as _},
    registry::LookupSpan,
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            output(io::stdout)
                .with_filter(filter_fn(|meta| passes(meta, false))),
        )
        .with(
            output(io::stderr)
                .with_filter(filter_fn(|meta| passes(meta, true))),
        )
        .init();

    _ = start().await;
}

/// Compact [`fmt::Layer`] writing to `W`.
type Output<S, W> = fmt::Layer<S, DefaultFields, Format<Compact>, W>;

/// Creates a compact [`fmt::Layer`] writing to the provided `writer`.
fn output<S, W>(writer: W) -> Output<S, W>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> fmt::MakeWriter<'w> + 'static,
{
    fmt::layer()
        .compact()
        .with_ansi(true)
        .with_thread_names(true)
        .with_writer(writer)
}

/// Checks whether the event described by `meta` goes to stderr (if `stderr`
/// is on) or to stdout otherwise, respecting the configured level.
fn passes(meta: &tracing::Metadata<'_>, stderr: bool) -> bool {
    meta.is_span()
        || (STDERR_LEVELS.contains(meta.level()) == stderr)
            && LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO)
                >= *meta.level()
}

/// Builds the [`Router`] of all the pages.
fn routes() -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(diamonds::STOREFRONT) }))
        .route("/diamonds", get(diamonds::index))
        .route("/diamonds/live", get(live::storefront))
        .route("/diamonds/:key", get(diamonds::details))
        .route("/compare", get(diamonds::compare))
        .route("/cart", get(cart::index).post(cart::add))
        .route("/cart/remove", post(cart::remove))
        .route("/enquiries", get(enquiries::index).post(enquiries::create))
        .route("/contact", get(contact::index).post(contact::create))
        .route("/admin/diamonds", get(diamonds::inventory))
        .route("/admin/diamonds/live", get(live::back_office))
        .route("/admin/diamonds/:key", get(diamonds::record))
        .route("/admin/compare", get(diamonds::compare_records))
        .route("/admin/users", get(admin::users))
        .route("/admin/users/:id/:decision", post(admin::review))
        .route("/admin/admins", get(admin::admins).post(admin::create_admin))
        .route("/admin/admins/:id/remove", post(admin::remove_admin))
        .route("/admin/enquiries", get(admin::enquiries))
        .route("/admin/enquiries/:id/reply", post(admin::reply))
        .route("/admin/submissions", get(admin::submissions))
}

async fn start() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        server,
        api,
        browse,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let api = api::http::Config::try_from(api).map_err(|e| {
        log::error!("invalid `api.base_url`: {e}");
    })?;
    let client = Http::new(api).map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
    })?;
    let service = Service::new((&browse).into(), client);
    let page_sizes = PageSizes(Arc::from(browse.page_sizes));

    let mut cors = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::OPTIONS,
            http::Method::POST,
        ])
        .allow_headers([
            http::header::AUTHORIZATION,
            http::header::CONTENT_TYPE,
        ]);
    for origin in server.cors.origins {
        cors = cors.allow_origin(
            origin.parse::<http::header::HeaderValue>().map_err(|e| {
                log::error!("`{origin}` is not current CORS origin: {e}");
            })?,
        );
    }

    let app = routes()
        .layer(Extension(page_sizes))
        .layer(Extension(service))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|r: &http::Request<_>| {
                    tracing::info_span!(
                        "HTTP request",
                        http.client_ip = InsecureClientIp::from(
                            r.headers(),
                            r.extensions()
                        )
                            .map(|ip| ip.0.to_string())
                            .ok(),
                        http.flavor = ?r.version(),
                        http.host = r.uri().host(),
                        http.method = r.method().as_str(),
                        http.route = r
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str),
                        http.scheme = r
                            .uri()
                            .scheme()
                            .map(http::uri::Scheme::as_str),
                        http.target = r
                            .uri()
                            .path_and_query()
                            .map(http::uri::PathAndQuery::as_str),
                        http.user_agent = r
                            .headers()
                            .get("User-Agent")
                            .and_then(|h| h.to_str().ok()),
                        http.status_code = tracing::field::Empty,
                    )
                })
                .on_response(
                    |r: &http::Response<_>,
                     dur: time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(r.status().as_u16()),
                        );

                        if r.status().is_server_error() {
                            tracing::error!(
                                duration = format!("{}ms", dur.as_millis()),
                            );
                        } else if r.status().is_client_error() {
                            tracing::warn!(
                                duration = format!("{}ms", dur.as_millis()),
                            );
                        } else {
                            tracing::info!(
                                duration = format!("{}ms", dur.as_millis()),
                            );
                        }
                    },
                ),
        );

    let listener = TcpListener::bind((server.host.clone(), server.port))
        .await
        .map_err(|e| {
            log::error!(
                "failed to listen on `{}:{}`: {e}",
                server.host,
                server.port,
            );
        })?;

    log::info!("listening on `{}:{}`", server.host, server.port);

    axum::serve(listener, app)
        .await
        .map_err(|e| log::error!("webserver failed: {e}"))
}
