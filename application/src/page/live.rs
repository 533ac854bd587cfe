//! Live filtering of the inventory over a WebSocket.
//!
//! The client streams JSON-encoded [`Change`]s and receives [`Frame`]s with
//! the re-rendered results. Bursts of changes are debounced, and results of
//! outdated requests are discarded, so the client only ever sees the page of
//! its latest state.

use askama::Template as _;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query,
    },
    response::Response,
};
use serde::Serialize;
use service::{
    browse::{Change, Generation, Session},
    domain::diamond::Audience,
    infra::api,
    query::diamonds::Browse,
    read::diamond::list::{self, Selector},
    Query as _,
};
use tokio::task::JoinSet;
use tracerr::Traced;
use tracing as log;

use crate::{
    page::{diamonds, SPAN_NAME},
    view::filter,
    AsError as _, Context, Error,
};

/// Maximum size of a single incoming [`Change`] message.
const MAX_MESSAGE_SIZE: usize = 4096;

/// Message sent to the client.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Frame {
    /// Indicator whether a page request is in flight.
    loading: bool,

    /// Rendered results of the latest page.
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,

    /// Query string reproducing the latest page.
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,

    /// Message of the failure of the latest request.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Frame {
    /// Creates a new [`Frame`] announcing a request in flight.
    fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }
}

/// Outcome of a page request tagged with its [`Generation`].
type Outcome = (Generation, Selector, Result<list::Page, Traced<api::Error>>);

/// Storefront live filtering socket.
#[tracing::instrument(
    skip_all,
    fields(http.page = "diamonds/live", otel.name = SPAN_NAME),
)]
#[expect(
    clippy::unused_async,
    reason = "`async` is required to match signature"
)]
pub async fn storefront(
    ctx: Context,
    Query(pairs): Query<Vec<(String, String)>>,
    ws: WebSocketUpgrade,
) -> Response {
    upgrade(ctx, &pairs, ws, Audience::Customer)
}

/// Staff live filtering socket.
#[tracing::instrument(
    skip_all,
    fields(http.page = "admin/diamonds/live", otel.name = SPAN_NAME),
)]
#[expect(
    clippy::unused_async,
    reason = "`async` is required to match signature"
)]
pub async fn back_office(
    ctx: Context,
    Query(pairs): Query<Vec<(String, String)>>,
    ws: WebSocketUpgrade,
) -> Response {
    upgrade(ctx, &pairs, ws, Audience::Staff)
}

/// Upgrades the connection, resuming the browsing state from the query
/// string `pairs`.
fn upgrade(
    ctx: Context,
    pairs: &[(String, String)],
    ws: WebSocketUpgrade,
    audience: Audience,
) -> Response {
    let session = Session::from_selector(filter::parse(
        pairs,
        ctx.service().config().page_size,
    ));
    ws.max_message_size(MAX_MESSAGE_SIZE)
        .on_upgrade(move |socket| serve(socket, ctx, session, audience))
}

/// Serves the provided `socket` until the client disconnects.
async fn serve(
    mut socket: WebSocket,
    ctx: Context,
    mut session: Session,
    audience: Audience,
) {
    let mut debounce = ctx.service().debounce();
    let mut in_flight = JoinSet::<Outcome>::new();

    loop {
        let frame = tokio::select! {
            msg = socket.recv() => {
                let text = match msg {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(
                        Message::Binary(_)
                        | Message::Ping(_)
                        | Message::Pong(_),
                    )) => continue,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        log::debug!("live socket failed: {e}");
                        break;
                    }
                };
                match serde_json::from_str::<Change>(&text) {
                    Ok(change) => {
                        if session.apply(change) {
                            debounce.touch();
                        }
                    }
                    Err(e) => log::debug!("ignoring malformed `Change`: {e}"),
                }
                continue;
            }
            () = debounce.elapsed() => {
                let (generation, selector) = session.request();
                let service = ctx.service().clone();
                _ = in_flight.spawn(async move {
                    let res = service
                        .execute(Browse {
                            audience,
                            selector: selector.clone(),
                        })
                        .await;
                    (generation, selector, res)
                });
                Frame::loading()
            }
            Some(joined) = in_flight.join_next() => {
                let Ok((generation, selector, res)) = joined else {
                    log::error!("live page request panicked");
                    continue;
                };
                match res {
                    Ok(page) => {
                        if !session.commit(generation, page.info) {
                            log::debug!("discarding outdated {generation:?}");
                            continue;
                        }
                        let results = diamonds::results(
                            &selector,
                            &page.items,
                            session.pagination(),
                            ctx.page_sizes(),
                            audience,
                        );
                        match results.render() {
                            Ok(html) => Frame {
                                loading: false,
                                html: Some(html),
                                query: Some(filter::query(&selector)),
                                error: None,
                            },
                            Err(e) => {
                                log::error!("failed to render results: {e}");
                                Frame {
                                    error: Some(Error::internal(&e).message),
                                    ..Frame::default()
                                }
                            }
                        }
                    }
                    Err(e) => {
                        if !session.is_latest(generation) {
                            continue;
                        }
                        Frame {
                            loading: false,
                            error: Some(e.into_error().message),
                            ..Frame::default()
                        }
                    }
                }
            }
        };

        let json = match serde_json::to_string(&frame) {
            Ok(json) => json,
            Err(e) => {
                log::error!("failed to encode `Frame`: {e}");
                break;
            }
        };
        if socket.send(Message::Text(json)).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Frame;

    #[test]
    fn loading_frame_omits_results() {
        let json = serde_json::to_value(Frame::loading()).unwrap();

        assert_eq!(json, serde_json::json!({"loading": true}));
    }

    #[test]
    fn error_frame_carries_message() {
        let frame = Frame {
            error: Some("Something went wrong".into()),
            ..Frame::default()
        };

        assert_eq!(
            serde_json::to_value(frame).unwrap(),
            serde_json::json!({
                "loading": false,
                "error": "Something went wrong",
            }),
        );
    }
}
