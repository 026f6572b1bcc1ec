use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    routing::get,
    Json, Router,
};
use futures_core::stream::Stream;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use voltmarket_core::events::REALTIME_TABLES;

use crate::{
    error::{ApiError, ApiResult},
    events::ServerEvent,
    main_lib::AppState,
};

#[derive(Deserialize, Default)]
struct ColumnFilter {
    column: Option<String>,
    value: Option<String>,
}

/// Resolves the table and optional `column = value` filter of a subscription.
fn subscription(table: &str, q: ColumnFilter) -> ApiResult<(String, Option<(String, String)>)> {
    if !REALTIME_TABLES.contains(&table) {
        return Err(ApiError::BadRequest(format!(
            "Table '{}' has no realtime events",
            table
        )));
    }
    let filter = match (q.column, q.value) {
        (Some(column), Some(value)) if !column.trim().is_empty() => Some((column, value)),
        (None, None) => None,
        _ => {
            return Err(ApiError::BadRequest(
                "column and value must be given together".to_string(),
            ))
        }
    };
    Ok((table.to_string(), filter))
}

fn to_sse(evt: &ServerEvent) -> Option<SseEvent> {
    let payload = match evt.payload() {
        Ok(p) => p,
        Err(err) => {
            tracing::error!("Failed to serialize SSE payload for {}: {}", evt.name, err);
            return None;
        }
    };
    match SseEvent::default().event(evt.name).json_data(payload) {
        Ok(ev) => Some(ev),
        Err(err) => {
            tracing::error!("Failed to build SSE event {}: {}", evt.name, err);
            None
        }
    }
}

/// Streams insert/update events for one table, optionally filtered by
/// column equality. Events arrive in publish order; a subscriber that falls
/// behind skips what it missed.
async fn stream_table(
    Path(table): Path<String>,
    Query(q): Query<ColumnFilter>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Sse<impl Stream<Item = Result<SseEvent, Infallible>>>> {
    let (table, filter) = subscription(&table, q)?;
    let receiver = BroadcastStream::new(state.event_bus.subscribe());
    let stream = tokio_stream::StreamExt::filter_map(receiver, move |event| match event {
        Ok(evt) => {
            let column_filter = filter.as_ref().map(|(c, v)| (c.as_str(), v.as_str()));
            if evt.source.matches(&table, column_filter) {
                to_sse(&evt).map(Ok)
            } else {
                None
            }
        }
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!("Realtime subscriber lagged, skipped {} events", skipped);
            None
        }
    });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}

#[derive(Serialize)]
struct RecentEvent {
    event: &'static str,
    table: &'static str,
    payload: Value,
}

/// Events retained in the recent feed for one table, oldest first, with
/// the same filter rules as the stream.
async fn recent_events(
    Path(table): Path<String>,
    Query(q): Query<ColumnFilter>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<RecentEvent>>> {
    let (table, filter) = subscription(&table, q)?;
    let column_filter = filter.as_ref().map(|(c, v)| (c.as_str(), v.as_str()));
    let events = state
        .recent_events
        .matching(&table, column_filter)
        .into_iter()
        .map(|evt| {
            Ok(RecentEvent {
                event: evt.name,
                table: evt.table(),
                payload: evt.payload()?,
            })
        })
        .collect::<serde_json::Result<Vec<_>>>()
        .map_err(|e| ApiError::Anyhow(e.into()))?;
    Ok(Json(events))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/realtime/{table}", get(stream_table))
        .route("/realtime/{table}/recent", get(recent_events))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_requires_known_table() {
        assert!(subscription("accounts", ColumnFilter::default()).is_err());
        let (table, filter) = subscription("notifications", ColumnFilter::default()).unwrap();
        assert_eq!(table, "notifications");
        assert!(filter.is_none());
    }

    #[test]
    fn subscription_needs_column_and_value_together() {
        let half = ColumnFilter {
            column: Some("user_id".to_string()),
            value: None,
        };
        assert!(subscription("notifications", half).is_err());

        let full = ColumnFilter {
            column: Some("user_id".to_string()),
            value: Some("alice".to_string()),
        };
        let (_, filter) = subscription("notifications", full).unwrap();
        assert_eq!(filter, Some(("user_id".to_string(), "alice".to_string())));
    }
}
