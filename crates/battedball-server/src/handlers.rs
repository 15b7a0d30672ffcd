//! Request handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use battedball::{BattedBallRecord, FilterParams};
use tracing::{debug, error, warn};

use crate::AppState;
use crate::error::ApiError;

/// Decoded query string, kept as ordered pairs so repeated keys resolve
/// first-wins.
type QueryPairs = Query<Vec<(String, String)>>;

/// `GET /api/data`: records matching the query-string filters.
///
/// Each call runs its query on a blocking thread with its own store
/// connection.
pub async fn get_data(
    State(state): State<AppState>,
    params: Result<QueryPairs, QueryRejection>,
) -> Result<Json<Vec<BattedBallRecord>>, ApiError> {
    let result = fetch(state, params).await;

    match &result {
        Ok(records) => debug!(matched = records.len(), "Filter request served"),
        Err(e) if e.status().is_client_error() => {
            warn!(error = %e, "Rejected /api/data request");
        }
        Err(e) => error!(error = %e, "Error processing /api/data request"),
    }

    result.map(Json)
}

async fn fetch(
    state: AppState,
    params: Result<QueryPairs, QueryRejection>,
) -> Result<Vec<BattedBallRecord>, ApiError> {
    let Query(pairs) = params?;
    let filter = FilterParams::from_pairs(pairs).parse()?;

    let records = tokio::task::spawn_blocking(move || state.store.fetch_filtered(&filter)).await??;
    Ok(records)
}
