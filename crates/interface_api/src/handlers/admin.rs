//! Administrative handlers

use axum::{extract::State, Json};

use crate::dto::admin::ExpirationCheckResponse;
use crate::{error::ApiError, AppState};

/// Manually triggers one expiration scan.
///
/// Runs synchronously and propagates any detector failure to the caller;
/// unlike the background poller there is no retry here.
pub async fn check_expirations(
    State(state): State<AppState>,
) -> Result<Json<ExpirationCheckResponse>, ApiError> {
    let summary = state.expiration.check_expired_policies().await?;
    Ok(Json(summary.into()))
}
