//! Claim handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::CarId;

use crate::dto::claims::{ClaimResponse, CreateClaimRequest};
use crate::{error::ApiError, AppState};

/// Registers a claim against a car
pub async fn register_claim(
    State(state): State<AppState>,
    Path(car_id): Path<i64>,
    Json(request): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let claim = state
        .cars
        .register_claim(CarId::new(car_id), request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}
