//! Policy handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::CarId;

use crate::dto::policies::{CreatePolicyRequest, PolicyResponse};
use crate::{error::ApiError, AppState};

/// Attaches an insurance policy to a car
pub async fn create_policy(
    State(state): State<AppState>,
    Path(car_id): Path<i64>,
    Json(request): Json<CreatePolicyRequest>,
) -> Result<(StatusCode, Json<PolicyResponse>), ApiError> {
    let policy = state
        .cars
        .create_policy(CarId::new(car_id), request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(policy.into())))
}
