//! Car handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use core_kernel::CarId;

use crate::dto::cars::{
    CarHistoryResponse, CarResponse, CreateCarRequest, InsuranceValidityResponse, ValidityParams,
};
use crate::{error::ApiError, AppState};

/// Lists all cars with their owners
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarResponse>>, ApiError> {
    let cars = state.cars.list_cars().await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// Registers a new car
pub async fn create_car(
    State(state): State<AppState>,
    Json(request): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<CarResponse>), ApiError> {
    let created = state.cars.create_car(request.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Answers whether the car is covered on the queried date
pub async fn insurance_valid(
    State(state): State<AppState>,
    Path(car_id): Path<i64>,
    Query(params): Query<ValidityParams>,
) -> Result<Json<InsuranceValidityResponse>, ApiError> {
    let date = NaiveDate::parse_from_str(&params.date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Invalid date format. Use YYYY-MM-DD.".to_string()))?;

    let car_id = CarId::new(car_id);
    let valid = state.cars.is_insurance_valid(car_id, date).await?;

    Ok(Json(InsuranceValidityResponse { car_id, date, valid }))
}

/// The car's merged policy and claim history
pub async fn car_history(
    State(state): State<AppState>,
    Path(car_id): Path<i64>,
) -> Result<Json<CarHistoryResponse>, ApiError> {
    let car_id = CarId::new(car_id);
    let events = state.cars.car_history(car_id).await?;
    Ok(Json(CarHistoryResponse { car_id, events }))
}
