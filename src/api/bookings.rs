use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::engine::booking::{self, CreateBooking};
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_booking))
        .route("/:id", get(get_booking))
        .route("/:id/status", put(update_status))
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<CreateBooking>,
) -> Result<impl IntoResponse, AppError> {
    let created = booking::create(&state, payload)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "booking": created
        })),
    ))
}

/// Returns the booking with summary views of the farmer, driver and vehicle
/// it references. Any reference that no longer resolves comes back null.
async fn get_booking(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let found = state
        .bookings
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let farmer = state.farmers.get(&found.farmer_id).map(|farmer| {
        json!({ "id": farmer.id, "name": farmer.name, "phone": farmer.phone })
    });
    let driver = state.drivers.get(&found.driver_id).map(|driver| {
        json!({ "id": driver.id, "name": driver.name, "phone": driver.phone })
    });
    let vehicle = state.vehicles.get(&found.vehicle_id).map(|vehicle| {
        json!({
            "id": vehicle.id,
            "type": vehicle.vehicle_type,
            "brand": vehicle.brand,
            "model": vehicle.model
        })
    });

    Ok(Json(json!({
        "success": true,
        "booking": found,
        "farmer": farmer,
        "driver": driver,
        "vehicle": vehicle
    })))
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let status = payload
        .status
        .ok_or_else(|| AppError::BadRequest("Invalid status".to_string()))?;

    let updated = booking::apply_status(&state, id, &status)?;

    Ok(Json(json!({
        "success": true,
        "booking": updated
    })))
}
