use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::catalog::{self, VehicleQuery};
use crate::error::AppError;
use crate::models::vehicle::VehicleType;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/types", get(vehicle_types))
        .route("/:id", get(get_vehicle))
}

async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<Value>, AppError> {
    let page = catalog::search(&state, &query)?;

    Ok(Json(json!({
        "success": true,
        "vehicles": page.vehicles,
        "totalPages": page.total_pages,
        "currentPage": page.current_page,
        "total": page.total
    })))
}

async fn vehicle_types() -> Json<Value> {
    Json(json!({
        "success": true,
        "types": VehicleType::ALL
    }))
}

async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let vehicle = state
        .vehicles
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    let driver = state.drivers.get(&vehicle.driver_id).map(|driver| {
        json!({
            "id": driver.id,
            "name": driver.name,
            "phone": driver.phone,
            "rating": driver.rating
        })
    });

    Ok(Json(json!({
        "success": true,
        "vehicle": vehicle,
        "driver": driver
    })))
}
