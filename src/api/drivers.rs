use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::models::vehicle::{GeoPoint, Place, Vehicle, VehicleType};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:id", get(get_driver).put(update_driver))
        .route("/:id/vehicles", post(add_vehicle))
}

async fn get_driver(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let driver = state
        .drivers
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;

    Ok(Json(json!({ "success": true, "driver": driver })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub location: Option<Place>,
    pub license_number: Option<String>,
    pub aadhar_number: Option<String>,
    pub is_available: Option<bool>,
}

/// Partial update. License and aadhar numbers must stay unique across all
/// drivers, the stand-in for the original store's unique indexes.
async fn update_driver(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDriverRequest>,
) -> Result<Json<Value>, AppError> {
    if !state.drivers.contains_key(&id) {
        return Err(AppError::NotFound("Driver not found".to_string()));
    }

    if let Some(license) = payload.license_number.as_deref() {
        let taken = state.drivers.iter().any(|entry| {
            entry.key() != &id && entry.value().license_number.as_deref() == Some(license)
        });
        if taken {
            return Err(AppError::BadRequest(
                "License number already in use".to_string(),
            ));
        }
    }
    if let Some(aadhar) = payload.aadhar_number.as_deref() {
        let taken = state.drivers.iter().any(|entry| {
            entry.key() != &id && entry.value().aadhar_number.as_deref() == Some(aadhar)
        });
        if taken {
            return Err(AppError::BadRequest(
                "Aadhar number already in use".to_string(),
            ));
        }
    }

    let updated = {
        let mut driver = state
            .drivers
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;

        if let Some(name) = payload.name {
            driver.name = name;
        }
        if let Some(email) = payload.email {
            driver.email = Some(email);
        }
        if let Some(location) = payload.location {
            driver.location = Some(location);
        }
        if let Some(license) = payload.license_number {
            driver.license_number = Some(license);
        }
        if let Some(aadhar) = payload.aadhar_number {
            driver.aadhar_number = Some(aadhar);
        }
        if let Some(is_available) = payload.is_available {
            driver.is_available = is_available;
        }

        driver.clone()
    };

    Ok(Json(json!({ "success": true, "driver": updated })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVehicleRequest {
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub registration_number: Option<String>,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Creates a listing owned by the driver and appends it to the driver's
/// vehicle list. Two separate writes, same as every other multi-entity
/// update here.
async fn add_vehicle(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddVehicleRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(raw_type), Some(brand), Some(model), Some(year)) = (
        payload.vehicle_type,
        payload.brand,
        payload.model,
        payload.year,
    ) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };
    let (Some(registration_number), Some(hourly_rate), Some(daily_rate)) = (
        payload.registration_number,
        payload.hourly_rate,
        payload.daily_rate,
    ) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    let vehicle_type: VehicleType = raw_type
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid vehicle type".to_string()))?;

    if !state.drivers.contains_key(&id) {
        return Err(AppError::NotFound("Driver not found".to_string()));
    }

    let registration_taken = state
        .vehicles
        .iter()
        .any(|entry| entry.value().registration_number == registration_number);
    if registration_taken {
        return Err(AppError::BadRequest(
            "Registration number already in use".to_string(),
        ));
    }

    let vehicle = Vehicle {
        id: Uuid::new_v4(),
        driver_id: id,
        vehicle_type,
        brand,
        model,
        year,
        registration_number,
        hourly_rate,
        daily_rate,
        availability: true,
        location: payload.location,
        features: payload.features,
        description: payload.description,
        created_at: Utc::now(),
    };

    state.vehicles.insert(vehicle.id, vehicle.clone());

    if let Some(mut driver) = state.drivers.get_mut(&id) {
        driver.vehicle_ids.push(vehicle.id);
    }

    state
        .metrics
        .vehicles_available
        .set(state.available_vehicle_count() as i64);

    info!(driver_id = %id, vehicle_id = %vehicle.id, "vehicle listed");
    Ok(Json(json!({ "success": true, "vehicle": vehicle })))
}
