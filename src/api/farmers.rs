use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::models::farmer::FarmDetails;
use crate::models::vehicle::Place;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/:id", get(get_farmer).put(update_farmer))
}

async fn get_farmer(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let farmer = state
        .farmers
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound("Farmer not found".to_string()))?;

    Ok(Json(json!({ "success": true, "farmer": farmer })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFarmerRequest {
    pub name: Option<String>,
    pub location: Option<Place>,
    pub farm_details: Option<FarmDetails>,
    pub language: Option<String>,
}

/// Partial update: only the provided fields are written.
async fn update_farmer(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFarmerRequest>,
) -> Result<Json<Value>, AppError> {
    let updated = {
        let mut farmer = state
            .farmers
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Farmer not found".to_string()))?;

        if let Some(name) = payload.name {
            farmer.name = name;
        }
        if let Some(location) = payload.location {
            farmer.location = Some(location);
        }
        if let Some(farm_details) = payload.farm_details {
            farmer.farm_details = Some(farm_details);
        }
        if let Some(language) = payload.language {
            farmer.language = language;
        }

        farmer.clone()
    };

    Ok(Json(json!({ "success": true, "farmer": updated })))
}
