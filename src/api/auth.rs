use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::UserType;
use crate::models::driver::Driver;
use crate::models::farmer::Farmer;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub phone: Option<String>,
    pub user_type: Option<String>,
}

async fn send_otp(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendOtpRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(phone), Some(_user_type)) = (payload.phone, payload.user_type) else {
        return Err(AppError::BadRequest(
            "Phone number and user type are required".to_string(),
        ));
    };

    let code = state.otp.issue(&phone);
    // Stands in for an SMS gateway; the code is observable in the logs only.
    info!(%phone, %code, "otp issued");

    Ok(Json(json!({
        "success": true,
        "message": "OTP sent successfully"
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone: Option<String>,
    pub otp: Option<String>,
    pub user_type: Option<String>,
}

#[derive(Serialize)]
struct SessionUser {
    id: Uuid,
    name: String,
    phone: String,
    #[serde(rename = "type")]
    user_type: UserType,
}

/// Consumes the pending code and logs the caller in, creating the identity
/// record on first contact.
async fn verify_otp(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VerifyOtpRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(phone), Some(otp), Some(user_type)) = (payload.phone, payload.otp, payload.user_type)
    else {
        return Err(AppError::BadRequest(
            "Phone, OTP, and user type are required".to_string(),
        ));
    };

    let user_type: UserType = user_type
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid user type".to_string()))?;

    if !state.otp.verify(&phone, &otp) {
        state
            .metrics
            .otp_verifications_total
            .with_label_values(&["rejected"])
            .inc();
        return Err(AppError::BadRequest("Invalid OTP".to_string()));
    }
    state
        .metrics
        .otp_verifications_total
        .with_label_values(&["verified"])
        .inc();

    let (id, name) = match user_type {
        UserType::Farmer => {
            let existing = state
                .farmers
                .iter()
                .find(|entry| entry.value().phone == phone)
                .map(|entry| (entry.value().id, entry.value().name.clone()));

            match existing {
                Some(found) => found,
                None => {
                    let farmer = Farmer::with_phone(&phone);
                    let created = (farmer.id, farmer.name.clone());
                    state.farmers.insert(farmer.id, farmer);
                    info!(%phone, user_type = user_type.as_str(), "identity created on first login");
                    created
                }
            }
        }
        UserType::Driver => {
            let existing = state
                .drivers
                .iter()
                .find(|entry| entry.value().phone == phone)
                .map(|entry| (entry.value().id, entry.value().name.clone()));

            match existing {
                Some(found) => found,
                None => {
                    let driver = Driver::with_phone(&phone);
                    let created = (driver.id, driver.name.clone());
                    state.drivers.insert(driver.id, driver);
                    info!(%phone, user_type = user_type.as_str(), "identity created on first login");
                    created
                }
            }
        }
    };

    let token = state.tokens.sign(id, user_type)?;

    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": SessionUser { id, name, phone, user_type }
    })))
}
