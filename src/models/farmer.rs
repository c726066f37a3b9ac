use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vehicle::Place;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmDetails {
    pub size: Option<String>,
    #[serde(default)]
    pub crops: Vec<String>,
    pub additional_info: Option<String>,
}

/// A renting user. Created lazily on first OTP login with nothing but a
/// phone number; the profile is filled in later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub location: Option<Place>,
    pub farm_details: Option<FarmDetails>,
    pub language: String,
    pub member_since: DateTime<Utc>,
    pub total_bookings: u64,
    pub avg_rating: f64,
}

impl Farmer {
    pub fn with_phone(phone: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            phone: phone.to_string(),
            location: None,
            farm_details: None,
            language: "en".to_string(),
            member_since: Utc::now(),
            total_bookings: 0,
            avg_rating: 0.0,
        }
    }
}
