use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vehicle::Place;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DriverRating {
    pub average: f64,
    pub count: u64,
}

/// An equipment owner. License and aadhar numbers are unset until the
/// driver completes their profile; once set, each must be globally unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub location: Option<Place>,
    pub license_number: Option<String>,
    pub aadhar_number: Option<String>,
    pub vehicle_ids: Vec<Uuid>,
    pub total_trips: u64,
    pub total_earnings: f64,
    pub rating: DriverRating,
    pub is_available: bool,
    pub member_since: DateTime<Utc>,
}

impl Driver {
    pub fn with_phone(phone: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            phone: phone.to_string(),
            email: None,
            location: None,
            license_number: None,
            aadhar_number: None,
            vehicle_ids: Vec::new(),
            total_trips: 0,
            total_earnings: 0.0,
            rating: DriverRating::default(),
            is_available: true,
            member_since: Utc::now(),
        }
    }
}
