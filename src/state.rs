use dashmap::DashMap;
use uuid::Uuid;

use crate::auth::jwt::TokenKeys;
use crate::auth::otp::OtpStore;
use crate::config::Config;
use crate::models::booking::Booking;
use crate::models::driver::Driver;
use crate::models::farmer::Farmer;
use crate::models::vehicle::Vehicle;
use crate::observability::metrics::Metrics;

/// Shared service state. The entity maps are the in-process stand-in for the
/// document collections; there is no transaction spanning writes to more than
/// one of them.
pub struct AppState {
    pub farmers: DashMap<Uuid, Farmer>,
    pub drivers: DashMap<Uuid, Driver>,
    pub vehicles: DashMap<Uuid, Vehicle>,
    pub bookings: DashMap<Uuid, Booking>,
    pub otp: OtpStore,
    pub tokens: TokenKeys,
    pub metrics: Metrics,
    pub default_page_size: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            farmers: DashMap::new(),
            drivers: DashMap::new(),
            vehicles: DashMap::new(),
            bookings: DashMap::new(),
            otp: OtpStore::new(),
            tokens: TokenKeys::new(&config.jwt_secret, config.jwt_ttl_days),
            metrics: Metrics::new(),
            default_page_size: config.default_page_size,
        }
    }

    pub fn available_vehicle_count(&self) -> usize {
        self.vehicles
            .iter()
            .filter(|entry| entry.value().availability)
            .count()
    }
}
