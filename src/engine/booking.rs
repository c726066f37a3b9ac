//! Booking lifecycle: creation and status transitions, plus the field
//! updates they mirror into the vehicle and identity stores.
//!
//! Writes to the three stores are independent; nothing rolls back if a
//! later write cannot land. Transition side effects key off the target
//! status alone — the current status is never consulted, so a repeated
//! `completed` call credits the driver again. Both behaviors are kept
//! deliberately.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::booking::{
    Booking, BookingStatus, BookingType, DurationType, PaymentMethod, PaymentStatus,
};
use crate::models::vehicle::Place;
use crate::state::AppState;

/// Creation payload. Required fields arrive as `Option` so a missing field
/// maps to the documented validation error instead of a decode failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub farmer_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub booking_type: Option<BookingType>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration_type: Option<DurationType>,
    pub quantity: Option<f64>,
    pub total_price: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub pickup_location: Option<Place>,
    #[serde(default)]
    pub dropoff_location: Option<Place>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Creates a booking against an available vehicle.
///
/// Three writes land in order: the booking insert, the vehicle availability
/// flip, the farmer counter bump. The availability check and the flip are
/// separate steps, so two concurrent creates can both pass the check.
pub fn create(state: &AppState, request: CreateBooking) -> Result<Booking, AppError> {
    let (Some(farmer_id), Some(driver_id), Some(vehicle_id)) =
        (request.farmer_id, request.driver_id, request.vehicle_id)
    else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };
    let (Some(booking_type), Some(start_date), Some(end_date), Some(duration_type)) = (
        request.booking_type,
        request.start_date,
        request.end_date,
        request.duration_type,
    ) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };
    let (Some(quantity), Some(total_price), Some(payment_method)) =
        (request.quantity, request.total_price, request.payment_method)
    else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    let available = state
        .vehicles
        .get(&vehicle_id)
        .map(|vehicle| vehicle.availability)
        .unwrap_or(false);
    if !available {
        return Err(AppError::BadRequest("Vehicle is not available".to_string()));
    }

    let now = Utc::now();
    let booking = Booking {
        id: Uuid::new_v4(),
        farmer_id,
        driver_id,
        vehicle_id,
        booking_type,
        start_date,
        end_date,
        duration_type,
        quantity,
        total_price,
        status: BookingStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_method,
        pickup_location: request.pickup_location,
        dropoff_location: request.dropoff_location,
        notes: request.notes,
        created_at: now,
        updated_at: now,
    };

    state.bookings.insert(booking.id, booking.clone());

    if let Some(mut vehicle) = state.vehicles.get_mut(&vehicle_id) {
        vehicle.availability = false;
    }

    if let Some(mut farmer) = state.farmers.get_mut(&farmer_id) {
        farmer.total_bookings += 1;
    }

    state
        .metrics
        .bookings_total
        .with_label_values(&["pending"])
        .inc();
    state
        .metrics
        .vehicles_available
        .set(state.available_vehicle_count() as i64);

    info!(booking_id = %booking.id, vehicle_id = %vehicle_id, "booking created");
    Ok(booking)
}

/// Applies a status transition and its side effects.
///
/// `completed` credits the driver's trip and earnings counters; the vehicle
/// stays unavailable. `cancelled` frees the vehicle. A side effect whose
/// entity is gone is skipped; the status write happens regardless, as its
/// own separate write.
pub fn apply_status(state: &AppState, booking_id: Uuid, status: &str) -> Result<Booking, AppError> {
    let Some(status) = BookingStatus::parse(status) else {
        return Err(AppError::BadRequest("Invalid status".to_string()));
    };

    let (driver_id, vehicle_id, total_price) = {
        let booking = state
            .bookings
            .get(&booking_id)
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
        (booking.driver_id, booking.vehicle_id, booking.total_price)
    };

    match status {
        BookingStatus::Completed => {
            if let Some(mut driver) = state.drivers.get_mut(&driver_id) {
                driver.total_trips += 1;
                driver.total_earnings += total_price;
            } else {
                debug!(%booking_id, %driver_id, "driver gone, earnings update skipped");
            }
        }
        BookingStatus::Cancelled => {
            if let Some(mut vehicle) = state.vehicles.get_mut(&vehicle_id) {
                vehicle.availability = true;
            } else {
                debug!(%booking_id, %vehicle_id, "vehicle gone, availability restore skipped");
            }
            state
                .metrics
                .vehicles_available
                .set(state.available_vehicle_count() as i64);
        }
        _ => {}
    }

    let updated = {
        let mut booking = state
            .bookings
            .get_mut(&booking_id)
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
        booking.status = status;
        booking.updated_at = Utc::now();
        booking.clone()
    };

    state
        .metrics
        .bookings_total
        .with_label_values(&[status.as_str()])
        .inc();

    info!(%booking_id, status = status.as_str(), "booking status updated");
    Ok(updated)
}
