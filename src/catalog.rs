//! Read-only vehicle search over the catalog store.

use serde::Deserialize;

use crate::error::AppError;
use crate::geo::haversine_m;
use crate::models::vehicle::{GeoPoint, Vehicle, VehicleType};
use crate::state::AppState;

/// Catalog query parameters. The geo filter only engages when `lat`, `lng`
/// and `radius` are all present; `radius` is in kilometers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuery {
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug)]
pub struct CatalogPage {
    pub vehicles: Vec<Vehicle>,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Runs the search. Only vehicles with `availability == true` are ever
/// returned. Price bounds are inclusive and apply to the hourly rate. With
/// a geo filter the results are ordered nearest-first and vehicles without
/// a stored location are excluded; otherwise ordering is unspecified.
pub fn search(state: &AppState, query: &VehicleQuery) -> Result<CatalogPage, AppError> {
    let type_filter = match query.vehicle_type.as_deref() {
        Some(raw) => Some(
            raw.parse::<VehicleType>()
                .map_err(|_| AppError::BadRequest("Invalid vehicle type".to_string()))?,
        ),
        None => None,
    };

    let geo_filter = match (query.lat, query.lng, query.radius) {
        (Some(lat), Some(lng), Some(radius)) => Some((GeoPoint { lat, lng }, radius * 1000.0)),
        _ => None,
    };

    let mut matched: Vec<(Vehicle, Option<f64>)> = state
        .vehicles
        .iter()
        .filter_map(|entry| {
            let vehicle = entry.value();
            if !vehicle.availability {
                return None;
            }
            if let Some(wanted) = type_filter {
                if vehicle.vehicle_type != wanted {
                    return None;
                }
            }
            if let Some(min) = query.min_price {
                if vehicle.hourly_rate < min {
                    return None;
                }
            }
            if let Some(max) = query.max_price {
                if vehicle.hourly_rate > max {
                    return None;
                }
            }

            match &geo_filter {
                Some((center, max_distance_m)) => {
                    let location = vehicle.location.as_ref()?;
                    let distance = haversine_m(location, center);
                    if distance > *max_distance_m {
                        return None;
                    }
                    Some((vehicle.clone(), Some(distance)))
                }
                None => Some((vehicle.clone(), None)),
            }
        })
        .collect();

    if geo_filter.is_some() {
        matched.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    }

    let total = matched.len();
    let limit = query.limit.unwrap_or(state.default_page_size).max(1);
    let current_page = query.page.unwrap_or(1).max(1);
    let total_pages = total.div_ceil(limit);

    let vehicles = matched
        .into_iter()
        .skip((current_page - 1) * limit)
        .take(limit)
        .map(|(vehicle, _)| vehicle)
        .collect();

    Ok(CatalogPage {
        vehicles,
        total,
        total_pages,
        current_page,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{VehicleQuery, search};
    use crate::config::Config;
    use crate::models::vehicle::{GeoPoint, Vehicle, VehicleType};
    use crate::state::AppState;

    fn test_state() -> AppState {
        AppState::new(&Config {
            http_port: 0,
            log_level: "info".to_string(),
            jwt_secret: "catalog-test-secret".to_string(),
            jwt_ttl_days: 7,
            default_page_size: 10,
        })
    }

    fn listing(
        state: &AppState,
        vehicle_type: VehicleType,
        hourly_rate: f64,
        availability: bool,
        location: Option<GeoPoint>,
    ) -> Uuid {
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            vehicle_type,
            brand: "Sonalika".to_string(),
            model: "DI 745".to_string(),
            year: 2020,
            registration_number: format!("MH14-{}", state.vehicles.len()),
            hourly_rate,
            daily_rate: hourly_rate * 8.0,
            availability,
            location,
            features: Vec::new(),
            description: None,
            created_at: Utc::now(),
        };
        let id = vehicle.id;
        state.vehicles.insert(id, vehicle);
        id
    }

    #[test]
    fn price_band_is_inclusive_and_availability_restricted() {
        let state = test_state();
        listing(&state, VehicleType::Tractor, 250.0, true, None);
        let in_band = listing(&state, VehicleType::Tractor, 300.0, true, None);
        listing(&state, VehicleType::Tractor, 450.0, false, None);
        listing(&state, VehicleType::Tractor, 700.0, true, None);

        let page = search(
            &state,
            &VehicleQuery {
                min_price: Some(300.0),
                max_price: Some(600.0),
                ..VehicleQuery::default()
            },
        )
        .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.vehicles[0].id, in_band);
    }

    #[test]
    fn type_filter_narrows_results() {
        let state = test_state();
        listing(&state, VehicleType::Tractor, 400.0, true, None);
        let sprayer = listing(&state, VehicleType::Sprayer, 400.0, true, None);

        let page = search(
            &state,
            &VehicleQuery {
                vehicle_type: Some("Sprayer".to_string()),
                ..VehicleQuery::default()
            },
        )
        .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.vehicles[0].id, sprayer);
    }

    #[test]
    fn unknown_type_is_a_validation_error() {
        let state = test_state();
        let query = VehicleQuery {
            vehicle_type: Some("Bulldozer".to_string()),
            ..VehicleQuery::default()
        };
        assert!(search(&state, &query).is_err());
    }

    #[test]
    fn geo_filter_orders_nearest_first_and_drops_out_of_radius() {
        let state = test_state();
        // Center on Pune; one listing in the city, one ~60 km out, one in
        // Nagpur (far outside a 100 km radius), one with no location at all.
        let near = listing(
            &state,
            VehicleType::Harvester,
            400.0,
            true,
            Some(GeoPoint { lat: 18.53, lng: 73.86 }),
        );
        let farther = listing(
            &state,
            VehicleType::Harvester,
            400.0,
            true,
            Some(GeoPoint { lat: 18.99, lng: 74.20 }),
        );
        listing(
            &state,
            VehicleType::Harvester,
            400.0,
            true,
            Some(GeoPoint { lat: 21.15, lng: 79.09 }),
        );
        listing(&state, VehicleType::Harvester, 400.0, true, None);

        let page = search(
            &state,
            &VehicleQuery {
                lat: Some(18.52),
                lng: Some(73.86),
                radius: Some(100.0),
                ..VehicleQuery::default()
            },
        )
        .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.vehicles[0].id, near);
        assert_eq!(page.vehicles[1].id, farther);
    }

    #[test]
    fn pagination_reports_totals() {
        let state = test_state();
        for _ in 0..5 {
            listing(&state, VehicleType::Tractor, 400.0, true, None);
        }

        let page = search(
            &state,
            &VehicleQuery {
                page: Some(3),
                limit: Some(2),
                ..VehicleQuery::default()
            },
        )
        .unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.vehicles.len(), 1);
    }
}
