use crate::models::vehicle::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6_371.0;

pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}

/// Radius filters take kilometers on the wire but compare in meters.
pub fn haversine_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_km(a, b) * 1000.0
}

#[cfg(test)]
mod tests {
    use super::{haversine_km, haversine_m};
    use crate::models::vehicle::GeoPoint;

    #[test]
    fn zero_distance_for_same_point() {
        let p = GeoPoint {
            lat: 18.5204,
            lng: 73.8567,
        };
        assert!(haversine_km(&p, &p) < 1e-9);
    }

    #[test]
    fn delhi_to_jaipur_is_around_237_km() {
        let delhi = GeoPoint {
            lat: 28.6139,
            lng: 77.2090,
        };
        let jaipur = GeoPoint {
            lat: 26.9124,
            lng: 75.7873,
        };
        let distance = haversine_km(&delhi, &jaipur);
        assert!((distance - 237.0).abs() < 10.0);
    }

    #[test]
    fn meters_are_kilometers_times_thousand() {
        let a = GeoPoint { lat: 20.0, lng: 77.0 };
        let b = GeoPoint { lat: 20.1, lng: 77.1 };
        let km = haversine_km(&a, &b);
        let m = haversine_m(&a, &b);
        assert!((m - km * 1000.0).abs() < 1e-6);
    }
}
