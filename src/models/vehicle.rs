use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A coordinates-plus-address pair used for user locations and the
/// pickup/dropoff points of a booking. Either half may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub coordinates: Option<GeoPoint>,
    pub address: Option<String>,
}

/// The closed set of equipment kinds a driver can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleType {
    Tractor,
    Rotavator,
    Cultivator,
    Harvester,
    #[serde(rename = "Power Tiller")]
    PowerTiller,
    #[serde(rename = "Water Tanker")]
    WaterTanker,
    #[serde(rename = "Mini Truck")]
    MiniTruck,
    #[serde(rename = "Ploughing Machine")]
    PloughingMachine,
    Sprayer,
    Other,
}

impl VehicleType {
    pub const ALL: [VehicleType; 10] = [
        VehicleType::Tractor,
        VehicleType::Rotavator,
        VehicleType::Cultivator,
        VehicleType::Harvester,
        VehicleType::PowerTiller,
        VehicleType::WaterTanker,
        VehicleType::MiniTruck,
        VehicleType::PloughingMachine,
        VehicleType::Sprayer,
        VehicleType::Other,
    ];
}

impl std::str::FromStr for VehicleType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Tractor" => Ok(VehicleType::Tractor),
            "Rotavator" => Ok(VehicleType::Rotavator),
            "Cultivator" => Ok(VehicleType::Cultivator),
            "Harvester" => Ok(VehicleType::Harvester),
            "Power Tiller" => Ok(VehicleType::PowerTiller),
            "Water Tanker" => Ok(VehicleType::WaterTanker),
            "Mini Truck" => Ok(VehicleType::MiniTruck),
            "Ploughing Machine" => Ok(VehicleType::PloughingMachine),
            "Sprayer" => Ok(VehicleType::Sprayer),
            "Other" => Ok(VehicleType::Other),
            _ => Err(()),
        }
    }
}

/// A piece of equipment listed by a driver. `availability` doubles as a
/// coarse reservation flag: false while a booking holds the vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub driver_id: Uuid,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub registration_number: String,
    pub hourly_rate: f64,
    pub daily_rate: f64,
    pub availability: bool,
    pub location: Option<GeoPoint>,
    pub features: Vec<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::VehicleType;

    #[test]
    fn wire_names_roundtrip_through_parse() {
        for vehicle_type in VehicleType::ALL {
            let wire = serde_json::to_value(vehicle_type).unwrap();
            let name = wire.as_str().unwrap();
            assert_eq!(name.parse::<VehicleType>(), Ok(vehicle_type));
        }
    }

    #[test]
    fn unknown_type_does_not_parse() {
        assert!("Bulldozer".parse::<VehicleType>().is_err());
    }
}
