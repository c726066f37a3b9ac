pub mod booking;
pub mod driver;
pub mod farmer;
pub mod vehicle;

use serde::{Deserialize, Serialize};

/// The two user roles. Each resolves against its own identity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Farmer,
    Driver,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Farmer => "farmer",
            UserType::Driver => "driver",
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "farmer" => Ok(UserType::Farmer),
            "driver" => Ok(UserType::Driver),
            _ => Err(()),
        }
    }
}
