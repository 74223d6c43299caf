use serde::{Deserialize, Serialize};

use super::reservation::EquipmentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    Available,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub status: EquipmentStatus,
}

impl Equipment {
    /// Equipment under maintenance is listed but cannot be booked.
    pub fn is_bookable(&self) -> bool {
        self.status == EquipmentStatus::Available
    }
}
