//! Modelo de Vehicle

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::database::Collection;
use crate::models::Entity;
use crate::services::password::PasswordHasher;
use crate::utils::errors::AppResult;

/// Estado de mantenimiento del vehículo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    #[default]
    Available,
    InMaintenance,
    Inactive,
}

impl MaintenanceStatus {
    /// Valor almacenado (coincide con la representación serde)
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Available => "available",
            MaintenanceStatus::InMaintenance => "in_maintenance",
            MaintenanceStatus::Inactive => "inactive",
        }
    }
}

/// Vehicle principal - documento de la colección vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub model: String,
    pub passenger_capacity: i32,
    pub maintenance_status: MaintenanceStatus,
    pub adapted_pcd: bool,
    pub manufacture_year: i32,
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 10))]
    pub plate: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,

    #[validate(range(min = 1))]
    pub passenger_capacity: i32,

    #[serde(default)]
    pub maintenance_status: MaintenanceStatus,

    #[serde(default)]
    pub adapted_pcd: bool,

    #[validate(range(min = 1900, max = 2030))]
    pub manufacture_year: i32,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 10))]
    pub plate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub passenger_capacity: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_status: Option<MaintenanceStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapted_pcd: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1900, max = 2030))]
    pub manufacture_year: Option<i32>,
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    pub maintenance_status: Option<MaintenanceStatus>,
    pub adapted_pcd: Option<bool>,
    pub manufacture_year: Option<i32>,
}

impl Entity for Vehicle {
    const COLLECTION: Collection = Collection::Vehicles;
    const LABEL: &'static str = "Vehicle";

    type Create = CreateVehicleRequest;
    type Update = UpdateVehicleRequest;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_create(id: Uuid, input: CreateVehicleRequest, _hasher: &PasswordHasher) -> AppResult<Self> {
        Ok(Self {
            id,
            plate: input.plate,
            model: input.model,
            passenger_capacity: input.passenger_capacity,
            maintenance_status: input.maintenance_status,
            adapted_pcd: input.adapted_pcd,
            manufacture_year: input.manufacture_year,
        })
    }
}
