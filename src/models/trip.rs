//! Modelo de Trip
//!
//! Un viaje referencia una ruta, un conductor y un vehículo por
//! identificador. Las referencias no se verifican al guardar.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::database::Collection;
use crate::models::Entity;
use crate::services::password::PasswordHasher;
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "scheduled",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentKind {
    Mechanical,
    Traffic,
    Weather,
    Other,
}

/// Incidente registrado durante el viaje
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Incident {
    #[validate(length(min = 1, max = 500))]
    pub description: String,

    #[serde(rename = "type")]
    pub kind: IncidentKind,

    pub timestamp: DateTime<Utc>,
}

/// Trip principal - documento de la colección trips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub date: NaiveDate,
    pub status: TripStatus,
    pub route_id: Uuid,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
    #[serde(default)]
    pub incidents: Vec<Incident>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTripRequest {
    pub date: NaiveDate,

    #[serde(default)]
    pub status: TripStatus,

    pub route_id: Uuid,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,

    #[serde(default)]
    #[validate(nested)]
    pub incidents: Vec<Incident>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTripRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TripStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub incidents: Option<Vec<Incident>>,
}

/// Filtros de búsqueda de viajes; los identificadores llegan como texto
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripFilters {
    pub status: Option<TripStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub driver_id: Option<String>,
    pub route_id: Option<String>,
    pub vehicle_id: Option<String>,
}

impl Entity for Trip {
    const COLLECTION: Collection = Collection::Trips;
    const LABEL: &'static str = "Trip";

    type Create = CreateTripRequest;
    type Update = UpdateTripRequest;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_create(id: Uuid, input: CreateTripRequest, _hasher: &PasswordHasher) -> AppResult<Self> {
        Ok(Self {
            id,
            date: input.date,
            status: input.status,
            route_id: input.route_id,
            driver_id: input.driver_id,
            vehicle_id: input.vehicle_id,
            incidents: input.incidents,
        })
    }
}
