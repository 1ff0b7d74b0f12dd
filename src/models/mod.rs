//! Modelos del sistema
//!
//! Este módulo contiene las entidades persistidas, sus variantes de
//! creación/actualización y las vistas de los informes.

pub mod attendance;
pub mod driver;
pub mod report;
pub mod route;
pub mod student;
pub mod trip;
pub mod vehicle;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::Collection;
use crate::services::password::PasswordHasher;
use crate::utils::errors::{AppError, AppResult};

pub use attendance::{Attendance, CreateAttendanceRequest, RecordType, UpdateAttendanceRequest};
pub use driver::{CreateDriverRequest, Driver, DriverResponse, UpdateDriverRequest};
pub use report::{TripDetail, TripSummary, VehicleUsage};
pub use route::{CreateRouteRequest, Route, StopPoint, UpdateRouteRequest};
pub use student::{CreateStudentRequest, Student, StudentResponse, UpdateStudentRequest};
pub use trip::{CreateTripRequest, Incident, IncidentKind, Trip, TripStatus, UpdateTripRequest};
pub use vehicle::{CreateVehicleRequest, MaintenanceStatus, UpdateVehicleRequest, Vehicle};

/// Entidad persistida como documento en su propia colección
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + Sized {
    const COLLECTION: Collection;
    /// Nombre legible para mensajes de error
    const LABEL: &'static str;

    type Create: DeserializeOwned + Validate + Send + Sync + 'static;
    type Update: Serialize + DeserializeOwned + Validate + Send + Sync + 'static;

    fn id(&self) -> Uuid;

    /// Construir la entidad a partir de la entrada de creación
    fn from_create(id: Uuid, input: Self::Create, hasher: &PasswordHasher) -> AppResult<Self>;

    /// Campo único de la colección y su valor en la creación
    fn unique_key(_input: &Self::Create) -> Option<(&'static str, &str)> {
        None
    }

    /// Campo único cambiado por la actualización, si lo hay
    fn unique_key_update(_update: &Self::Update) -> Option<(&'static str, &str)> {
        None
    }

    /// Campos presentes en la actualización parcial
    fn patch(update: &Self::Update, _hasher: &PasswordHasher) -> AppResult<Map<String, Value>> {
        patch_fields(update)
    }
}

/// Serializar una actualización parcial a un mapa con solo los campos presentes.
///
/// Los structs `Update*` omiten los `None` al serializar.
pub fn patch_fields<T: Serialize>(update: &T) -> AppResult<Map<String, Value>> {
    match serde_json::to_value(update)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Internal(format!("patch is not an object: {}", other))),
    }
}

pub(crate) fn default_true() -> bool {
    true
}
