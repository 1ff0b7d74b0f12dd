//! Vistas de informes
//!
//! Resultados de las uniones en memoria entre viajes, rutas, conductores,
//! vehículos y asistencias.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DriverResponse, Incident, Route, TripStatus, Vehicle};

/// Viaje con sus referencias resueltas
#[derive(Debug, Clone, Serialize)]
pub struct TripDetail {
    pub id: String,
    pub date: NaiveDate,
    pub status: TripStatus,
    pub route: Route,
    pub driver: DriverResponse,
    pub vehicle: Vehicle,
    pub incidents: Vec<Incident>,
}

/// Proyección de un viaje para listados por periodo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    pub id: String,
    pub date: NaiveDate,
    pub status: TripStatus,
    pub route_name: String,
    pub driver_name: String,
    pub vehicle_plate: String,
    pub incident_count: usize,
}

/// Estadísticas de uso por vehículo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleUsage {
    pub vehicle_id: String,
    pub plate: String,
    pub model: String,
    pub total_trips: u64,
    pub completed_trips: u64,
    pub cancelled_trips: u64,
    /// completed / total; 0 cuando no hay viajes
    pub completion_rate: f64,
}
