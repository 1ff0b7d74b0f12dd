//! Servicio de informes
//!
//! Uniones explícitas en memoria entre viajes y sus referencias. Un viaje
//! o registro cuya referencia ya no existe se descarta del resultado
//! (semántica de inner join).

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::{Filter, SharedStore};
use crate::models::{
    Attendance, Driver, Route, Student, Trip, TripDetail, TripStatus, TripSummary, Vehicle,
    VehicleUsage,
};
use crate::repositories::trip_repository::date_range_filter;
use crate::repositories::Repository;
use crate::services::password::PasswordHasher;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::validate_period;

#[derive(Clone)]
pub struct ReportService {
    trips: Repository<Trip>,
    routes: Repository<Route>,
    drivers: Repository<Driver>,
    vehicles: Repository<Vehicle>,
    students: Repository<Student>,
    attendance: Repository<Attendance>,
}

impl ReportService {
    pub fn new(store: SharedStore, search_limit: u64) -> Self {
        // Los informes no crean entidades: el coste de hash no se usa.
        let hasher = PasswordHasher::default();
        Self {
            trips: Repository::new(store.clone(), hasher).with_search_limit(search_limit),
            routes: Repository::new(store.clone(), hasher),
            drivers: Repository::new(store.clone(), hasher),
            vehicles: Repository::new(store.clone(), hasher),
            students: Repository::new(store.clone(), hasher),
            attendance: Repository::new(store, hasher).with_search_limit(search_limit),
        }
    }

    /// Viaje con ruta, conductor y vehículo resueltos
    pub async fn trip_detail(&self, trip_id: Uuid) -> AppResult<TripDetail> {
        let trip = self.trips.get_by_id(trip_id).await?;

        let route = self.routes.find_by_id(trip.route_id).await?;
        let driver = self.drivers.find_by_id(trip.driver_id).await?;
        let vehicle = self.vehicles.find_by_id(trip.vehicle_id).await?;

        match (route, driver, vehicle) {
            (Some(route), Some(driver), Some(vehicle)) => Ok(TripDetail {
                id: trip.id.to_string(),
                date: trip.date,
                status: trip.status,
                route,
                driver: driver.into(),
                vehicle,
                incidents: trip.incidents,
            }),
            _ => {
                warn!("⚠️ Viaje {} con referencias inexistentes, descartado", trip_id);
                Err(not_found_error("Trip", &trip_id.to_string()))
            }
        }
    }

    /// Alumnos con registro de asistencia en el viaje.
    ///
    /// Un alumno con varios registros aparece una vez por registro.
    pub async fn students_for_trip(&self, trip_id: Uuid) -> AppResult<Vec<Student>> {
        let records = self.attendance.by_trip(trip_id).await?;
        let students = self
            .students
            .find_by_ids(records.iter().map(|r| r.student_id))
            .await?;

        let joined: Vec<Student> = records
            .iter()
            .filter_map(|record| students.get(&record.student_id).cloned())
            .collect();

        let dropped = records.len() - joined.len();
        if dropped > 0 {
            warn!("⚠️ {} registros de asistencia sin alumno en el viaje {}", dropped, trip_id);
        }
        Ok(joined)
    }

    /// Viajes del periodo [start, end] proyectados a un resumen
    pub async fn trips_in_period(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<TripSummary>> {
        validate_period(start, end)?;

        let trips = self
            .trips
            .find_where(&date_range_filter(Some(start), Some(end)))
            .await?;
        debug!("📅 {} viajes entre {} y {}", trips.len(), start, end);

        let routes = self.routes.find_by_ids(trips.iter().map(|t| t.route_id)).await?;
        let drivers = self.drivers.find_by_ids(trips.iter().map(|t| t.driver_id)).await?;
        let vehicles = self.vehicles.find_by_ids(trips.iter().map(|t| t.vehicle_id)).await?;

        Ok(trips
            .into_iter()
            .filter_map(|trip| {
                let route = routes.get(&trip.route_id)?;
                let driver = drivers.get(&trip.driver_id)?;
                let vehicle = vehicles.get(&trip.vehicle_id)?;
                Some(TripSummary {
                    id: trip.id.to_string(),
                    date: trip.date,
                    status: trip.status,
                    route_name: route.name.clone(),
                    driver_name: driver.full_name.clone(),
                    vehicle_plate: vehicle.plate.clone(),
                    incident_count: trip.incidents.len(),
                })
            })
            .collect())
    }

    /// Totales de viajes por vehículo.
    ///
    /// Todo vehículo almacenado tiene fila; los viajes cuyo vehículo no
    /// existe no cuentan.
    pub async fn vehicle_usage_stats(&self) -> AppResult<Vec<VehicleUsage>> {
        let vehicles = self.vehicles.find_all_where(&Filter::All).await?;
        let trips = self.trips.find_all_where(&Filter::All).await?;

        let mut totals: HashMap<Uuid, (u64, u64, u64)> = HashMap::new();
        for trip in &trips {
            let entry = totals.entry(trip.vehicle_id).or_default();
            entry.0 += 1;
            match trip.status {
                TripStatus::Completed => entry.1 += 1,
                TripStatus::Cancelled => entry.2 += 1,
                TripStatus::Scheduled | TripStatus::InProgress => {}
            }
        }

        Ok(vehicles
            .into_iter()
            .map(|vehicle| {
                let (total, completed, cancelled) = totals.get(&vehicle.id).copied().unwrap_or_default();
                VehicleUsage {
                    vehicle_id: vehicle.id.to_string(),
                    plate: vehicle.plate,
                    model: vehicle.model,
                    total_trips: total,
                    completed_trips: completed,
                    cancelled_trips: cancelled,
                    completion_rate: completion_rate(completed, total),
                }
            })
            .collect())
    }
}

fn completion_rate(completed: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    }
}
