//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Todos los repositorios comparten el mismo
//! almacén de documentos.

use crate::config::environment::EnvironmentConfig;
use crate::database::SharedStore;
use crate::repositories::{
    AttendanceRepository, DriverRepository, Repository, RouteRepository, StudentRepository,
    TripRepository, VehicleRepository,
};
use crate::services::{AuthService, PasswordHasher, ReportService};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: EnvironmentConfig,
    pub students: StudentRepository,
    pub drivers: DriverRepository,
    pub vehicles: VehicleRepository,
    pub routes: RouteRepository,
    pub trips: TripRepository,
    pub attendance: AttendanceRepository,
    pub reports: ReportService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(store: SharedStore, config: EnvironmentConfig) -> Self {
        let hasher = PasswordHasher::new(config.bcrypt_cost);
        let limit = config.search_limit;

        let students: StudentRepository = Repository::new(store.clone(), hasher).with_search_limit(limit);
        let drivers: DriverRepository = Repository::new(store.clone(), hasher).with_search_limit(limit);

        Self {
            vehicles: Repository::new(store.clone(), hasher).with_search_limit(limit),
            routes: Repository::new(store.clone(), hasher).with_search_limit(limit),
            trips: Repository::new(store.clone(), hasher).with_search_limit(limit),
            attendance: Repository::new(store.clone(), hasher).with_search_limit(limit),
            reports: ReportService::new(store.clone(), limit),
            auth: AuthService::new(students.clone(), drivers.clone(), hasher, JwtConfig::from(&config)),
            students,
            drivers,
            store,
            config,
        }
    }
}
