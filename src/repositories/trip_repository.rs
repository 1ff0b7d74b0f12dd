use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::database::Filter;
use crate::models::trip::TripFilters;
use crate::models::{Attendance, Entity, Trip, TripStatus};
use crate::repositories::Repository;
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_optional_id;

pub type TripRepository = Repository<Trip>;

/// Filtro de rango de fechas inclusivo; cualquiera de los extremos es opcional
pub(crate) fn date_range_filter(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Filter {
    Filter::all_of(
        [
            start.map(|d| Filter::Gte("date", d.to_string().into())),
            end.map(|d| Filter::Lte("date", d.to_string().into())),
        ]
        .into_iter()
        .flatten()
        .collect(),
    )
}

impl Repository<Trip> {
    /// Búsqueda por estado, periodo y referencias.
    ///
    /// Los identificadores mal formados se rechazan con `InvalidIdentifier`.
    pub async fn search(&self, filters: &TripFilters) -> AppResult<Vec<Trip>> {
        let driver_id = parse_optional_id(filters.driver_id.as_deref())?;
        let route_id = parse_optional_id(filters.route_id.as_deref())?;
        let vehicle_id = parse_optional_id(filters.vehicle_id.as_deref())?;

        let filter = Filter::all_of(vec![
            filters
                .status
                .map(|s| Filter::eq("status", s.as_str()))
                .unwrap_or(Filter::All),
            date_range_filter(filters.start_date, filters.end_date),
            driver_id
                .map(|id| Filter::eq("driver_id", id.to_string()))
                .unwrap_or(Filter::All),
            route_id
                .map(|id| Filter::eq("route_id", id.to_string()))
                .unwrap_or(Filter::All),
            vehicle_id
                .map(|id| Filter::eq("vehicle_id", id.to_string()))
                .unwrap_or(Filter::All),
        ]);
        self.find_where(&filter).await
    }

    pub async fn on_date(&self, date: NaiveDate) -> AppResult<Vec<Trip>> {
        self.find_where(&Filter::eq("date", date.to_string())).await
    }

    /// Viajes con fecha de hoy (UTC)
    pub async fn today(&self) -> AppResult<Vec<Trip>> {
        self.on_date(Utc::now().date_naive()).await
    }

    pub async fn by_status(&self, status: TripStatus) -> AppResult<Vec<Trip>> {
        self.find_where(&Filter::eq("status", status.as_str())).await
    }

    pub async fn by_driver(&self, driver_id: Uuid) -> AppResult<Vec<Trip>> {
        self.find_where(&Filter::eq("driver_id", driver_id.to_string())).await
    }

    pub async fn by_route(&self, route_id: Uuid) -> AppResult<Vec<Trip>> {
        self.find_where(&Filter::eq("route_id", route_id.to_string())).await
    }

    /// Viajes de un alumno a través de sus registros de asistencia.
    ///
    /// Orden de los registros, un viaje por cada id; los registros cuyo
    /// viaje ya no existe se descartan.
    pub async fn for_student(&self, student_id: Uuid) -> AppResult<Vec<Trip>> {
        let records = self
            .store()
            .find(
                Attendance::COLLECTION,
                &Filter::eq("student_id", student_id.to_string()),
                0,
                Some(self.search_limit()),
            )
            .await?;

        let mut seen = HashSet::new();
        let mut trip_ids = Vec::new();
        for doc in records {
            let record: Attendance = serde_json::from_value(doc)?;
            if seen.insert(record.trip_id) {
                trip_ids.push(record.trip_id);
            }
        }
        if trip_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_id = self.find_by_ids(trip_ids.iter().copied()).await?;

        Ok(trip_ids.into_iter().filter_map(|id| by_id.remove(&id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateAttendanceRequest, CreateTripRequest, RecordType};
    use crate::repositories::test_support::{memory_store, repository};
    use crate::utils::errors::AppError;

    fn trip(date: &str, status: TripStatus, driver_id: Uuid) -> CreateTripRequest {
        CreateTripRequest {
            date: date.parse().unwrap(),
            status,
            route_id: Uuid::new_v4(),
            driver_id,
            vehicle_id: Uuid::new_v4(),
            incidents: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_search_by_period_is_inclusive() {
        let store = memory_store();
        let repo = repository::<Trip>(&store);
        let driver = Uuid::new_v4();
        for date in ["2024-03-01", "2024-03-10", "2024-03-20", "2024-04-01"] {
            repo.create(trip(date, TripStatus::Completed, driver)).await.unwrap();
        }

        let march = repo
            .search(&TripFilters {
                start_date: "2024-03-01".parse().ok(),
                end_date: "2024-03-20".parse().ok(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(march.len(), 3);

        let open_start = repo
            .search(&TripFilters { end_date: "2024-03-10".parse().ok(), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(open_start.len(), 2);
    }

    #[tokio::test]
    async fn test_search_by_status_and_driver() {
        let store = memory_store();
        let repo = repository::<Trip>(&store);
        let driver = Uuid::new_v4();
        repo.create(trip("2024-03-01", TripStatus::Completed, driver)).await.unwrap();
        repo.create(trip("2024-03-02", TripStatus::Cancelled, driver)).await.unwrap();
        repo.create(trip("2024-03-03", TripStatus::Completed, Uuid::new_v4())).await.unwrap();

        let found = repo
            .search(&TripFilters {
                status: Some(TripStatus::Completed),
                driver_id: Some(driver.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].date.to_string(), "2024-03-01");

        assert_eq!(repo.by_driver(driver).await.unwrap().len(), 2);
        assert_eq!(repo.by_status(TripStatus::Cancelled).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_rejects_malformed_reference() {
        let store = memory_store();
        let repo = repository::<Trip>(&store);
        let result = repo
            .search(&TripFilters { route_id: Some("xyz".to_string()), ..Default::default() })
            .await;
        assert!(matches!(result, Err(AppError::InvalidIdentifier(_))));
    }

    #[tokio::test]
    async fn test_today() {
        let store = memory_store();
        let repo = repository::<Trip>(&store);
        let today = Utc::now().date_naive().to_string();
        repo.create(trip(&today, TripStatus::Scheduled, Uuid::new_v4())).await.unwrap();
        repo.create(trip("2001-01-01", TripStatus::Completed, Uuid::new_v4())).await.unwrap();

        assert_eq!(repo.today().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_for_student_dedups_and_keeps_attendance_order() {
        let store = memory_store();
        let trips = repository::<Trip>(&store);
        let attendance = repository::<Attendance>(&store);
        let student = Uuid::new_v4();

        let first = trips.create(trip("2024-03-01", TripStatus::Completed, Uuid::new_v4())).await.unwrap();
        let second = trips.create(trip("2024-03-02", TripStatus::Completed, Uuid::new_v4())).await.unwrap();

        let record = |trip_id: Uuid, record_type: RecordType| CreateAttendanceRequest {
            student_id: student,
            trip_id,
            timestamp: None,
            record_type,
        };
        attendance.create(record(second.id, RecordType::Boarding)).await.unwrap();
        attendance.create(record(second.id, RecordType::Alighting)).await.unwrap();
        attendance.create(record(first.id, RecordType::Boarding)).await.unwrap();
        attendance.create(record(Uuid::new_v4(), RecordType::Boarding)).await.unwrap();

        let ids: Vec<_> = trips
            .for_student(student)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);

        assert!(trips.for_student(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
