use uuid::Uuid;

use crate::database::Filter;
use crate::models::attendance::AttendanceFilters;
use crate::models::Attendance;
use crate::repositories::Repository;
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_optional_id;

pub type AttendanceRepository = Repository<Attendance>;

impl Repository<Attendance> {
    pub async fn search(&self, filters: &AttendanceFilters) -> AppResult<Vec<Attendance>> {
        let student_id = parse_optional_id(filters.student_id.as_deref())?;
        let trip_id = parse_optional_id(filters.trip_id.as_deref())?;

        let filter = Filter::all_of(
            [
                student_id.map(|id| Filter::eq("student_id", id.to_string())),
                trip_id.map(|id| Filter::eq("trip_id", id.to_string())),
                filters.record_type.map(|kind| Filter::eq("record_type", kind.as_str())),
            ]
            .into_iter()
            .flatten()
            .collect(),
        );
        self.find_where(&filter).await
    }

    /// Registros de un viaje en orden de almacenamiento
    pub async fn by_trip(&self, trip_id: Uuid) -> AppResult<Vec<Attendance>> {
        self.find_where(&Filter::eq("trip_id", trip_id.to_string())).await
    }
}
