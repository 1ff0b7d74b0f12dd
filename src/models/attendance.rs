//! Modelo de Attendance (embarque / desembarque)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::database::Collection;
use crate::models::Entity;
use crate::services::password::PasswordHasher;
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Boarding,
    Alighting,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Boarding => "boarding",
            RecordType::Alighting => "alighting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Uuid,
    pub student_id: Uuid,
    pub trip_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub record_type: RecordType,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAttendanceRequest {
    pub student_id: Uuid,
    pub trip_id: Uuid,
    /// Si no se indica se usa el instante actual
    pub timestamp: Option<DateTime<Utc>>,
    pub record_type: RecordType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAttendanceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceFilters {
    pub student_id: Option<String>,
    pub trip_id: Option<String>,
    pub record_type: Option<RecordType>,
}

impl Entity for Attendance {
    const COLLECTION: Collection = Collection::Attendance;
    const LABEL: &'static str = "Attendance";

    type Create = CreateAttendanceRequest;
    type Update = UpdateAttendanceRequest;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_create(id: Uuid, input: CreateAttendanceRequest, _hasher: &PasswordHasher) -> AppResult<Self> {
        Ok(Self {
            id,
            student_id: input.student_id,
            trip_id: input.trip_id,
            timestamp: input.timestamp.unwrap_or_else(Utc::now),
            record_type: input.record_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timestamp_defaults_to_now() {
        let request: CreateAttendanceRequest = serde_json::from_value(json!({
            "student_id": Uuid::new_v4(),
            "trip_id": Uuid::new_v4(),
            "record_type": "boarding"
        }))
        .unwrap();
        let before = Utc::now();
        let record = Attendance::from_create(Uuid::new_v4(), request, &PasswordHasher::new(4)).unwrap();
        assert!(record.timestamp >= before);
        assert_eq!(record.record_type, RecordType::Boarding);
    }

    #[test]
    fn test_record_type_serde_matches_as_str() {
        for kind in [RecordType::Boarding, RecordType::Alighting] {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }
}
