//! Modelo de Route
//!
//! Una ruta agrupa al menos dos puntos de parada embebidos, ordenados por
//! su campo `order`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::Collection;
use crate::models::{default_true, patch_fields, Entity};
use crate::services::password::PasswordHasher;
use crate::utils::errors::AppResult;

/// Punto de parada embebido en la ruta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StopPoint {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 200))]
    pub address: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(range(min = 1))]
    pub order: i32,
}

/// Route principal - documento de la colección routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub shift: String,
    pub active: bool,
    pub stops: Vec<StopPoint>,
}

/// Request para crear una nueva ruta
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 500))]
    pub description: String,

    #[validate(length(min = 1, max = 20))]
    pub shift: String,

    #[serde(default = "default_true")]
    pub active: bool,

    #[validate(length(min = 2), nested)]
    pub stops: Vec<StopPoint>,
}

/// Request para actualizar una ruta existente
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRouteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20))]
    pub shift: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2), nested)]
    pub stops: Option<Vec<StopPoint>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteFilters {
    pub name: Option<String>,
    pub description: Option<String>,
    pub shift: Option<String>,
    pub active: Option<bool>,
}

fn ordered(mut stops: Vec<StopPoint>) -> Vec<StopPoint> {
    stops.sort_by_key(|stop| stop.order);
    stops
}

impl Entity for Route {
    const COLLECTION: Collection = Collection::Routes;
    const LABEL: &'static str = "Route";

    type Create = CreateRouteRequest;
    type Update = UpdateRouteRequest;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_create(id: Uuid, input: CreateRouteRequest, _hasher: &PasswordHasher) -> AppResult<Self> {
        Ok(Self {
            id,
            name: input.name,
            description: input.description,
            shift: input.shift,
            active: input.active,
            stops: ordered(input.stops),
        })
    }

    fn patch(update: &UpdateRouteRequest, _hasher: &PasswordHasher) -> AppResult<Map<String, Value>> {
        let mut fields = patch_fields(update)?;
        if let Some(stops) = &update.stops {
            fields.insert("stops".to_string(), serde_json::to_value(ordered(stops.clone()))?);
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(name: &str, order: i32) -> StopPoint {
        StopPoint {
            name: name.to_string(),
            address: format!("Rua {}, 100", name),
            latitude: -23.55,
            longitude: -46.63,
            order,
        }
    }

    fn request(stops: Vec<StopPoint>) -> CreateRouteRequest {
        CreateRouteRequest {
            name: "Rota Centro".to_string(),
            description: "Escola central via avenida principal".to_string(),
            shift: "morning".to_string(),
            active: true,
            stops,
        }
    }

    #[test]
    fn test_route_needs_two_stops() {
        assert!(request(vec![stop("A", 1)]).validate().is_err());
        assert!(request(vec![stop("A", 1), stop("B", 2)]).validate().is_ok());
    }

    #[test]
    fn test_nested_stop_validation() {
        let mut bad = stop("B", 2);
        bad.latitude = 91.0;
        assert!(request(vec![stop("A", 1), bad.clone()]).validate().is_err());

        let update = UpdateRouteRequest { stops: Some(vec![stop("A", 1), bad]), ..Default::default() };
        assert!(update.validate().is_err());

        assert!(request(vec![stop("A", 1), stop("C", 0)]).validate().is_err());
    }

    #[test]
    fn test_stops_sorted_by_order_on_create() {
        let route = Route::from_create(
            Uuid::new_v4(),
            request(vec![stop("B", 2), stop("A", 1)]),
            &PasswordHasher::new(4),
        )
        .unwrap();
        let names: Vec<_> = route.stops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_stops_sorted_by_order_on_update() {
        let update = UpdateRouteRequest {
            stops: Some(vec![stop("C", 3), stop("A", 1), stop("B", 2)]),
            ..Default::default()
        };
        let fields = Route::patch(&update, &PasswordHasher::new(4)).unwrap();
        let names: Vec<_> = fields["stops"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let untouched = Route::patch(&UpdateRouteRequest::default(), &PasswordHasher::new(4)).unwrap();
        assert!(!untouched.contains_key("stops"));
    }
}
