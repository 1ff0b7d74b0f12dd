use crate::database::Filter;
use crate::models::vehicle::VehicleFilters;
use crate::models::{MaintenanceStatus, Vehicle};
use crate::repositories::{text_filter, Repository};
use crate::utils::errors::AppResult;

pub type VehicleRepository = Repository<Vehicle>;

impl Repository<Vehicle> {
    /// Búsqueda por estado, adaptación PCD y año (coincidencia exacta)
    pub async fn search(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let filter = Filter::all_of(
            [
                filters
                    .maintenance_status
                    .map(|status| Filter::eq("maintenance_status", status.as_str())),
                filters.adapted_pcd.map(|adapted| Filter::eq("adapted_pcd", adapted)),
                filters.manufacture_year.map(|year| Filter::eq("manufacture_year", year)),
            ]
            .into_iter()
            .flatten()
            .collect(),
        );
        self.find_where(&filter).await
    }

    pub async fn text_search(&self, q: &str) -> AppResult<Vec<Vehicle>> {
        self.find_where(&text_filter(&["plate", "model"], q)?).await
    }

    pub async fn available(&self) -> AppResult<Vec<Vehicle>> {
        self.find_where(&Filter::eq(
            "maintenance_status",
            MaintenanceStatus::Available.as_str(),
        ))
        .await
    }

    pub async fn adapted(&self) -> AppResult<Vec<Vehicle>> {
        self.find_where(&Filter::eq("adapted_pcd", true)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateVehicleRequest;
    use crate::repositories::test_support::{memory_store, repository};

    fn vehicle(plate: &str, status: MaintenanceStatus, adapted_pcd: bool, year: i32) -> CreateVehicleRequest {
        CreateVehicleRequest {
            plate: plate.to_string(),
            model: "Mercedes Sprinter".to_string(),
            passenger_capacity: 16,
            maintenance_status: status,
            adapted_pcd,
            manufacture_year: year,
        }
    }

    #[tokio::test]
    async fn test_search_combines_status_and_adaptation() {
        let store = memory_store();
        let repo = repository::<Vehicle>(&store);
        repo.create(vehicle("AAA1111", MaintenanceStatus::Available, true, 2020)).await.unwrap();
        repo.create(vehicle("BBB2222", MaintenanceStatus::Available, false, 2018)).await.unwrap();
        repo.create(vehicle("CCC3333", MaintenanceStatus::InMaintenance, true, 2020)).await.unwrap();

        let found = repo
            .search(&VehicleFilters {
                maintenance_status: Some(MaintenanceStatus::Available),
                adapted_pcd: Some(true),
                manufacture_year: None,
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].plate, "AAA1111");
    }

    #[tokio::test]
    async fn test_adapted_false_excludes_adapted_vehicles() {
        let store = memory_store();
        let repo = repository::<Vehicle>(&store);
        repo.create(vehicle("AAA1111", MaintenanceStatus::Available, true, 2020)).await.unwrap();
        repo.create(vehicle("BBB2222", MaintenanceStatus::Available, false, 2018)).await.unwrap();

        let found = repo
            .search(&VehicleFilters { adapted_pcd: Some(false), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(!found[0].adapted_pcd);
    }

    #[tokio::test]
    async fn test_year_filter_and_shortcuts() {
        let store = memory_store();
        let repo = repository::<Vehicle>(&store);
        repo.create(vehicle("AAA1111", MaintenanceStatus::Available, true, 2020)).await.unwrap();
        repo.create(vehicle("BBB2222", MaintenanceStatus::Inactive, false, 2018)).await.unwrap();

        let by_year = repo
            .search(&VehicleFilters { manufacture_year: Some(2018), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(by_year[0].plate, "BBB2222");

        assert_eq!(repo.available().await.unwrap().len(), 1);
        assert_eq!(repo.adapted().await.unwrap()[0].plate, "AAA1111");
        assert_eq!(repo.text_search("bbb").await.unwrap().len(), 1);
    }
}
