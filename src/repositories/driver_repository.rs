use crate::database::Filter;
use crate::models::driver::DriverFilters;
use crate::models::Driver;
use crate::repositories::{contains_filter, text_filter, Repository};
use crate::utils::errors::AppResult;

pub type DriverRepository = Repository<Driver>;

impl Repository<Driver> {
    pub async fn search(&self, filters: &DriverFilters) -> AppResult<Vec<Driver>> {
        let filter = Filter::all_of(
            [
                contains_filter("full_name", filters.name.as_deref()),
                filters.active.map(|active| Filter::eq("active", active)),
            ]
            .into_iter()
            .flatten()
            .collect(),
        );
        self.find_where(&filter).await
    }

    pub async fn text_search(&self, q: &str) -> AppResult<Vec<Driver>> {
        self.find_where(&text_filter(&["full_name", "email"], q)?).await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Driver>> {
        self.find_one(&Filter::eq("email", email)).await
    }

    /// Conductores activos o inactivos
    pub async fn by_active(&self, active: bool) -> AppResult<Vec<Driver>> {
        self.find_where(&Filter::eq("active", active)).await
    }
}
