use crate::database::Filter;
use crate::models::route::RouteFilters;
use crate::models::Route;
use crate::repositories::{contains_filter, text_filter, Repository};
use crate::utils::errors::AppResult;

pub type RouteRepository = Repository<Route>;

impl Repository<Route> {
    pub async fn search(&self, filters: &RouteFilters) -> AppResult<Vec<Route>> {
        let filter = Filter::all_of(
            [
                contains_filter("name", filters.name.as_deref()),
                contains_filter("description", filters.description.as_deref()),
                contains_filter("shift", filters.shift.as_deref()),
                filters.active.map(|active| Filter::eq("active", active)),
            ]
            .into_iter()
            .flatten()
            .collect(),
        );
        self.find_where(&filter).await
    }

    pub async fn text_search(&self, q: &str) -> AppResult<Vec<Route>> {
        self.find_where(&text_filter(&["name", "description"], q)?).await
    }

    pub async fn active(&self) -> AppResult<Vec<Route>> {
        self.find_where(&Filter::eq("active", true)).await
    }

    /// Turno exacto (p. ej. "morning")
    pub async fn by_shift(&self, shift: &str) -> AppResult<Vec<Route>> {
        self.find_where(&Filter::eq("shift", shift)).await
    }

    /// Rutas ordenadas por número de paradas, de mayor a menor
    pub async fn by_stop_count(&self) -> AppResult<Vec<Route>> {
        let mut routes = self.find_where(&Filter::All).await?;
        routes.sort_by(|a, b| b.stops.len().cmp(&a.stops.len()));
        Ok(routes)
    }
}
