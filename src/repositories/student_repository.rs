use uuid::Uuid;

use crate::database::Filter;
use crate::models::student::StudentFilters;
use crate::models::Student;
use crate::repositories::{contains_filter, text_filter, Repository};
use crate::utils::errors::AppResult;

pub type StudentRepository = Repository<Student>;

impl Repository<Student> {
    /// Búsqueda por nombre y/o email (subcadena, sin mayúsculas)
    pub async fn search(&self, filters: &StudentFilters) -> AppResult<Vec<Student>> {
        let filter = Filter::all_of(
            [
                contains_filter("full_name", filters.name.as_deref()),
                contains_filter("email", filters.email.as_deref()),
            ]
            .into_iter()
            .flatten()
            .collect(),
        );
        self.find_where(&filter).await
    }

    /// Texto libre sobre nombre o email
    pub async fn text_search(&self, q: &str) -> AppResult<Vec<Student>> {
        self.find_where(&text_filter(&["full_name", "email"], q)?).await
    }

    /// Email exacto (login)
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Student>> {
        self.find_one(&Filter::eq("email", email)).await
    }

    pub async fn with_special_needs(&self) -> AppResult<Vec<Student>> {
        self.find_where(&Filter::NotEmpty("special_needs")).await
    }

    pub async fn by_boarding_point(&self, point_id: Uuid) -> AppResult<Vec<Student>> {
        self.find_where(&Filter::eq("preferred_boarding_point_id", point_id.to_string()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateStudentRequest;
    use crate::repositories::test_support::{memory_store, repository};
    use crate::utils::errors::AppError;

    fn student(name: &str, email: &str, special_needs: Option<&str>) -> CreateStudentRequest {
        CreateStudentRequest {
            full_name: name.to_string(),
            email: email.to_string(),
            password: "segredo123".to_string(),
            enrollment_code: "2024".to_string(),
            phone: None,
            special_needs: special_needs.map(str::to_string),
            preferred_boarding_point_id: None,
        }
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let store = memory_store();
        let repo = repository::<Student>(&store);
        repo.create(student("Ana Silva", "ana@escola.edu.br", None)).await.unwrap();
        repo.create(student("Bruno Costa", "bruno@escola.edu.br", None)).await.unwrap();
        repo.create(student("Carla SILVEIRA", "carla@outra.com", None)).await.unwrap();

        let by_name = repo
            .search(&StudentFilters { name: Some("silv".to_string()), email: None })
            .await
            .unwrap();
        assert_eq!(by_name.len(), 2);

        let both = repo
            .search(&StudentFilters {
                name: Some("silv".to_string()),
                email: Some("ESCOLA".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].full_name, "Ana Silva");

        let all = repo.search(&StudentFilters::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_text_search_and_special_needs() {
        let store = memory_store();
        let repo = repository::<Student>(&store);
        repo.create(student("Ana Silva", "ana@escola.edu.br", Some("cadeirante"))).await.unwrap();
        repo.create(student("Bruno Costa", "bruno@escola.edu.br", Some(""))).await.unwrap();

        assert_eq!(repo.text_search("BRUNO@").await.unwrap().len(), 1);
        assert_eq!(repo.text_search("escola").await.unwrap().len(), 2);

        let special = repo.with_special_needs().await.unwrap();
        assert_eq!(special.len(), 1);
        assert_eq!(special[0].full_name, "Ana Silva");
    }

    #[tokio::test]
    async fn test_blank_text_search_is_rejected() {
        let store = memory_store();
        let repo = repository::<Student>(&store);
        repo.create(student("Ana Silva", "ana@escola.edu.br", None)).await.unwrap();

        assert!(matches!(repo.text_search("   ").await, Err(AppError::Validation(_))));
        assert!(matches!(repo.text_search("").await, Err(AppError::Validation(_))));
        assert_eq!(repo.text_search("  ana  ").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact() {
        let store = memory_store();
        let repo = repository::<Student>(&store);
        repo.create(student("Ana Silva", "ana@escola.edu.br", None)).await.unwrap();

        assert!(repo.find_by_email("ana@escola.edu.br").await.unwrap().is_some());
        assert!(repo.find_by_email("ANA@escola.edu.br").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_by_boarding_point() {
        let store = memory_store();
        let repo = repository::<Student>(&store);
        let point = Uuid::new_v4();
        let mut request = student("Ana Silva", "ana@escola.edu.br", None);
        request.preferred_boarding_point_id = Some(point);
        repo.create(request).await.unwrap();
        repo.create(student("Bruno Costa", "bruno@escola.edu.br", None)).await.unwrap();

        let found = repo.by_boarding_point(point).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].preferred_boarding_point_id, Some(point));
    }
}
