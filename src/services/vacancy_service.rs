use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::api::JobBoardApi;
use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use crate::error::{Error, Result};
use crate::models::user::{Role, User};
use crate::models::vacancy::Vacancy;

/// Owns the in-memory vacancy collection and the connection flags the rest
/// of the client observes.
pub struct VacancyService {
    api: Arc<dyn JobBoardApi>,
    vacancies: Vec<Vacancy>,
    connected: bool,
    loading: bool,
}

impl VacancyService {
    pub fn new(api: Arc<dyn JobBoardApi>) -> Self {
        Self {
            api,
            vacancies: Vec::new(),
            connected: false,
            loading: false,
        }
    }

    pub fn vacancies(&self) -> &[Vacancy] {
        &self.vacancies
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn find(&self, id: i64) -> Option<&Vacancy> {
        self.vacancies.iter().find(|v| v.id == id)
    }

    pub fn owned_by(&self, employer_id: i64) -> Vec<Vacancy> {
        self.vacancies
            .iter()
            .filter(|v| v.employer_id == employer_id)
            .cloned()
            .collect()
    }

    /// Replaces the collection wholesale. Fetch failures are absorbed here:
    /// callers only ever observe an empty collection and a dropped
    /// `connected` flag, never an error.
    pub async fn refresh(&mut self) {
        self.loading = true;
        let outcome = self.api.list_vacancies().await;
        self.loading = false;
        match outcome {
            Ok(listing) => {
                self.connected = listing.reliable;
                self.vacancies = listing.vacancies;
                info!(count = self.vacancies.len(), "Vacancy collection refreshed");
            }
            Err(e) => {
                warn!(error = %e, "Vacancy refresh failed");
                self.connected = false;
                self.vacancies.clear();
            }
        }
    }

    pub async fn get(&self, id: i64) -> Result<Vacancy> {
        self.api.get_vacancy(id).await
    }

    pub async fn create(&self, payload: CreateVacancyPayload, actor: &User) -> Result<()> {
        require_employer(actor)?;
        if payload.employer_id != actor.id {
            return Err(Error::Forbidden(
                "A vacancy can only be published under your own account".to_string(),
            ));
        }
        payload.validate()?;
        self.api.create_vacancy(payload).await
    }

    pub async fn update(&self, payload: UpdateVacancyPayload, actor: &User) -> Result<()> {
        let current = match self.find(payload.id) {
            Some(v) => v.clone(),
            None => self.api.get_vacancy(payload.id).await?,
        };
        require_owner(actor, &current)?;
        payload.validate()?;
        self.api.update_vacancy(payload).await
    }

    /// The ownership gate runs before any request is issued. The refetch is
    /// sequenced strictly after the delete resolves, success or not.
    pub async fn delete(&mut self, id: i64, actor: &User) -> Result<()> {
        {
            let vacancy = self
                .find(id)
                .ok_or_else(|| Error::NotFound(format!("Vacancy {} not found", id)))?;
            require_owner(actor, vacancy)?;
        }
        let outcome = self.api.delete_vacancy(id).await;
        self.refresh().await;
        outcome
    }
}

fn require_employer(actor: &User) -> Result<()> {
    match actor.role {
        Role::Employer => Ok(()),
        Role::Seeker => Err(Error::Forbidden(
            "Only employers can manage vacancies".to_string(),
        )),
    }
}

fn require_owner(actor: &User, vacancy: &Vacancy) -> Result<()> {
    require_employer(actor)?;
    if vacancy.employer_id != actor.id {
        return Err(Error::Forbidden(format!(
            "Vacancy {} belongs to another employer",
            vacancy.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockJobBoardApi, VacancyListing};

    fn employer(id: i64) -> User {
        User {
            id,
            name: format!("Employer {}", id),
            email: format!("employer{}@example.com", id),
            role: Role::Employer,
            avatar: None,
        }
    }

    fn vacancy(id: i64, employer_id: i64) -> Vacancy {
        Vacancy {
            id,
            employer_id,
            title: "Backend Dev".to_string(),
            salary: "120 000 руб".to_string(),
            description: "Rust, PostgreSQL".to_string(),
            image: None,
            employer_name: None,
            created_at: None,
        }
    }

    fn service_with_listing(vacancies: Vec<Vacancy>) -> VacancyService {
        let mut api = MockJobBoardApi::new();
        api.expect_list_vacancies().returning(move || {
            Ok(VacancyListing {
                vacancies: vacancies.clone(),
                reliable: true,
            })
        });
        VacancyService::new(Arc::new(api))
    }

    #[tokio::test]
    async fn refresh_populates_collection_and_connected_flag() {
        let mut service = service_with_listing(vec![vacancy(1, 10), vacancy(2, 11)]);
        assert!(!service.is_connected());
        service.refresh().await;
        assert!(service.is_connected());
        assert_eq!(service.vacancies().len(), 2);
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn refresh_failure_is_absorbed_as_disconnected() {
        let mut api = MockJobBoardApi::new();
        api.expect_list_vacancies()
            .returning(|| Err(Error::NetworkUnreachable("refused".to_string())));
        let mut service = VacancyService::new(Arc::new(api));
        service.refresh().await;
        assert!(!service.is_connected());
        assert!(service.vacancies().is_empty());
    }

    #[tokio::test]
    async fn unreliable_listing_degrades_to_empty_and_disconnected() {
        let mut api = MockJobBoardApi::new();
        api.expect_list_vacancies().returning(|| {
            Ok(VacancyListing {
                vacancies: Vec::new(),
                reliable: false,
            })
        });
        let mut service = VacancyService::new(Arc::new(api));
        service.refresh().await;
        assert!(!service.is_connected());
        assert!(service.vacancies().is_empty());
    }

    #[tokio::test]
    async fn delete_by_non_owner_never_reaches_the_server() {
        let mut api = MockJobBoardApi::new();
        api.expect_list_vacancies().returning(|| {
            Ok(VacancyListing {
                vacancies: vec![Vacancy {
                    id: 1,
                    employer_id: 10,
                    title: "x".to_string(),
                    salary: String::new(),
                    description: String::new(),
                    image: None,
                    employer_name: None,
                    created_at: None,
                }],
                reliable: true,
            })
        });
        api.expect_delete_vacancy().times(0);
        let mut service = VacancyService::new(Arc::new(api));
        service.refresh().await;

        let intruder = employer(99);
        let err = service.delete(1, &intruder).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        assert_eq!(service.vacancies().len(), 1);
    }

    #[tokio::test]
    async fn delete_by_owner_refetches_after_the_delete_resolves() {
        let mut api = MockJobBoardApi::new();
        let mut first = true;
        api.expect_list_vacancies().times(2).returning(move || {
            let vacancies = if first {
                first = false;
                vec![vacancy(1, 10)]
            } else {
                Vec::new()
            };
            Ok(VacancyListing {
                vacancies,
                reliable: true,
            })
        });
        api.expect_delete_vacancy()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(()));
        let mut service = VacancyService::new(Arc::new(api));
        service.refresh().await;

        service.delete(1, &employer(10)).await.expect("delete");
        assert!(service.vacancies().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_publishing_under_someone_elses_id() {
        let mut api = MockJobBoardApi::new();
        api.expect_create_vacancy().times(0);
        let service = VacancyService::new(Arc::new(api));

        let payload = CreateVacancyPayload {
            employer_id: 42,
            title: "Title".to_string(),
            salary: "100".to_string(),
            description: "Desc".to_string(),
            image: None,
        };
        let err = service.create(payload, &employer(10)).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn create_requires_a_title() {
        let mut api = MockJobBoardApi::new();
        api.expect_create_vacancy().times(0);
        let service = VacancyService::new(Arc::new(api));

        let payload = CreateVacancyPayload {
            employer_id: 10,
            title: String::new(),
            salary: "100".to_string(),
            description: "Desc".to_string(),
            image: None,
        };
        let err = service.create(payload, &employer(10)).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
