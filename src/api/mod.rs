mod client;

pub use client::HttpApi;

use async_trait::async_trait;

use crate::dto::application_dto::{SubmitApplicationPayload, UpdateApplicationStatusPayload};
use crate::dto::auth_dto::{LoginPayload, RegisterPayload};
use crate::dto::resume_dto::SaveResumePayload;
use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use crate::error::Result;
use crate::models::application::Application;
use crate::models::help::HelpArticle;
use crate::models::resume::Resume;
use crate::models::user::User;
use crate::models::vacancy::Vacancy;

/// Result of a vacancy list fetch. `reliable` is false when the server
/// answered 2xx but the body was not a collection; callers treat that as a
/// degraded connection rather than an error.
#[derive(Debug, Clone, Default)]
pub struct VacancyListing {
    pub vacancies: Vec<Vacancy>,
    pub reliable: bool,
}

/// Every call issues exactly one outbound request: no retries, no caching.
/// Failures come back as the typed taxonomy in `crate::error`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobBoardApi: Send + Sync {
    async fn list_vacancies(&self) -> Result<VacancyListing>;
    async fn get_vacancy(&self, id: i64) -> Result<Vacancy>;
    async fn create_vacancy(&self, payload: CreateVacancyPayload) -> Result<()>;
    async fn update_vacancy(&self, payload: UpdateVacancyPayload) -> Result<()>;
    async fn delete_vacancy(&self, id: i64) -> Result<()>;

    async fn list_applications_for_employer(&self, employer_id: i64) -> Result<Vec<Application>>;
    async fn list_applications_for_seeker(&self, seeker_id: i64) -> Result<Vec<Application>>;
    /// A server-side conflict (pre-existing application for the same pair)
    /// comes back as `Error::DuplicateApplication`.
    async fn submit_application(&self, payload: SubmitApplicationPayload) -> Result<()>;
    async fn update_application_status(&self, payload: UpdateApplicationStatusPayload)
        -> Result<()>;

    /// `None` means the seeker has no resume yet.
    async fn get_resume(&self, user_id: i64) -> Result<Option<Resume>>;
    async fn save_resume(&self, payload: SaveResumePayload) -> Result<()>;

    async fn login(&self, payload: LoginPayload) -> Result<User>;
    async fn register(&self, payload: RegisterPayload) -> Result<()>;

    async fn list_help_articles(&self) -> Result<Vec<HelpArticle>>;
}
