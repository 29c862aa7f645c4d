use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::api::{JobBoardApi, VacancyListing};
use crate::dto::application_dto::{SubmitApplicationPayload, UpdateApplicationStatusPayload};
use crate::dto::auth_dto::{LoginPayload, LoginResponse, RegisterPayload};
use crate::dto::resume_dto::SaveResumePayload;
use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::models::help::HelpArticle;
use crate::models::resume::Resume;
use crate::models::user::User;
use crate::models::vacancy::Vacancy;

/// Reqwest-backed client for the PHP-style job board endpoints.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: String, client: Client) -> Self {
        Self { client, base_url }
    }

    pub fn from_config() -> Result<Self> {
        let config = crate::config::get_config();
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::new(config.api_url.clone(), client))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Turns a non-2xx response into `Error::Http`, pulling the server's
    /// `{"message": ...}` body when it has one.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(Error::Http {
            status,
            message: server_message(response).await,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| Error::Decode(e.to_string()))
    }
}

async fn server_message(response: Response) -> String {
    message_from_body(response.json::<JsonValue>().await.ok())
}

fn message_from_body(body: Option<JsonValue>) -> String {
    body.as_ref()
        .and_then(|b| b.get("message"))
        .and_then(|m| m.as_str())
        .unwrap_or("Request failed")
        .to_string()
}

/// The backend answers listing requests with a JSON array; anything else
/// (an error object, a bare string) means the data cannot be trusted.
fn interpret_listing(body: JsonValue) -> Result<VacancyListing> {
    if body.is_array() {
        let vacancies: Vec<Vacancy> =
            serde_json::from_value(body).map_err(|e| Error::Decode(e.to_string()))?;
        Ok(VacancyListing {
            vacancies,
            reliable: true,
        })
    } else {
        warn!("Vacancy listing body was not a collection, treating as empty");
        Ok(VacancyListing {
            vacancies: Vec::new(),
            reliable: false,
        })
    }
}

/// A JSON `null` body means the user has no resume yet.
fn interpret_resume(body: JsonValue) -> Result<Option<Resume>> {
    if body.is_null() {
        return Ok(None);
    }
    serde_json::from_value(body)
        .map(Some)
        .map_err(|e| Error::Decode(e.to_string()))
}

fn vacancy_lookup_error(status: StatusCode, id: i64) -> Option<Error> {
    (status == StatusCode::NOT_FOUND).then(|| Error::NotFound(format!("Vacancy {} not found", id)))
}

fn submission_error(status: StatusCode) -> Option<Error> {
    (status == StatusCode::CONFLICT).then_some(Error::DuplicateApplication)
}

#[async_trait]
impl JobBoardApi for HttpApi {
    async fn list_vacancies(&self) -> Result<VacancyListing> {
        let response = self.client.get(self.url("vacancies.php")).send().await?;
        let response = Self::check(response).await?;
        let body: JsonValue = Self::decode(response).await?;
        interpret_listing(body)
    }

    async fn get_vacancy(&self, id: i64) -> Result<Vacancy> {
        let response = self
            .client
            .get(self.url("vacancies.php"))
            .query(&[("id", id)])
            .send()
            .await?;
        if let Some(err) = vacancy_lookup_error(response.status(), id) {
            return Err(err);
        }
        let response = Self::check(response).await?;
        Self::decode(response).await
    }

    async fn create_vacancy(&self, payload: CreateVacancyPayload) -> Result<()> {
        let response = self
            .client
            .post(self.url("vacancies.php"))
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update_vacancy(&self, payload: UpdateVacancyPayload) -> Result<()> {
        let response = self
            .client
            .put(self.url("vacancies.php"))
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_vacancy(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url("vacancies.php"))
            .query(&[("id", id)])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_applications_for_employer(&self, employer_id: i64) -> Result<Vec<Application>> {
        let response = self
            .client
            .get(self.url("applications.php"))
            .query(&[("employer_id", employer_id)])
            .send()
            .await?;
        let response = Self::check(response).await?;
        Self::decode(response).await
    }

    async fn list_applications_for_seeker(&self, seeker_id: i64) -> Result<Vec<Application>> {
        let response = self
            .client
            .get(self.url("applications.php"))
            .query(&[("seeker_id", seeker_id)])
            .send()
            .await?;
        let response = Self::check(response).await?;
        Self::decode(response).await
    }

    async fn submit_application(&self, payload: SubmitApplicationPayload) -> Result<()> {
        let response = self
            .client
            .post(self.url("applications.php"))
            .json(&payload)
            .send()
            .await?;
        if let Some(err) = submission_error(response.status()) {
            return Err(err);
        }
        Self::check(response).await?;
        Ok(())
    }

    async fn update_application_status(
        &self,
        payload: UpdateApplicationStatusPayload,
    ) -> Result<()> {
        let response = self
            .client
            .patch(self.url("applications.php"))
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn get_resume(&self, user_id: i64) -> Result<Option<Resume>> {
        let response = self
            .client
            .get(self.url("resumes.php"))
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body: JsonValue = Self::decode(response).await?;
        interpret_resume(body)
    }

    async fn save_resume(&self, payload: SaveResumePayload) -> Result<()> {
        let response = self
            .client
            .post(self.url("resumes.php"))
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn login(&self, payload: LoginPayload) -> Result<User> {
        let response = self
            .client
            .post(self.url("auth.php"))
            .query(&[("action", "login")])
            .json(&payload)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body: LoginResponse = Self::decode(response).await?;
        Ok(body.user)
    }

    async fn register(&self, payload: RegisterPayload) -> Result<()> {
        let response = self
            .client
            .post(self.url("auth.php"))
            .query(&[("action", "register")])
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_help_articles(&self) -> Result<Vec<HelpArticle>> {
        let response = self.client.get(self.url("help.php")).send().await?;
        let response = Self::check(response).await?;
        Self::decode(response).await
    }
}
