use std::sync::Arc;

use tracing::info;

use crate::api::JobBoardApi;
use crate::dto::application_dto::{SubmitApplicationPayload, UpdateApplicationStatusPayload};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::user::{Role, User};
use crate::models::vacancy::Vacancy;

/// Holds the most recently fetched application collection and drives the
/// pending -> accepted/rejected lifecycle against the server.
pub struct ApplicationService {
    api: Arc<dyn JobBoardApi>,
    applications: Vec<Application>,
}

impl ApplicationService {
    pub fn new(api: Arc<dyn JobBoardApi>) -> Self {
        Self {
            api,
            applications: Vec::new(),
        }
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn find(&self, id: i64) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    /// Sends the application for the acting seeker. A server conflict for
    /// the same (vacancy, seeker) pair surfaces as `DuplicateApplication`.
    pub async fn submit(&self, vacancy_id: i64, actor: &User) -> Result<()> {
        match actor.role {
            Role::Seeker => {}
            Role::Employer => {
                return Err(Error::Forbidden(
                    "Employers cannot apply to vacancies".to_string(),
                ))
            }
        }
        let payload = SubmitApplicationPayload {
            vacancy_id,
            seeker_id: actor.id,
        };
        self.api.submit_application(payload).await?;
        info!(vacancy_id, seeker_id = actor.id, "Application submitted");
        Ok(())
    }

    pub async fn refresh_for_employer(&mut self, employer_id: i64) -> Result<()> {
        self.applications = self.api.list_applications_for_employer(employer_id).await?;
        Ok(())
    }

    pub async fn refresh_for_seeker(&mut self, seeker_id: i64) -> Result<()> {
        self.applications = self.api.list_applications_for_seeker(seeker_id).await?;
        Ok(())
    }

    /// Moves one application out of `pending`. All gates run before the
    /// request goes out, and the local entry is rewritten only once the
    /// server has acknowledged the change; on failure the collection is
    /// untouched.
    pub async fn transition(
        &mut self,
        application_id: i64,
        target: ApplicationStatus,
        actor: &User,
        parent: &Vacancy,
    ) -> Result<()> {
        let current = self
            .find(application_id)
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", application_id)))?;
        let from = current.status;

        if current.vacancy_id != parent.id {
            return Err(Error::NotFound(format!(
                "Application {} does not belong to vacancy {}",
                application_id, parent.id
            )));
        }
        match actor.role {
            Role::Employer => {}
            Role::Seeker => {
                return Err(Error::Forbidden(
                    "Only the employer can decide on an application".to_string(),
                ))
            }
        }
        if parent.employer_id != actor.id {
            return Err(Error::Forbidden(
                "This application targets another employer's vacancy".to_string(),
            ));
        }
        if !target.is_terminal() || from.is_terminal() {
            return Err(Error::InvalidTransition { from, to: target });
        }

        self.api
            .update_application_status(UpdateApplicationStatusPayload {
                id: application_id,
                status: target,
            })
            .await?;

        if let Some(entry) = self.applications.iter_mut().find(|a| a.id == application_id) {
            entry.status = target;
        }
        info!(application_id, status = %target, "Application status updated");
        Ok(())
    }
}
