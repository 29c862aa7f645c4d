use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::api::JobBoardApi;
use crate::dto::auth_dto::{LoginPayload, RegisterPayload};
use crate::dto::resume_dto::SaveResumePayload;
use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::help::HelpArticle;
use crate::models::resume::Resume;
use crate::models::user::{Role, User};
use crate::models::vacancy::Vacancy;
use crate::services::application_service::ApplicationService;
use crate::services::nav_service::{Navigator, View};
use crate::services::session_service::SessionStore;
use crate::services::vacancy_service::VacancyService;

/// What the active view would display given current state.
#[derive(Debug, Clone)]
pub enum ViewModel {
    Home {
        vacancies: Vec<Vacancy>,
        connected: bool,
        loading: bool,
    },
    Login,
    Register,
    MyVacancies {
        vacancies: Vec<Vacancy>,
    },
    VacancyDetails {
        vacancy_id: i64,
    },
    EditVacancy {
        vacancy_id: i64,
    },
    CreateVacancy,
    Applications {
        applications: Vec<Application>,
    },
    Resume {
        user_id: i64,
    },
    SeekerApplications {
        applications: Vec<Application>,
    },
    Help,
}

/// Top-level controller: session, navigation, and the remote collections,
/// with every mutation funneled through one entry point.
pub struct App {
    api: Arc<dyn JobBoardApi>,
    store: SessionStore,
    session: Option<User>,
    pub vacancies: VacancyService,
    pub applications: ApplicationService,
    pub nav: Navigator,
}

impl App {
    pub fn new(api: Arc<dyn JobBoardApi>, store: SessionStore) -> Self {
        Self {
            vacancies: VacancyService::new(api.clone()),
            applications: ApplicationService::new(api.clone()),
            nav: Navigator::default(),
            session: None,
            store,
            api,
        }
    }

    pub fn session(&self) -> Option<&User> {
        self.session.as_ref()
    }

    fn current_user(&self) -> Result<User> {
        self.session
            .clone()
            .ok_or_else(|| Error::Forbidden("Sign in first".to_string()))
    }

    /// Startup sequence: restore any persisted session, then fetch the
    /// vacancy collection regardless of whether anyone is logged in.
    pub async fn startup(&mut self) {
        self.session = self.store.restore();
        if let Some(user) = &self.session {
            info!(user = %user.email, "Session restored");
        }
        self.vacancies.refresh().await;
    }

    pub async fn login(&mut self, payload: LoginPayload) -> Result<()> {
        payload.validate()?;
        let user = self.api.login(payload).await?;
        self.store.save(&user)?;
        info!(user = %user.email, "Logged in");
        self.session = Some(user);
        self.nav.navigate(View::Home, None);
        self.vacancies.refresh().await;
        Ok(())
    }

    /// Registration does not log in; the user signs in afterwards.
    pub async fn register(&mut self, payload: RegisterPayload) -> Result<()> {
        payload.validate()?;
        self.api.register(payload).await?;
        self.nav.navigate(View::Login, None);
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear the stored session");
        }
        self.session = None;
        self.nav.clear_selection();
        self.nav.navigate(View::Login, None);
    }

    pub fn open_vacancy(&mut self, id: i64) {
        self.nav.navigate(View::VacancyDetails, Some(id));
    }

    pub fn edit_vacancy(&mut self, id: i64) {
        self.nav.navigate(View::EditVacancy, Some(id));
    }

    pub async fn create_vacancy(&mut self, payload: CreateVacancyPayload) -> Result<()> {
        let actor = self.current_user()?;
        self.vacancies.create(payload, &actor).await?;
        self.nav.navigate(View::MyVacancies, None);
        self.vacancies.refresh().await;
        Ok(())
    }

    pub async fn update_vacancy(&mut self, payload: UpdateVacancyPayload) -> Result<()> {
        let actor = self.current_user()?;
        self.vacancies.update(payload, &actor).await?;
        self.nav.navigate(View::MyVacancies, None);
        self.vacancies.refresh().await;
        Ok(())
    }

    /// `confirmed` is the user's answer to the single confirmation prompt;
    /// without it no request is issued.
    pub async fn delete_vacancy(&mut self, id: i64, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Ok(());
        }
        let actor = self.current_user()?;
        self.vacancies.delete(id, &actor).await
    }

    pub async fn apply_to_vacancy(&mut self, vacancy_id: i64) -> Result<()> {
        let actor = self.current_user()?;
        self.applications.submit(vacancy_id, &actor).await
    }

    /// Refreshes the application collection scoped to the acting role.
    pub async fn load_applications(&mut self) -> Result<()> {
        let actor = self.current_user()?;
        match actor.role {
            Role::Employer => self.applications.refresh_for_employer(actor.id).await,
            Role::Seeker => self.applications.refresh_for_seeker(actor.id).await,
        }
    }

    pub async fn decide_application(
        &mut self,
        application_id: i64,
        target: ApplicationStatus,
    ) -> Result<()> {
        let actor = self.current_user()?;
        let vacancy_id = self
            .applications
            .find(application_id)
            .map(|a| a.vacancy_id)
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", application_id)))?;
        let parent = match self.vacancies.find(vacancy_id) {
            Some(v) => v.clone(),
            None => self.vacancies.get(vacancy_id).await?,
        };
        self.applications
            .transition(application_id, target, &actor, &parent)
            .await
    }

    pub async fn my_resume(&self) -> Result<Option<Resume>> {
        let actor = self.current_user()?;
        require_seeker(&actor)?;
        self.api.get_resume(actor.id).await
    }

    pub async fn save_resume(&self, payload: SaveResumePayload) -> Result<()> {
        let actor = self.current_user()?;
        require_seeker(&actor)?;
        if payload.user_id != actor.id {
            return Err(Error::Forbidden(
                "A resume can only be saved for your own account".to_string(),
            ));
        }
        self.api.save_resume(payload).await
    }

    pub async fn help_articles(&self) -> Result<Vec<HelpArticle>> {
        self.api.list_help_articles().await
    }

    /// Routes (current view, role, params) to a view model. A failed gate
    /// yields `None` and the view renders nothing.
    pub fn render(&self) -> Option<ViewModel> {
        if !self.nav.is_allowed(self.session()) {
            return None;
        }
        let model = match self.nav.current() {
            View::Home => ViewModel::Home {
                vacancies: self.vacancies.vacancies().to_vec(),
                connected: self.vacancies.is_connected(),
                loading: self.vacancies.is_loading(),
            },
            View::Login => ViewModel::Login,
            View::Register => ViewModel::Register,
            View::MyVacancies => ViewModel::MyVacancies {
                vacancies: self.vacancies.owned_by(self.session()?.id),
            },
            View::VacancyDetails => ViewModel::VacancyDetails {
                vacancy_id: self.nav.selected_vacancy_id()?,
            },
            View::EditVacancy => ViewModel::EditVacancy {
                vacancy_id: self.nav.selected_vacancy_id()?,
            },
            View::CreateVacancy => ViewModel::CreateVacancy,
            View::Applications => ViewModel::Applications {
                applications: self.applications.applications().to_vec(),
            },
            View::Resume => ViewModel::Resume {
                user_id: self.session()?.id,
            },
            View::SeekerApplications => ViewModel::SeekerApplications {
                applications: self.applications.applications().to_vec(),
            },
            View::Help => ViewModel::Help,
        };
        Some(model)
    }
}

fn require_seeker(actor: &User) -> Result<()> {
    match actor.role {
        Role::Seeker => Ok(()),
        Role::Employer => Err(Error::Forbidden(
            "Only seekers have a resume".to_string(),
        )),
    }
}
