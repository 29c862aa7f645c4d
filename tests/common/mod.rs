#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use tempfile::TempDir;

use jobhunter_client::api::{JobBoardApi, VacancyListing};
use jobhunter_client::dto::application_dto::{
    SubmitApplicationPayload, UpdateApplicationStatusPayload,
};
use jobhunter_client::dto::auth_dto::{LoginPayload, RegisterPayload};
use jobhunter_client::dto::resume_dto::SaveResumePayload;
use jobhunter_client::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use jobhunter_client::error::{Error, Result};
use jobhunter_client::models::application::{Application, ApplicationStatus};
use jobhunter_client::models::help::HelpArticle;
use jobhunter_client::models::resume::Resume;
use jobhunter_client::models::user::{Role, User};
use jobhunter_client::models::vacancy::Vacancy;
use jobhunter_client::services::app::App;
use jobhunter_client::services::session_service::SessionStore;

#[derive(Default)]
struct FakeState {
    users: Vec<(User, String)>,
    vacancies: Vec<Vacancy>,
    applications: Vec<Application>,
    resumes: HashMap<i64, Resume>,
    articles: Vec<HelpArticle>,
    next_id: i64,
}

/// Stands in for the remote backend: the same uniqueness, ownership, and
/// status rules the PHP endpoints enforce, over in-memory state.
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState {
                next_id: 1,
                ..Default::default()
            }),
        })
    }

    pub fn seed_user(&self, user: User, password: &str) {
        self.state
            .lock()
            .unwrap()
            .users
            .push((user, password.to_string()));
    }

    pub fn seed_vacancy(&self, vacancy: Vacancy) {
        self.state.lock().unwrap().vacancies.push(vacancy);
    }

    pub fn seed_article(&self, article: HelpArticle) {
        self.state.lock().unwrap().articles.push(article);
    }

    pub fn vacancy_ids(&self) -> Vec<i64> {
        self.state
            .lock()
            .unwrap()
            .vacancies
            .iter()
            .map(|v| v.id)
            .collect()
    }
}

fn http_error(status: StatusCode, message: &str) -> Error {
    Error::Http {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl JobBoardApi for FakeApi {
    async fn list_vacancies(&self) -> Result<VacancyListing> {
        let state = self.state.lock().unwrap();
        Ok(VacancyListing {
            vacancies: state.vacancies.clone(),
            reliable: true,
        })
    }

    async fn get_vacancy(&self, id: i64) -> Result<Vacancy> {
        let state = self.state.lock().unwrap();
        state
            .vacancies
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Vacancy {} not found", id)))
    }

    async fn create_vacancy(&self, payload: CreateVacancyPayload) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.vacancies.push(Vacancy {
            id,
            employer_id: payload.employer_id,
            title: payload.title,
            salary: payload.salary,
            description: payload.description,
            image: payload.image,
            employer_name: None,
            created_at: None,
        });
        Ok(())
    }

    async fn update_vacancy(&self, payload: UpdateVacancyPayload) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let vacancy = state
            .vacancies
            .iter_mut()
            .find(|v| v.id == payload.id)
            .ok_or_else(|| Error::NotFound(format!("Vacancy {} not found", payload.id)))?;
        vacancy.title = payload.title;
        vacancy.salary = payload.salary;
        vacancy.description = payload.description;
        vacancy.image = payload.image;
        Ok(())
    }

    async fn delete_vacancy(&self, id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.vacancies.retain(|v| v.id != id);
        state.applications.retain(|a| a.vacancy_id != id);
        Ok(())
    }

    async fn list_applications_for_employer(&self, employer_id: i64) -> Result<Vec<Application>> {
        let state = self.state.lock().unwrap();
        let owned: Vec<i64> = state
            .vacancies
            .iter()
            .filter(|v| v.employer_id == employer_id)
            .map(|v| v.id)
            .collect();
        Ok(state
            .applications
            .iter()
            .filter(|a| owned.contains(&a.vacancy_id))
            .cloned()
            .collect())
    }

    async fn list_applications_for_seeker(&self, seeker_id: i64) -> Result<Vec<Application>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .applications
            .iter()
            .filter(|a| a.seeker_id == seeker_id)
            .cloned()
            .collect())
    }

    async fn submit_application(&self, payload: SubmitApplicationPayload) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let duplicate = state
            .applications
            .iter()
            .any(|a| a.vacancy_id == payload.vacancy_id && a.seeker_id == payload.seeker_id);
        if duplicate {
            return Err(Error::DuplicateApplication);
        }
        let vacancy_title = state
            .vacancies
            .iter()
            .find(|v| v.id == payload.vacancy_id)
            .map(|v| v.title.clone());
        let id = state.next_id;
        state.next_id += 1;
        state.applications.push(Application {
            id,
            vacancy_id: payload.vacancy_id,
            seeker_id: payload.seeker_id,
            status: ApplicationStatus::Pending,
            created_at: None,
            vacancy_title,
            salary: None,
            seeker_name: None,
            seeker_email: None,
            employer_name: None,
            profession: None,
            skills: None,
        });
        Ok(())
    }

    async fn update_application_status(
        &self,
        payload: UpdateApplicationStatusPayload,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let application = state
            .applications
            .iter_mut()
            .find(|a| a.id == payload.id)
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", payload.id)))?;
        if application.status.is_terminal() {
            return Err(http_error(
                StatusCode::CONFLICT,
                "Application already decided",
            ));
        }
        application.status = payload.status;
        Ok(())
    }

    async fn get_resume(&self, user_id: i64) -> Result<Option<Resume>> {
        let state = self.state.lock().unwrap();
        Ok(state.resumes.get(&user_id).cloned())
    }

    async fn save_resume(&self, payload: SaveResumePayload) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.resumes.insert(
            payload.user_id,
            Resume {
                user_id: payload.user_id,
                surname: Some(payload.surname),
                first_name: Some(payload.first_name),
                patronymic: Some(payload.patronymic),
                gender: Some(payload.gender),
                city: Some(payload.city),
                phone: Some(payload.phone),
                birthday: Some(payload.birthday),
                citizenship: Some(payload.citizenship),
                work_permit: Some(payload.work_permit),
                profession: Some(payload.profession),
                education_level: Some(payload.education_level),
                education_institution: Some(payload.education_institution),
                education_faculty: Some(payload.education_faculty),
                education_specialization: Some(payload.education_specialization),
                education_year: Some(payload.education_year),
                skills: Some(payload.skills),
            },
        );
        Ok(())
    }

    async fn login(&self, payload: LoginPayload) -> Result<User> {
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|(user, password)| user.email == payload.email && *password == payload.password)
            .map(|(user, _)| user.clone())
            .ok_or_else(|| http_error(StatusCode::UNAUTHORIZED, "Invalid credentials"))
    }

    async fn register(&self, payload: RegisterPayload) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|(u, _)| u.email == payload.email) {
            return Err(http_error(
                StatusCode::CONFLICT,
                "Email is already registered",
            ));
        }
        let id = state.next_id;
        state.next_id += 1;
        state.users.push((
            User {
                id,
                name: payload.name,
                email: payload.email,
                role: payload.role,
                avatar: payload.avatar,
            },
            payload.password,
        ));
        Ok(())
    }

    async fn list_help_articles(&self) -> Result<Vec<HelpArticle>> {
        let state = self.state.lock().unwrap();
        Ok(state.articles.clone())
    }
}

pub fn seeker(id: i64) -> User {
    User {
        id,
        name: format!("Seeker {}", id),
        email: format!("seeker{}@example.com", id),
        role: Role::Seeker,
        avatar: None,
    }
}

pub fn employer(id: i64) -> User {
    User {
        id,
        name: format!("Employer {}", id),
        email: format!("employer{}@example.com", id),
        role: Role::Employer,
        avatar: None,
    }
}

pub fn vacancy(id: i64, employer_id: i64, title: &str, salary: &str) -> Vacancy {
    Vacancy {
        id,
        employer_id,
        title: title.to_string(),
        salary: salary.to_string(),
        description: format!("{} description", title),
        image: None,
        employer_name: None,
        created_at: None,
    }
}

/// An `App` wired to the fake backend, with its session file in a tempdir.
pub fn test_app(api: Arc<FakeApi>) -> (App, SessionStore, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SessionStore::new(dir.path().join("session.json"));
    let app = App::new(api, store.clone());
    (app, store, dir)
}

pub async fn signed_in_app(api: Arc<FakeApi>, user: &User, password: &str) -> (App, TempDir) {
    api.seed_user(user.clone(), password);
    let (mut app, _store, dir) = test_app(api);
    app.startup().await;
    app.login(LoginPayload {
        email: user.email.clone(),
        password: password.to_string(),
    })
    .await
    .expect("login");
    (app, dir)
}
