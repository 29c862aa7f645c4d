use crate::models::user::{Role, User};

/// Every view the client can show. There is no history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    Register,
    MyVacancies,
    VacancyDetails,
    EditVacancy,
    CreateVacancy,
    Applications,
    Resume,
    SeekerApplications,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub current: View,
    pub selected_vacancy_id: Option<i64>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current: View::Home,
            selected_vacancy_id: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Navigator {
    state: ViewState,
}

impl Navigator {
    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn current(&self) -> View {
        self.state.current
    }

    pub fn selected_vacancy_id(&self) -> Option<i64> {
        self.state.selected_vacancy_id
    }

    /// Unconditional: availability is checked at render time, not here, and
    /// in-flight requests for the previous view are left to finish.
    pub fn navigate(&mut self, view: View, selected_vacancy_id: Option<i64>) {
        self.state.current = view;
        if let Some(id) = selected_vacancy_id {
            self.state.selected_vacancy_id = Some(id);
        }
    }

    /// Drops the remembered vacancy so the detail-view gate closes again.
    /// Used when the session ends.
    pub fn clear_selection(&mut self) {
        self.state.selected_vacancy_id = None;
    }

    /// Render-time gate. When it fails the view shows nothing; there is no
    /// redirect.
    pub fn is_allowed(&self, session: Option<&User>) -> bool {
        match self.state.current {
            View::Home | View::Login | View::Register | View::Help => true,
            View::VacancyDetails | View::EditVacancy => self.state.selected_vacancy_id.is_some(),
            View::CreateVacancy | View::MyVacancies | View::Applications => {
                has_role(session, Role::Employer)
            }
            View::Resume | View::SeekerApplications => has_role(session, Role::Seeker),
        }
    }
}

fn has_role(session: Option<&User>, required: Role) -> bool {
    match session {
        Some(user) => match (user.role, required) {
            (Role::Employer, Role::Employer) => true,
            (Role::Seeker, Role::Seeker) => true,
            (Role::Employer, Role::Seeker) | (Role::Seeker, Role::Employer) => false,
        },
        None => false,
    }
}
