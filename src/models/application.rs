use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of an application. `Pending` is the only state with outgoing
/// transitions; `Accepted` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One per (vacancy, seeker) pair; the server enforces uniqueness. The
/// optional fields are denormalized display data and may come back null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub vacancy_id: i64,
    pub seeker_id: i64,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub vacancy_title: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub seeker_name: Option<String>,
    #[serde(default)]
    pub seeker_email: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
}
