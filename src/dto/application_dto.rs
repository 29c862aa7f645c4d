use serde::{Deserialize, Serialize};

use crate::models::application::ApplicationStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitApplicationPayload {
    pub vacancy_id: i64,
    pub seeker_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationStatusPayload {
    pub id: i64,
    pub status: ApplicationStatus,
}
