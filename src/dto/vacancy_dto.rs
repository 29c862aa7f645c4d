use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVacancyPayload {
    pub employer_id: i64,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub salary: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Updates go out with the id in the body, PHP-backend style.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateVacancyPayload {
    pub id: i64,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub salary: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
