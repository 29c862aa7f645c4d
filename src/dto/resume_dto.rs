use serde::{Deserialize, Serialize};

/// Full resume form as sent to the upsert endpoint. Empty strings are legal;
/// only the owner id is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveResumePayload {
    pub user_id: i64,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub patronymic: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub citizenship: String,
    #[serde(default)]
    pub work_permit: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub education_level: String,
    #[serde(default)]
    pub education_institution: String,
    #[serde(default)]
    pub education_faculty: String,
    #[serde(default)]
    pub education_specialization: String,
    #[serde(default)]
    pub education_year: String,
    #[serde(default)]
    pub skills: String,
}
