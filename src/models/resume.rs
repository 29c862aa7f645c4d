use serde::{Deserialize, Serialize};

/// At most one per seeker; saved with upsert semantics. The backend returns
/// null for fields that were never filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub user_id: i64,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub patronymic: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub citizenship: Option<String>,
    #[serde(default)]
    pub work_permit: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub education_institution: Option<String>,
    #[serde(default)]
    pub education_faculty: Option<String>,
    #[serde(default)]
    pub education_specialization: Option<String>,
    #[serde(default)]
    pub education_year: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
}
