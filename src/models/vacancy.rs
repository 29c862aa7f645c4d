use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: i64,
    /// Never changes after creation; ownership checks compare against it.
    pub employer_id: i64,
    pub title: String,
    /// Free text with embedded digits ("150 000 руб", "договорная").
    pub salary: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
