use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelpArticle {
    pub id: i64,
    pub title: String,
    pub content: String,
}
