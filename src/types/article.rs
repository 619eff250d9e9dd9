//! Editorial articles for the learning hub.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleCategory {
    Benefits,
    Safety,
    Government,
    Maintenance,
}

impl fmt::Display for ArticleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArticleCategory::Benefits => "benefits",
            ArticleCategory::Safety => "safety",
            ArticleCategory::Government => "government",
            ArticleCategory::Maintenance => "maintenance",
        };
        f.write_str(name)
    }
}

impl FromStr for ArticleCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "benefits" => Ok(ArticleCategory::Benefits),
            "safety" => Ok(ArticleCategory::Safety),
            "government" => Ok(ArticleCategory::Government),
            "maintenance" => Ok(ArticleCategory::Maintenance),
            _ => Err(Error::InvalidInput(format!("unknown article category: {s}"))),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Article {
    pub uid: Uuid,
    pub title: String,
    pub content: String,
    pub category: ArticleCategory,
    pub tags: Vec<String>,

    /// The user who wrote the article.
    pub author: Uuid,
    pub published: bool,
    pub featured: bool,
    pub read_time_minutes: u32,
    pub created_at: DateTime<Utc>,
}
