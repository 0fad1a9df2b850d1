use serde::{Deserialize, Serialize};

use crate::shared::query::SelectOption;

/// Статус публикации статьи
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Published,
    Archived,
}

impl ArticleStatus {
    pub const ALL: [ArticleStatus; 3] = [Self::Draft, Self::Published, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Черновик",
            Self::Published => "Опубликована",
            Self::Archived => "В архиве",
        }
    }

    pub fn to_option(self) -> SelectOption {
        SelectOption::new(self.label(), self.as_str())
    }
}

/// Строка списка статей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleListItemDto {
    pub id: String,
    pub title: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub status: ArticleStatus,
    pub author: Option<String>,
    pub published_at: Option<String>,
    pub updated_at: String,
}

/// Категория статей (источник опций для фильтра)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCategoryDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl ArticleCategoryDto {
    pub fn to_option(&self) -> Option<SelectOption> {
        SelectOption::from_object(self, "id", "name").map(|option| option.with_data(self))
    }
}
