use super::{active_status, null_as_true};
use crate::core::entity::default_true;
use crate::core::field::FieldValue;
use crate::core::listing::Listable;
use crate::core::slug::slugify;
use crate::core::validation::{EntityValidationConfig, filters, validators};
use serde::{Deserialize, Serialize};

/// A blog article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author: String,
    /// Publication date as entered by the editor (e.g. "2024-05-01")
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,
}

impl Listable for BlogPost {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.category.as_str(),
            self.author.as_str(),
            self.excerpt.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(active_status(self.is_active)),
            "category" => Some(self.category.clone()),
            "author" => Some(self.author.clone()),
            "featured" => Some(self.featured.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::number(self.id as f64)),
            "title" => Some(FieldValue::text(&self.title)),
            "category" => Some(FieldValue::text(&self.category)),
            "author" => Some(FieldValue::text(&self.author)),
            // ISO dates order correctly as text
            "date" => Some(FieldValue::text(&self.date)),
            "featured" => Some(FieldValue::flag(self.featured)),
            "is_active" => Some(FieldValue::flag(self.is_active)),
            _ => None,
        }
    }
}

crate::impl_entity!(BlogPost, "posts", "post", {
    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn normalize(&mut self) {
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.title);
        }
    }

    fn is_public(&self) -> bool {
        self.is_active
    }

    fn validation() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .filter("title", filters::trim())
            .filter("slug", filters::trim())
            .validate("title", validators::required())
            .validate("image", validators::url())
    }
});

crate::impl_visibility!(BlogPost, is_active);
