use super::null_as_true;
use crate::core::entity::default_true;
use crate::core::field::FieldValue;
use crate::core::listing::Listable;
use crate::core::validation::{EntityValidationConfig, filters, validators};
use serde::{Deserialize, Serialize};

fn default_rating() -> u8 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Star rating from 1 to 5
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_featured: bool,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_approved: bool,
}

impl Default for Testimonial {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            rating: default_rating(),
            title: String::new(),
            message: String::new(),
            location: String::new(),
            is_featured: true,
            is_approved: true,
        }
    }
}

impl Listable for Testimonial {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.title.as_str(),
            self.message.as_str(),
            self.location.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(if self.is_approved { "approved" } else { "pending" }.to_string()),
            "rating" => Some(self.rating.to_string()),
            "is_featured" => Some(self.is_featured.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::number(self.id as f64)),
            "name" => Some(FieldValue::text(&self.name)),
            "rating" => Some(FieldValue::number(self.rating)),
            "is_featured" => Some(FieldValue::flag(self.is_featured)),
            "is_approved" => Some(FieldValue::flag(self.is_approved)),
            _ => None,
        }
    }
}

crate::impl_entity!(Testimonial, "testimonials", "testimonial", {
    fn is_public(&self) -> bool {
        self.is_approved
    }

    fn validation() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .filter("name", filters::trim())
            .filter("rating", filters::numeric())
            .validate("name", validators::required())
            .validate("message", validators::required())
            .validate("rating", validators::range(1.0, 5.0))
    }
});

crate::impl_visibility!(Testimonial, is_approved);
