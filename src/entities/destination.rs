use super::{active_status, null_as_true};
use crate::core::entity::default_true;
use crate::core::field::FieldValue;
use crate::core::listing::Listable;
use crate::core::slug::slugify;
use crate::core::validation::{EntityValidationConfig, filters, validators};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,
    #[serde(default)]
    pub featured: bool,
}

impl Listable for Destination {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.country.as_str(),
            self.region.as_str(),
            self.description.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(active_status(self.is_active)),
            "country" => Some(self.country.clone()),
            "region" => Some(self.region.clone()),
            "featured" => Some(self.featured.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::number(self.id as f64)),
            "name" => Some(FieldValue::text(&self.name)),
            "country" => Some(FieldValue::text(&self.country)),
            "region" => Some(FieldValue::text(&self.region)),
            "is_active" => Some(FieldValue::flag(self.is_active)),
            "featured" => Some(FieldValue::flag(self.featured)),
            _ => None,
        }
    }
}

crate::impl_entity!(Destination, "destinations", "destination", {
    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn normalize(&mut self) {
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.name);
        }
    }

    fn is_public(&self) -> bool {
        self.is_active
    }

    fn validation() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .filter("name", filters::trim())
            .filter("slug", filters::trim())
            .validate("name", validators::required())
            .validate("image", validators::url())
    }
});

crate::impl_visibility!(Destination, is_active);
