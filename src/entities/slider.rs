use super::{active_status, null_as_default, null_as_true};
use crate::core::entity::default_true;
use crate::core::field::FieldValue;
use crate::core::listing::Listable;
use crate::core::validation::{EntityValidationConfig, filters, validators};
use serde::{Deserialize, Serialize};

/// A home page hero slide
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_order: u32,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,
}

impl Listable for Slider {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.subtitle.as_str()]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(active_status(self.is_active)),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::number(self.id as f64)),
            "title" => Some(FieldValue::text(&self.title)),
            "sort_order" => Some(FieldValue::number(self.sort_order)),
            "is_active" => Some(FieldValue::flag(self.is_active)),
            _ => None,
        }
    }
}

crate::impl_entity!(Slider, "sliders", "slider", {
    fn is_public(&self) -> bool {
        self.is_active
    }

    fn validation() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .filter("title", filters::trim())
            .filter("sort_order", filters::numeric())
            .validate("image", validators::url())
            .validate("link", validators::url())
            .validate("sort_order", validators::non_negative())
    }
});

crate::impl_visibility!(Slider, is_active);
crate::impl_orderable!(Slider);
