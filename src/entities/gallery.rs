use crate::core::field::FieldValue;
use crate::core::listing::Listable;
use crate::core::validation::{EntityValidationConfig, filters, validators};
use serde::{Deserialize, Serialize};

/// An uploaded photo shown in the public gallery
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub category: String,
}

impl Listable for GalleryImage {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.caption.as_str(), self.category.as_str()]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "category" => Some(self.category.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::number(self.id as f64)),
            "caption" => Some(FieldValue::text(&self.caption)),
            "category" => Some(FieldValue::text(&self.category)),
            _ => None,
        }
    }
}

crate::impl_entity!(GalleryImage, "gallery", "gallery_image", {
    fn validation() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .filter("url", filters::trim())
            .filter("caption", filters::trim())
            .validate("url", validators::required())
            .validate("url", validators::url())
    }
});
