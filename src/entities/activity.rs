use super::null_as_default;
use crate::core::field::FieldValue;
use crate::core::listing::Listable;
use crate::core::validation::{EntityValidationConfig, filters, validators};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    /// Number of tours offering this activity, maintained by editors
    #[serde(default, deserialize_with = "null_as_default")]
    pub tour_count: u32,
}

impl Listable for Activity {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn filter_value(&self, _field: &str) -> Option<String> {
        None
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::number(self.id as f64)),
            "name" => Some(FieldValue::text(&self.name)),
            "tour_count" => Some(FieldValue::number(self.tour_count)),
            _ => None,
        }
    }
}

crate::impl_entity!(Activity, "activities", "activity", {
    fn validation() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .filter("name", filters::trim())
            .filter("tour_count", filters::numeric())
            .validate("name", validators::required())
            .validate("tour_count", validators::non_negative())
    }
});
