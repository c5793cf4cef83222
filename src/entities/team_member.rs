use super::{active_status, null_as_default, null_as_true};
use crate::core::entity::default_true;
use crate::core::field::FieldValue;
use crate::core::listing::Listable;
use crate::core::validation::{EntityValidationConfig, filters, validators};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_order: u32,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,
}

impl Listable for TeamMember {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.role.as_str(), self.bio.as_str()]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(active_status(self.is_active)),
            "role" => Some(self.role.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::number(self.id as f64)),
            "name" => Some(FieldValue::text(&self.name)),
            "role" => Some(FieldValue::text(&self.role)),
            "sort_order" => Some(FieldValue::number(self.sort_order)),
            "is_active" => Some(FieldValue::flag(self.is_active)),
            _ => None,
        }
    }
}

crate::impl_entity!(TeamMember, "team", "team_member", {
    fn is_public(&self) -> bool {
        self.is_active
    }

    fn validation() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .filter("name", filters::trim())
            .filter("sort_order", filters::numeric())
            .validate("name", validators::required())
            .validate("image", validators::url())
            .validate("sort_order", validators::non_negative())
    }
});

crate::impl_visibility!(TeamMember, is_active);
crate::impl_orderable!(TeamMember);
