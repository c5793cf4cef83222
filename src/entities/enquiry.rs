use crate::core::field::FieldValue;
use crate::core::listing::Listable;
use crate::core::validation::{EntityValidationConfig, filters, validators};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest accepted contact form message
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// A message sent through the public contact form
///
/// Enquiries are never edited; admins can only list and delete them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enquiry {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub tour_name: String,
    #[serde(default)]
    pub travel_date: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Listable for Enquiry {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.destination.as_str(),
            self.tour_name.as_str(),
            self.message.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "destination" => Some(self.destination.clone()),
            "tour_name" => Some(self.tour_name.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::number(self.id as f64)),
            "name" => Some(FieldValue::text(&self.name)),
            "email" => Some(FieldValue::text(&self.email)),
            "created_at" => Some(
                self.created_at
                    .map(|t| FieldValue::number(t.timestamp_millis() as f64))
                    .unwrap_or(FieldValue::Null),
            ),
            _ => None,
        }
    }
}

crate::impl_entity!(Enquiry, "enquiries", "enquiry", {
    fn on_create(&mut self) {
        self.created_at = Some(Utc::now());
    }

    fn validation() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .filter("name", filters::trim())
            .filter("email", filters::trim())
            .filter("email", filters::lowercase())
            .validate("name", validators::required())
            .validate("email", validators::required())
            .validate("email", validators::email())
            .validate("message", validators::required())
            .validate("message", validators::string_length(1, MAX_MESSAGE_CHARS))
    }
});
