use crate::core::validation::{EntityValidationConfig, filters, validators};
use serde::{Deserialize, Serialize};

/// Agency contact details shown in the site footer and contact page
///
/// Stored as a single JSON document rather than a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub office_hours: String,
    #[serde(default)]
    pub map_url: String,
}

impl ContactInfo {
    pub const DOCUMENT_NAME: &'static str = "contact-info";

    pub fn validation() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .filter("email", filters::trim())
            .filter("phone", filters::trim())
            .validate("email", validators::email())
            .validate("map_url", validators::url())
    }
}
