//! Tours and destination lookups

use super::{Destination, null_as_default, null_as_true};
use crate::core::entity::default_true;
use crate::core::error::WayfarerResult;
use crate::core::field::FieldValue;
use crate::core::listing::Listable;
use crate::core::slug::slugify;
use crate::core::service::{DataService, ListEnricher};
use crate::core::validation::{EntityValidationConfig, filters, validators};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    /// Free-text destination, used when no destination id resolves
    #[serde(default)]
    pub destination: String,
    /// Human duration such as "12 days"
    #[serde(default)]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub listed: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_destination_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_destination_ids: Vec<u64>,

    /// Destination names resolved through a [`DestinationIndex`]
    #[serde(skip)]
    pub destination_names: Vec<String>,
}

impl Listable for Tour {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.category.as_str(),
            self.destination.as_str(),
            self.description.as_str(),
        ];
        fields.extend(self.destination_names.iter().map(String::as_str));
        fields
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(if self.listed { "listed" } else { "unlisted" }.to_string()),
            "category" => Some(self.category.clone()),
            "destination" => Some(self.destination.clone()),
            "featured" => Some(self.featured.to_string()),
            "listed" => Some(self.listed.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::number(self.id as f64)),
            "title" => Some(FieldValue::text(&self.title)),
            "category" => Some(FieldValue::text(&self.category)),
            "destination" => Some(FieldValue::text(&self.destination)),
            "duration" => Some(FieldValue::duration(&self.duration)),
            "price" => Some(FieldValue::number(self.price)),
            "listed" => Some(FieldValue::flag(self.listed)),
            "featured" => Some(FieldValue::flag(self.featured)),
            _ => None,
        }
    }
}

crate::impl_entity!(Tour, "tours", "tour", {
    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn normalize(&mut self) {
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.title);
        }
    }

    fn is_public(&self) -> bool {
        self.listed
    }

    fn validation() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .filter("title", filters::trim())
            .filter("slug", filters::trim())
            .filter("price", filters::numeric())
            .filter("price", filters::round_decimals(2))
            .validate("title", validators::required())
            .validate("price", validators::non_negative())
            .validate("image", validators::url())
    }
});

crate::impl_visibility!(Tour, listed);

/// Destination id to name lookup built from the destinations list
#[derive(Debug, Clone, Default)]
pub struct DestinationIndex {
    names: HashMap<u64, String>,
}

impl DestinationIndex {
    pub fn new(destinations: &[Destination]) -> Self {
        Self {
            names: destinations
                .iter()
                .map(|d| (d.id, d.name.clone()))
                .collect(),
        }
    }

    pub fn name(&self, id: u64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Names of the tour's primary and secondary destinations
    ///
    /// Unresolved ids are skipped. When nothing resolves, the tour's
    /// free-text `destination` is returned instead (if any).
    pub fn resolve(&self, tour: &Tour) -> Vec<String> {
        let resolved: Vec<String> = tour
            .primary_destination_id
            .iter()
            .chain(tour.secondary_destination_ids.iter())
            .filter_map(|id| self.name(*id))
            .map(str::to_string)
            .collect();

        if resolved.is_empty() && !tour.destination.is_empty() {
            vec![tour.destination.clone()]
        } else {
            resolved
        }
    }

    /// Fill `destination_names` on every tour so search also matches them
    pub fn annotate(&self, tours: &mut [Tour]) {
        for tour in tours {
            tour.destination_names = self.resolve(tour);
        }
    }
}

/// Resolves tour destination names from the live destinations collection
pub struct DestinationNames {
    destinations: Arc<dyn DataService<Destination>>,
}

impl DestinationNames {
    pub fn new(destinations: Arc<dyn DataService<Destination>>) -> Self {
        Self { destinations }
    }
}

#[async_trait]
impl ListEnricher<Tour> for DestinationNames {
    async fn enrich(&self, tours: &mut [Tour]) -> WayfarerResult<()> {
        let destinations = self.destinations.list().await?;
        DestinationIndex::new(&destinations).annotate(tours);
        Ok(())
    }
}
