//! The agency site: which collections exist and how each is exposed

use super::builder::ServerBuilder;
use crate::core::entity::Entity;
use crate::core::error::WayfarerResult;
use crate::core::service::DataService;
use crate::entities::{
    Activity, BlogPost, ContactInfo, Destination, Enquiry, GalleryImage, Slider, TeamMember,
    DestinationNames, Testimonial, Tour,
};
use crate::storage::{InMemoryDataService, InMemoryDocument, JsonFileDataService, JsonFileDocument};
use std::path::PathBuf;
use std::sync::Arc;

/// Where the site's collections are kept
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Nothing persisted; used by tests
    InMemory,

    /// One JSON file per collection in the given directory
    JsonFiles(PathBuf),
}

impl StorageBackend {
    async fn collection<T: Entity>(&self) -> WayfarerResult<Arc<dyn DataService<T>>> {
        let service: Arc<dyn DataService<T>> = match self {
            StorageBackend::InMemory => Arc::new(InMemoryDataService::<T>::new()),
            StorageBackend::JsonFiles(dir) => Arc::new(JsonFileDataService::<T>::open(dir).await?),
        };
        Ok(service)
    }
}

impl ServerBuilder {
    /// Register every collection of the site plus the contact document
    ///
    /// Tour listings resolve destination names so search matches them.
    /// Enquiries are posted publicly and only listed/deleted by admins.
    /// Sliders and team members support drag-and-drop reordering.
    pub async fn with_site(self, backend: StorageBackend) -> WayfarerResult<Self> {
        let destinations = backend.collection::<Destination>().await?;
        let destination_names = Arc::new(DestinationNames::new(destinations.clone()));

        let builder = self
            .collection(backend.collection::<Tour>().await?, |d| {
                d.with_enricher(destination_names)
            })
            .collection(destinations, |d| d)
            .collection(backend.collection::<Activity>().await?, |d| d)
            .collection(backend.collection::<Testimonial>().await?, |d| d)
            .collection(backend.collection::<BlogPost>().await?, |d| d)
            .collection(backend.collection::<GalleryImage>().await?, |d| d)
            .collection(backend.collection::<Slider>().await?, |d| d.with_reorder())
            .collection(backend.collection::<TeamMember>().await?, |d| d.with_reorder())
            .collection(backend.collection::<Enquiry>().await?, |d| {
                d.admin_only().public_create().immutable()
            });

        Ok(match &backend {
            StorageBackend::InMemory => builder.with_contact_info(InMemoryDocument::new(
                ContactInfo::DOCUMENT_NAME,
                ContactInfo::default(),
            )),
            StorageBackend::JsonFiles(dir) => builder.with_contact_info(
                JsonFileDocument::<ContactInfo>::open(dir, ContactInfo::DOCUMENT_NAME).await?,
            ),
        })
    }
}
