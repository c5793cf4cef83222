//! In-memory storage for tests and development

use crate::core::entity::Entity;
use crate::core::error::{EntityError, StorageError, WayfarerResult};
use crate::core::service::{DataService, DocumentService, next_id};
use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory collection service
///
/// Records are kept in insertion order. The lock is never held across an
/// `.await`, so a std `RwLock` is enough.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Entity> InMemoryDataService<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Start from existing records (e.g. loaded from disk)
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    fn read(&self) -> WayfarerResult<RwLockReadGuard<'_, Vec<T>>> {
        self.records.read().map_err(|_| {
            StorageError::LockPoisoned {
                resource: T::resource_name().to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> WayfarerResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.records.write().map_err(|_| {
            StorageError::LockPoisoned {
                resource: T::resource_name().to_string(),
            }
            .into()
        })
    }

    /// Copy of the current records
    pub fn snapshot(&self) -> WayfarerResult<Vec<T>> {
        Ok(self.read()?.clone())
    }

    /// Put back records taken with [`snapshot`](Self::snapshot)
    pub fn restore(&self, records: Vec<T>) -> WayfarerResult<()> {
        *self.write()? = records;
        Ok(())
    }

    fn not_found(id: u64) -> EntityError {
        EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            key: id.to_string(),
        }
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, mut entity: T) -> WayfarerResult<T> {
        let mut records = self.write()?;

        entity.set_id(next_id(&records));
        entity.normalize();
        entity.on_create();
        records.push(entity.clone());

        Ok(entity)
    }

    async fn get(&self, key: &str) -> WayfarerResult<Option<T>> {
        let records = self.read()?;
        Ok(records.iter().find(|r| r.matches_key(key)).cloned())
    }

    async fn list(&self) -> WayfarerResult<Vec<T>> {
        self.snapshot()
    }

    async fn update(&self, id: u64, mut entity: T) -> WayfarerResult<T> {
        let mut records = self.write()?;

        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        entity.set_id(id);
        entity.normalize();
        *slot = entity.clone();

        Ok(entity)
    }

    async fn delete(&self, id: u64) -> WayfarerResult<()> {
        let mut records = self.write()?;

        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        records.remove(index);

        Ok(())
    }

    async fn replace_all(&self, entities: Vec<T>) -> WayfarerResult<Vec<T>> {
        let mut records = self.write()?;
        *records = entities.clone();
        Ok(entities)
    }

    async fn count(&self) -> WayfarerResult<usize> {
        Ok(self.read()?.len())
    }
}

/// In-memory single-document service
#[derive(Clone)]
pub struct InMemoryDocument<T> {
    name: &'static str,
    value: Arc<RwLock<T>>,
}

impl<T: Clone + Send + Sync + 'static> InMemoryDocument<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        Self {
            name,
            value: Arc::new(RwLock::new(value)),
        }
    }

    fn poisoned(&self) -> StorageError {
        StorageError::LockPoisoned {
            resource: self.name.to_string(),
        }
    }

    pub fn snapshot(&self) -> WayfarerResult<T> {
        Ok(self.value.read().map_err(|_| self.poisoned())?.clone())
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> DocumentService<T> for InMemoryDocument<T> {
    async fn get(&self) -> WayfarerResult<T> {
        self.snapshot()
    }

    async fn put(&self, document: T) -> WayfarerResult<T> {
        let mut value = self.value.write().map_err(|_| self.poisoned())?;
        *value = document.clone();
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::WayfarerError;
    use crate::entities::{ContactInfo, Tour};

    fn tour(title: &str) -> Tour {
        Tour {
            title: title.to_string(),
            listed: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let service = InMemoryDataService::<Tour>::new();

        let first = service.create(tour("Lhasa Discovery")).await.unwrap();
        let second = service.create(tour("Kailash Kora")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.slug, "kailash-kora");
        assert_eq!(service.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ids_continue_after_highest_existing() {
        let mut existing = tour("Existing");
        existing.id = 41;
        let service = InMemoryDataService::with_records(vec![existing]);

        let created = service.create(tour("New")).await.unwrap();
        assert_eq!(created.id, 42);
    }

    #[tokio::test]
    async fn test_get_by_id_or_slug() {
        let service = InMemoryDataService::<Tour>::new();
        service.create(tour("Everest Base Camp")).await.unwrap();

        assert!(service.get("1").await.unwrap().is_some());
        assert!(service.get("everest-base-camp").await.unwrap().is_some());
        assert!(service.get("2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_path_id_wins() {
        let service = InMemoryDataService::<Tour>::new();
        service.create(tour("Old title")).await.unwrap();

        let mut replacement = tour("New title");
        replacement.id = 99;
        let updated = service.update(1, replacement).await.unwrap();

        assert_eq!(updated.id, 1);
        let stored = service.get("1").await.unwrap().unwrap();
        assert_eq!(stored.title, "New title");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_record() {
        let service = InMemoryDataService::<Tour>::new();

        let err = service.update(5, tour("x")).await.unwrap_err();
        assert!(matches!(
            err,
            WayfarerError::Entity(EntityError::NotFound { .. })
        ));
        assert!(service.delete(5).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_preserves_order() {
        let service = InMemoryDataService::<Tour>::new();
        for title in ["a", "b", "c"] {
            service.create(tour(title)).await.unwrap();
        }

        service.delete(2).await.unwrap();

        let titles: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_document_put_replaces_value() {
        let doc = InMemoryDocument::new("contact-info", ContactInfo::default());
        doc.put(ContactInfo {
            phone: "+977 1 4412345".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(doc.get().await.unwrap().phone, "+977 1 4412345");
    }
}
