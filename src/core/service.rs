//! Service traits for content collections

use crate::core::entity::{Entity, Orderable};
use crate::core::error::WayfarerResult;
use async_trait::async_trait;

/// Service trait for managing one collection of entities
///
/// Implementations keep the whole collection in memory and decide how (or
/// whether) it is persisted. Records keep their insertion order.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Create a new entity, assigning it the next free id
    async fn create(&self, entity: T) -> WayfarerResult<T>;

    /// Get an entity by `slugOrId` key
    async fn get(&self, key: &str) -> WayfarerResult<Option<T>>;

    /// List all entities in stored order
    async fn list(&self) -> WayfarerResult<Vec<T>>;

    /// Replace an existing entity; the given id wins over the entity's own
    async fn update(&self, id: u64, entity: T) -> WayfarerResult<T>;

    /// Delete an entity
    async fn delete(&self, id: u64) -> WayfarerResult<()>;

    /// Replace the whole collection in one write
    async fn replace_all(&self, entities: Vec<T>) -> WayfarerResult<Vec<T>>;

    /// Number of stored entities
    async fn count(&self) -> WayfarerResult<usize> {
        Ok(self.list().await?.len())
    }
}

/// Service trait for a single settings document (e.g. contact details)
#[async_trait]
pub trait DocumentService<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self) -> WayfarerResult<T>;

    async fn put(&self, document: T) -> WayfarerResult<T>;
}

/// Fills derived fields on listed records before the listing pipeline runs
///
/// Tours use one to resolve destination names from the destinations
/// collection so search can match them.
#[async_trait]
pub trait ListEnricher<T>: Send + Sync {
    async fn enrich(&self, items: &mut [T]) -> WayfarerResult<()>;
}

/// Re-sequence `items` following `ids`
///
/// Listed records take `sort_order` equal to their position in `ids`.
/// Records missing from `ids` keep their relative order after them, and
/// unknown ids are ignored. The result is sorted by the new order.
pub fn apply_order<T: Orderable>(mut items: Vec<T>, ids: &[u64]) -> Vec<T> {
    let position = |id: u64| ids.iter().position(|candidate| *candidate == id);

    items.sort_by_key(|item| position(item.id()).unwrap_or(usize::MAX));
    for (index, item) in items.iter_mut().enumerate() {
        item.set_sort_order(index as u32);
    }
    items
}

/// Next id for a collection: `max + 1`, starting at 1
pub fn next_id<T: Entity>(items: &[T]) -> u64 {
    items.iter().map(Entity::id).max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TeamMember;

    fn member(id: u64, name: &str, order: u32) -> TeamMember {
        TeamMember {
            id,
            name: name.to_string(),
            sort_order: order,
            ..Default::default()
        }
    }

    #[test]
    fn test_next_id_starts_at_one() {
        let empty: Vec<TeamMember> = Vec::new();
        assert_eq!(next_id(&empty), 1);
        assert_eq!(next_id(&[member(4, "a", 0), member(2, "b", 1)]), 5);
    }

    #[test]
    fn test_apply_order_resequences() {
        let items = vec![member(1, "a", 0), member(2, "b", 1), member(3, "c", 2)];
        let ordered = apply_order(items, &[3, 1, 2]);

        let ids: Vec<u64> = ordered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        let orders: Vec<u32> = ordered.iter().map(|m| m.sort_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_apply_order_keeps_unlisted_records_last() {
        let items = vec![member(1, "a", 0), member(2, "b", 1), member(3, "c", 2)];
        let ordered = apply_order(items, &[2, 99]);

        let ids: Vec<u64> = ordered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
