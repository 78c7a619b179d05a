//! Lazily populated cache of the child objects of one schema owner
//!
//! The cache executes a fixed parametrized query against a row source,
//! materializes each result row into a typed object through the
//! constructor registry, and keeps the resulting collection until it is
//! refreshed or invalidated. Population is all-or-nothing: any row or
//! construction failure aborts the fetch and leaves the previously
//! visible collection untouched.

use crate::{ConstructorFn, ConstructorRegistry};
use metacache_core::{
    MetaCacheError, ProgressMonitor, Result, RowSource, SchemaObject, SchemaOwner, Value,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Observable cache lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No collection has been populated yet
    Empty,
    /// A population is in flight
    Populating,
    /// A complete collection is available
    Populated,
}

/// Cache of the child objects of one owner, built from query result rows.
///
/// The query template and its positional parameters are fixed at
/// construction; parameters are bound in declared order at 1-based
/// positions. One cache instance serves one owner: the resolved
/// constructor is memoized on first use and reused for every subsequent
/// row and repopulation.
///
/// Concurrent `get_objects`/`refresh` calls against the same instance are
/// serialized internally; late arrivals wait for the in-flight population
/// and then observe its result rather than issuing a second query.
/// Readers always see either the fully-old or fully-new collection, never
/// an intermediate state.
pub struct ObjectCache<T: SchemaObject + Clone> {
    query: String,
    params: Vec<Value>,
    registry: ConstructorRegistry<T>,
    /// Constructor memoized for the lifetime of this cache instance
    resolved: RwLock<Option<ConstructorFn<T>>>,
    /// `None` until first populated; swapped wholesale on success
    objects: RwLock<Option<Arc<Vec<T>>>>,
    populating: AtomicBool,
    /// Serializes populate calls; at most one in-flight query per cache
    populate_lock: Mutex<()>,
}

impl<T: SchemaObject + Clone> ObjectCache<T> {
    /// Create an empty cache over a query template and its fixed
    /// positional parameter list.
    pub fn new(
        registry: ConstructorRegistry<T>,
        query: impl Into<String>,
        params: Vec<Value>,
    ) -> Self {
        Self {
            query: query.into(),
            params,
            registry,
            resolved: RwLock::new(None),
            objects: RwLock::new(None),
            populating: AtomicBool::new(false),
            populate_lock: Mutex::new(()),
        }
    }

    /// The query template this cache executes
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Get the owner's child objects, populating the cache on first use.
    ///
    /// If the cache is already populated the collection is returned
    /// without re-querying. On any failure the cache state is unchanged
    /// from before the call.
    pub async fn get_objects(
        &self,
        progress: &ProgressMonitor,
        source: &dyn RowSource,
        owner: &dyn SchemaOwner,
    ) -> Result<Arc<Vec<T>>> {
        if let Some(objects) = self.cached_objects() {
            tracing::trace!(owner = %owner.name(), "object cache hit");
            return Ok(objects);
        }

        let _guard = self.populate_lock.lock().await;
        // A concurrent caller may have populated while we waited.
        if let Some(objects) = self.cached_objects() {
            return Ok(objects);
        }

        let objects = self.populate_guarded(progress, source, owner).await?;
        *self.objects.write() = Some(Arc::clone(&objects));
        Ok(objects)
    }

    /// Discard the previous collection and rebuild it from a fresh query.
    ///
    /// The previous collection stays visible to readers until the new one
    /// is complete, and stays in place if the refresh fails.
    pub async fn refresh(
        &self,
        progress: &ProgressMonitor,
        source: &dyn RowSource,
        owner: &dyn SchemaOwner,
    ) -> Result<Arc<Vec<T>>> {
        let _guard = self.populate_lock.lock().await;
        let objects = self.populate_guarded(progress, source, owner).await?;
        // Swap only once the new collection is complete.
        *self.objects.write() = Some(Arc::clone(&objects));
        Ok(objects)
    }

    /// Drop the cached collection without querying. The next
    /// `get_objects` call repopulates.
    pub fn invalidate(&self) {
        tracing::debug!(query = %self.query, "invalidating object cache");
        *self.objects.write() = None;
    }

    /// The cached collection, if populated
    pub fn cached_objects(&self) -> Option<Arc<Vec<T>>> {
        self.objects.read().clone()
    }

    /// Whether a complete collection is available
    pub fn is_populated(&self) -> bool {
        self.objects.read().is_some()
    }

    /// Current lifecycle state. A populated cache being refreshed reports
    /// `Populating`; the old collection stays readable through
    /// `cached_objects()` until the swap.
    pub fn state(&self) -> CacheState {
        if self.populating.load(Ordering::SeqCst) {
            CacheState::Populating
        } else if self.is_populated() {
            CacheState::Populated
        } else {
            CacheState::Empty
        }
    }

    /// Number of cached objects; zero when not populated
    pub fn object_count(&self) -> usize {
        self.objects.read().as_ref().map_or(0, |objects| objects.len())
    }

    /// Look up a cached object by name. A pure read: never triggers
    /// population, returns `None` when absent or not populated.
    pub fn object_by_name(&self, name: &str) -> Option<T> {
        self.objects
            .read()
            .as_ref()
            .and_then(|objects| objects.iter().find(|object| object.name() == name))
            .cloned()
    }

    /// Look up a cached object by its 0-based position in row order. A
    /// pure read: never triggers population.
    pub fn object_at(&self, position: usize) -> Option<T> {
        self.objects
            .read()
            .as_ref()
            .and_then(|objects| objects.get(position))
            .cloned()
    }

    async fn populate_guarded(
        &self,
        progress: &ProgressMonitor,
        source: &dyn RowSource,
        owner: &dyn SchemaOwner,
    ) -> Result<Arc<Vec<T>>> {
        self.populating.store(true, Ordering::SeqCst);
        let result = self.populate(progress, source, owner).await;
        self.populating.store(false, Ordering::SeqCst);
        result
    }

    /// Run the query and build the full collection in row order. Nothing
    /// is committed here; the caller swaps the collection in on success.
    async fn populate(
        &self,
        progress: &ProgressMonitor,
        source: &dyn RowSource,
        owner: &dyn SchemaOwner,
    ) -> Result<Arc<Vec<T>>> {
        tracing::debug!(owner = %owner.name(), query = %self.query, "populating object cache");

        let mut statement = source.prepare(&self.query).await?;
        for (index, value) in self.params.iter().enumerate() {
            statement.bind(index + 1, value.clone())?;
        }
        let mut cursor = statement.execute().await?;

        let constructor = self.resolved_constructor(owner)?;

        let mut objects = Vec::new();
        loop {
            progress.check_cancelled()?;
            match cursor.next_row().await? {
                Some(row) => {
                    let object = constructor(owner, &row)
                        .map_err(|cause| MetaCacheError::ObjectConstruction(cause.into()))?;
                    objects.push(object);
                }
                None => break,
            }
        }

        tracing::debug!(
            owner = %owner.name(),
            object_count = objects.len(),
            "object cache populated"
        );
        Ok(Arc::new(objects))
    }

    fn resolved_constructor(&self, owner: &dyn SchemaOwner) -> Result<ConstructorFn<T>> {
        if let Some(constructor) = self.resolved.read().clone() {
            return Ok(constructor);
        }
        let constructor = self.registry.resolve(&owner.type_lineage())?;
        *self.resolved.write() = Some(Arc::clone(&constructor));
        Ok(constructor)
    }
}
