//! Explicit unit registry.
//!
//! Every unit is registered under its [`UnitId`]; asking for an id that already exists
//! returns the registered unit instead of building a second one.

use crate::error::CompositionError;
use fxhash::FxHashMap;
use genu_domain::registry::{DeploymentUnit, UnitId};
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    unit: Arc<dyn DeploymentUnit>,
    any: Arc<dyn Any + Send + Sync>,
}

/// Units created during one composition run, in creation order.
#[derive(Debug, Default)]
pub struct UnitRegistry {
    entries: FxHashMap<UnitId, Entry>,
    order: Vec<UnitId>,
}

impl UnitRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the unit registered under `id`, building and registering it first if absent.
    ///
    /// # Errors
    /// * Whatever `build` returns.
    /// * [`CompositionError::Internal`] if `id` already holds a unit of another type.
    pub fn get_or_create<T, F>(&mut self, id: &UnitId, build: F) -> Result<Arc<T>, CompositionError>
    where
        T: DeploymentUnit,
        F: FnOnce() -> Result<T, CompositionError>,
    {
        if let Some(entry) = self.entries.get(id) {
            return Arc::clone(&entry.any).downcast::<T>().map_err(|_| {
                CompositionError::Internal {
                    message: format!("Unit '{id}' is registered with a different type").into(),
                    context: None,
                }
            });
        }

        let unit = Arc::new(build()?);
        if unit.id() != id {
            return Err(CompositionError::Internal {
                message: format!("Unit built for '{id}' reports id '{}'", unit.id()).into(),
                context: None,
            });
        }

        debug!(unit = %id, kind = ?unit.kind(), region = %unit.env().region, "Created deployment unit");

        let entry = Entry { unit: Arc::clone(&unit) as _, any: Arc::clone(&unit) as _ };
        self.entries.insert(id.clone(), entry);
        self.order.push(id.clone());
        Ok(unit)
    }

    #[must_use]
    pub fn contains(&self, id: &UnitId) -> bool {
        self.entries.contains_key(id)
    }

    /// Typed lookup; `None` when absent or registered with another type.
    #[must_use]
    pub fn get<T: DeploymentUnit>(&self, id: &UnitId) -> Option<Arc<T>> {
        let entry = self.entries.get(id)?;
        Arc::clone(&entry.any).downcast::<T>().ok()
    }

    /// Type-erased lookup.
    #[must_use]
    pub fn unit(&self, id: &UnitId) -> Option<&Arc<dyn DeploymentUnit>> {
        self.entries.get(id).map(|entry| &entry.unit)
    }

    /// Unit ids in creation order.
    #[must_use]
    pub fn order(&self) -> &[UnitId] {
        &self.order
    }

    /// Units in creation order.
    pub fn units(&self) -> impl Iterator<Item = &Arc<dyn DeploymentUnit>> {
        self.order.iter().filter_map(|id| self.entries.get(id).map(|entry| &entry.unit))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
