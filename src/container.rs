//! Explicitly injected service container.
//!
//! Screens receive a cloneable handle at construction. Application bootstrap
//! installs services into the map and flips the readiness bit once the core
//! set is in place; lifecycle code consults readiness fresh at every start.
//! Services are keyed by their [`TypeId`], so each type can appear once.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

#[derive(Clone, Default)]
pub struct ServiceContainer {
    inner: Arc<RwLock<ContainerInner>>,
}

#[derive(Default)]
struct ContainerInner {
    ready: bool,
    services: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ServiceContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install<T>(&self, service: Arc<T>) -> Result<(), ContainerError>
    where
        T: Send + Sync + 'static,
    {
        let mut guard = self.inner.write().map_err(|_| ContainerError::Poisoned)?;
        let type_id = TypeId::of::<T>();
        if guard.services.contains_key(&type_id) {
            return Err(ContainerError::AlreadyExists);
        }
        guard.services.insert(type_id, Box::new(service));
        Ok(())
    }

    pub fn get<T>(&self) -> Result<Arc<T>, ContainerError>
    where
        T: Send + Sync + 'static,
    {
        let guard = self.inner.read().map_err(|_| ContainerError::Poisoned)?;
        let boxed = guard
            .services
            .get(&TypeId::of::<T>())
            .ok_or(ContainerError::Missing)?;
        let arc = boxed
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or(ContainerError::TypeMismatch)?;
        Ok(arc)
    }

    /// Flip the readiness bit. Screens only register with container-provided
    /// services after this returns true.
    pub fn mark_ready(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.ready = true;
        }
    }

    pub fn is_ready(&self) -> bool {
        self.inner.read().map(|guard| guard.ready).unwrap_or(false)
    }
}

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("service already installed")]
    AlreadyExists,
    #[error("service missing")]
    Missing,
    #[error("service type mismatch")]
    TypeMismatch,
    #[error("service container poisoned")]
    Poisoned,
}
