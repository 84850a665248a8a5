//! Registry of late-arriving named values
//!
//! Each name owns a `watch` channel. Waiters subscribe and wait for the value
//! to become `Some`, each bounded by exactly one timeout. Receivers are
//! dropped when a waiter gives up, so an abandoned wait leaves nothing behind
//! that could interfere with a later registration.

use std::{collections::HashMap, time::Duration};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Module '{name}' was not registered within {timeout:?}")]
    Timeout { name: String, timeout: Duration },

    #[error("Module registry was shut down while waiting for '{0}'")]
    Closed(String),
}

/// Registry mapping names to values of type `T`
pub struct ModuleRegistry<T> {
    slots: Mutex<HashMap<String, watch::Sender<Option<T>>>>,
}

impl<T> std::fmt::Debug for ModuleRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.slots.lock();
        f.debug_struct("ModuleRegistry")
            .field("names", &slots.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<T> Default for ModuleRegistry<T> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Clone + Send + Sync> ModuleRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the value for `name`, waking all waiters
    pub fn register(&self, name: impl Into<String>, value: T) {
        let name = name.into();
        let mut slots = self.slots.lock();
        match slots.get(&name) {
            Some(sender) => {
                let waiting = sender.receiver_count();
                if sender.send_replace(Some(value)).is_some() {
                    warn!(%name, "Replacing already registered module");
                }
                info!(%name, waiting, "Module registered");
            },
            None => {
                let (sender, _) = watch::channel(Some(value));
                slots.insert(name.clone(), sender);
                info!(%name, "Module registered");
            },
        }
    }

    /// Current value for `name`, without waiting
    #[must_use]
    pub fn get(&self, name: &str) -> Option<T> {
        self.slots
            .lock()
            .get(name)
            .and_then(|sender| sender.borrow().clone())
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.slots
            .lock()
            .get(name)
            .is_some_and(|sender| sender.borrow().is_some())
    }

    /// Names that currently have waiters but no value
    #[must_use]
    pub fn pending(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .slots
            .lock()
            .iter()
            .filter(|(_, sender)| sender.borrow().is_none() && sender.receiver_count() > 0)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Remove the slot for `name` if nobody registered it and nobody waits
    fn forget_if_abandoned(&self, name: &str) {
        let mut slots = self.slots.lock();
        let abandoned = slots
            .get(name)
            .is_some_and(|sender| sender.borrow().is_none() && sender.receiver_count() == 0);
        if abandoned {
            slots.remove(name);
        }
    }

    /// Wait until `name` is registered
    ///
    /// Resolves immediately if the value is already there.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Timeout` if nothing is registered within `timeout`.
    pub async fn resolve(&self, name: &str, timeout: Duration) -> Result<T, LoadError> {
        let mut receiver = {
            let mut slots = self.slots.lock();
            slots
                .entry(name.to_string())
                .or_insert_with(|| watch::channel(None).0)
                .subscribe()
        };

        let outcome = tokio::time::timeout(timeout, receiver.wait_for(Option::is_some))
            .await
            .map(|waited| waited.ok().and_then(|value| value.clone()));
        drop(receiver);

        match outcome {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(LoadError::Closed(name.to_string())),
            Err(_) => {
                debug!(%name, ?timeout, "Gave up waiting for module");
                self.forget_if_abandoned(name);
                Err(LoadError::Timeout {
                    name: name.to_string(),
                    timeout,
                })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn resolves_already_registered() {
        let registry = ModuleRegistry::new();
        registry.register("map", 1_u32);
        assert_eq!(
            registry.resolve("map", Duration::from_millis(1)).await,
            Ok(1)
        );
        assert!(registry.is_registered("map"));
        assert_eq!(registry.get("map"), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_late_registration() {
        let registry = Arc::new(ModuleRegistry::new());
        let waiter = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.resolve("map", Duration::from_secs(5)).await })
        };
        tokio::task::yield_now().await;
        assert_eq!(registry.pending(), vec!["map".to_string()]);

        registry.register("map", "loaded");
        assert_eq!(waiter.await.unwrap(), Ok("loaded"));
        assert!(registry.pending().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_without_residue() {
        let registry = ModuleRegistry::<u8>::new();
        let err = registry
            .resolve("missing", Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Timeout { ref name, .. } if name == "missing"));
        assert!(registry.pending().is_empty());
        assert!(!registry.is_registered("missing"));

        registry.register("missing", 7);
        assert_eq!(
            registry.resolve("missing", Duration::from_secs(2)).await,
            Ok(7)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_names_are_forgotten() {
        let registry = ModuleRegistry::<u8>::new();
        for i in 0..50 {
            let _ = registry
                .resolve(&format!("missing-{i}"), Duration::from_millis(10))
                .await;
        }
        assert!(registry.slots.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_keeps_slot_with_other_waiters() {
        let registry = Arc::new(ModuleRegistry::<u8>::new());
        let patient = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.resolve("map", Duration::from_secs(60)).await })
        };
        tokio::task::yield_now().await;

        let impatient = registry.resolve("map", Duration::from_secs(1)).await;
        assert!(matches!(impatient, Err(LoadError::Timeout { .. })));
        assert_eq!(registry.pending(), vec!["map".to_string()]);

        registry.register("map", 3);
        assert_eq!(patient.await.unwrap(), Ok(3));
    }

    #[test]
    fn replacing_keeps_latest() {
        let registry = ModuleRegistry::new();
        registry.register("a", 1);
        registry.register("a", 2);
        assert_eq!(registry.get("a"), Some(2));
    }
}
