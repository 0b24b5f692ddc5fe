//! Provider Registry Module
//!
//! Holds the default [`NetworkProvider`]. Socket objects consult the registry
//! once, at creation, and keep their own reference afterwards.

use std::sync::{Arc, RwLock};

use adapters_socket::NetworkProvider;
use log::debug;

/// Registry of the default network provider
pub struct ProviderRegistry {
    default: RwLock<Arc<dyn NetworkProvider>>,
}

impl ProviderRegistry {
    /// Create a registry with `provider` as the default
    pub fn new(provider: Arc<dyn NetworkProvider>) -> Self {
        debug!("default network provider registered");
        Self {
            default: RwLock::new(provider),
        }
    }

    /// Replace the default provider
    ///
    /// Sockets created before the call keep the provider they were created with.
    pub fn register(&self, provider: Arc<dyn NetworkProvider>) {
        let mut slot = self.default.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = provider;
        debug!("default network provider registered");
    }

    /// Current default provider
    pub fn default_provider(&self) -> Arc<dyn NetworkProvider> {
        let slot = self.default.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&*slot)
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapters_socket::NativeSocketProvider;

    #[test]
    fn test_default_provider_is_shared() {
        let provider: Arc<dyn NetworkProvider> = Arc::new(NativeSocketProvider::new());
        let registry = ProviderRegistry::new(Arc::clone(&provider));
        let a = registry.default_provider();
        let b = registry.default_provider();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &provider));
    }

    #[test]
    fn test_register_replaces_default() {
        let first: Arc<dyn NetworkProvider> = Arc::new(NativeSocketProvider::new());
        let second: Arc<dyn NetworkProvider> = Arc::new(NativeSocketProvider::new());
        let registry = ProviderRegistry::new(Arc::clone(&first));
        let held = registry.default_provider();

        registry.register(Arc::clone(&second));
        assert!(Arc::ptr_eq(&registry.default_provider(), &second));
        assert!(Arc::ptr_eq(&held, &first));
    }
}
