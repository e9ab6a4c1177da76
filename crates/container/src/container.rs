//! Service container implementation.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;

use codecrew_core::{Error, Result};

/// A type-erased service instance stored in the container.
pub type Service = Arc<dyn Any + Send + Sync>;

/// Zero-argument constructor for transient services.
pub type Constructor = Box<dyn Fn() -> Service + Send + Sync>;

/// Factory invoked with the resolving container and caller-supplied args.
pub type FactoryFn = Box<dyn Fn(&ServiceContainer, Value) -> Result<Service> + Send + Sync>;

/// Service lifetime options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceLifetime {
    /// A single instance is created and reused for all requests.
    Singleton,
    /// A new instance is constructed for each request.
    Transient,
    /// A factory function is called for each request.
    Factory,
}

/// Describes a registered service.
///
/// The variant is the lifetime: exactly one of instance, constructor, or
/// factory exists per registration. The descriptor is owned by the container
/// that created it and dropped on unregister or clear.
pub enum ServiceDescriptor {
    Instance(Service),
    Constructor(Constructor),
    Factory(FactoryFn),
}

impl ServiceDescriptor {
    /// Lifetime implied by the descriptor variant.
    pub fn lifetime(&self) -> ServiceLifetime {
        match self {
            ServiceDescriptor::Instance(_) => ServiceLifetime::Singleton,
            ServiceDescriptor::Constructor(_) => ServiceLifetime::Transient,
            ServiceDescriptor::Factory(_) => ServiceLifetime::Factory,
        }
    }
}

/// Name-keyed dependency-injection container with hierarchical resolution.
///
/// Services are registered under a unique name with one of three lifetimes
/// and later resolved by name and type. A child container created with
/// [`ServiceContainer::create_child`] shadows — never mutates — its parent:
/// lookups fall back to the parent chain for names the child does not hold,
/// which lets a nested scope swap a service (e.g. a real provider for a
/// mock) without touching shared wiring.
///
/// The internal map is concurrency-safe, but no ordering is guaranteed
/// between concurrent registrations and resolutions. Factories may resolve
/// other services while running; they must not register new ones.
pub struct ServiceContainer {
    services: DashMap<String, ServiceDescriptor>,
    parent: Option<Arc<ServiceContainer>>,
}

impl ServiceContainer {
    /// Create an empty root container.
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
            parent: None,
        }
    }

    fn with_parent(parent: Arc<ServiceContainer>) -> Self {
        Self {
            services: DashMap::new(),
            parent: Some(parent),
        }
    }

    fn insert(&self, name: String, descriptor: ServiceDescriptor) -> Result<()> {
        match self.services.entry(name) {
            Entry::Occupied(occupied) => Err(Error::already_registered(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                tracing::debug!(
                    service = %vacant.key(),
                    lifetime = ?descriptor.lifetime(),
                    "Registering service"
                );
                vacant.insert(descriptor);
                Ok(())
            }
        }
    }

    /// Register a singleton: every resolve returns the identical instance.
    ///
    /// Fails with `AlreadyRegistered` if the name exists in *this* container
    /// (a parent's registration does not block a child's).
    pub fn register_singleton<T>(&self, name: impl Into<String>, instance: T) -> Result<()>
    where
        T: Any + Send + Sync,
    {
        self.insert(name.into(), ServiceDescriptor::Instance(Arc::new(instance)))
    }

    /// Register a transient: every resolve invokes the constructor and
    /// returns a fresh instance.
    pub fn register_transient<T, F>(&self, name: impl Into<String>, constructor: F) -> Result<()>
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.insert(
            name.into(),
            ServiceDescriptor::Constructor(Box::new(move || Arc::new(constructor()) as Service)),
        )
    }

    /// Register a factory: every resolve invokes the function, passing the
    /// resolving container (for recursive resolution) and caller args.
    pub fn register_factory<T, F>(&self, name: impl Into<String>, factory: F) -> Result<()>
    where
        T: Any + Send + Sync,
        F: Fn(&ServiceContainer, Value) -> Result<T> + Send + Sync + 'static,
    {
        self.insert(
            name.into(),
            ServiceDescriptor::Factory(Box::new(move |container, args| {
                factory(container, args).map(|value| Arc::new(value) as Service)
            })),
        )
    }

    /// Resolve a service by name, downcast to `T`.
    pub fn resolve<T>(&self, name: &str) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.resolve_with(name, Value::Null)
    }

    /// Resolve a service by name with arguments for factory registrations.
    ///
    /// Singleton and transient registrations ignore `args`.
    pub fn resolve_with<T>(&self, name: &str, args: Value) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.resolve_untyped(name, args)?
            .downcast::<T>()
            .map_err(|_| Error::ServiceType {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Resolve a service by name without downcasting.
    ///
    /// Looks up this container first, then delegates along the parent chain;
    /// fails with `NotRegistered` when the name is absent throughout.
    pub fn resolve_untyped(&self, name: &str, args: Value) -> Result<Service> {
        match self.services.get(name) {
            Some(entry) => match entry.value() {
                ServiceDescriptor::Instance(instance) => Ok(instance.clone()),
                ServiceDescriptor::Constructor(constructor) => Ok(constructor()),
                ServiceDescriptor::Factory(factory) => factory(self, args),
            },
            None => match &self.parent {
                Some(parent) => parent.resolve_untyped(name, args),
                None => Err(Error::not_registered(name)),
            },
        }
    }

    /// Whether the name is registered in this container or any ancestor.
    pub fn is_registered(&self, name: &str) -> bool {
        if self.services.contains_key(name) {
            return true;
        }
        match &self.parent {
            Some(parent) => parent.is_registered(name),
            None => false,
        }
    }

    /// Remove a registration from this container.
    ///
    /// Only this container's own registrations can be removed; a name that
    /// resolves via the parent chain fails with `NotRegistered`.
    pub fn unregister(&self, name: &str) -> Result<()> {
        self.services
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::not_registered(name))
    }

    /// Remove every registration from this container. Test harnesses only;
    /// the parent chain is untouched.
    pub fn clear(&self) {
        self.services.clear();
    }

    /// Create a child container whose lookups fall back to `parent`.
    pub fn create_child(parent: &Arc<ServiceContainer>) -> ServiceContainer {
        ServiceContainer::with_parent(Arc::clone(parent))
    }

    /// Number of registrations in this container (parents excluded).
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether this container holds no registrations of its own.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct Settings {
        retries: u32,
    }

    #[test]
    fn test_singleton_identity() {
        let container = ServiceContainer::new();
        container
            .register_singleton("settings", Settings { retries: 3 })
            .unwrap();

        let first = container.resolve::<Settings>("settings").unwrap();
        let second = container.resolve::<Settings>("settings").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.retries, 3);
    }

    #[test]
    fn test_transient_freshness() {
        let container = ServiceContainer::new();
        container
            .register_transient("settings", || Settings { retries: 1 })
            .unwrap();

        let first = container.resolve::<Settings>("settings").unwrap();
        let second = container.resolve::<Settings>("settings").unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn test_factory_called_once_per_resolve() {
        let container = ServiceContainer::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counted = counter.clone();

        container
            .register_factory("ticket", move |_container, _args| {
                Ok(counted.fetch_add(1, Ordering::SeqCst))
            })
            .unwrap();

        let outputs: Vec<usize> = (0..3)
            .map(|_| *container.resolve::<usize>("ticket").unwrap())
            .collect();

        assert_eq!(outputs, vec![0, 1, 2]);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_factory_receives_args_and_container() {
        let container = Arc::new(ServiceContainer::new());
        container.register_singleton("prefix", "svc".to_string()).unwrap();
        container
            .register_factory("label", |container, args| {
                let prefix = container.resolve::<String>("prefix")?;
                let suffix = args.get("suffix").and_then(|v| v.as_str()).unwrap_or("?");
                Ok(format!("{}-{}", prefix, suffix))
            })
            .unwrap();

        let label = container
            .resolve_with::<String>("label", json!({"suffix": "42"}))
            .unwrap();
        assert_eq!(*label, "svc-42");
    }

    #[test]
    fn test_hierarchical_override() {
        let parent = Arc::new(ServiceContainer::new());
        parent.register_singleton("svc", "parent".to_string()).unwrap();

        let child = Arc::new(ServiceContainer::create_child(&parent));
        child.register_singleton("svc", "child".to_string()).unwrap();

        assert_eq!(*parent.resolve::<String>("svc").unwrap(), "parent");
        assert_eq!(*child.resolve::<String>("svc").unwrap(), "child");

        // Removing the shadow exposes the parent registration again.
        child.unregister("svc").unwrap();
        assert_eq!(*child.resolve::<String>("svc").unwrap(), "parent");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let container = ServiceContainer::new();
        container.register_singleton("svc", 1u32).unwrap();

        let err = container.register_singleton("svc", 2u32).unwrap_err();
        assert!(matches!(err, Error::AlreadyRegistered(name) if name == "svc"));
    }

    #[test]
    fn test_child_may_shadow_parent_name() {
        let parent = Arc::new(ServiceContainer::new());
        parent.register_singleton("svc", 1u32).unwrap();

        // The parent's registration does not block the child's.
        let child = ServiceContainer::create_child(&parent);
        assert!(child.register_singleton("svc", 2u32).is_ok());
    }

    #[test]
    fn test_missing_service() {
        let container = ServiceContainer::new();
        let err = container.resolve::<String>("ghost").unwrap_err();
        assert!(matches!(err, Error::NotRegistered(name) if name == "ghost"));
    }

    #[test]
    fn test_type_mismatch() {
        let container = ServiceContainer::new();
        container.register_singleton("svc", 1u32).unwrap();

        let err = container.resolve::<String>("svc").unwrap_err();
        assert!(matches!(err, Error::ServiceType { name, .. } if name == "svc"));
    }

    #[test]
    fn test_is_registered_follows_parent_chain() {
        let parent = Arc::new(ServiceContainer::new());
        parent.register_singleton("svc", 1u32).unwrap();
        let child = ServiceContainer::create_child(&parent);

        assert!(child.is_registered("svc"));
        assert!(!child.is_registered("ghost"));
    }

    #[test]
    fn test_clear_is_local() {
        let parent = Arc::new(ServiceContainer::new());
        parent.register_singleton("svc", 1u32).unwrap();

        let child = Arc::new(ServiceContainer::create_child(&parent));
        child.register_singleton("extra", 2u32).unwrap();
        child.clear();

        assert!(child.is_empty());
        assert_eq!(*child.resolve::<u32>("svc").unwrap(), 1);
    }
}
