//! Service Instance Handle
//!
//! Type-erased handle returned by constructors. The registry never looks
//! inside it; hosts recover the concrete type (or service port) by downcast.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque, cheaply clonable service instance
///
/// Holds either a concrete value (`ServiceInstance::new`) or a shared service
/// port such as `Arc<dyn SessionService>` (`ServiceInstance::from_port`).
///
/// ## Example
///
/// ```rust
/// use svcreg_domain::value_objects::ServiceInstance;
///
/// let instance = ServiceInstance::new(("ok", "dummy", "5"));
/// assert_eq!(
///     instance.downcast_ref::<(&str, &str, &str)>(),
///     Some(&("ok", "dummy", "5"))
/// );
/// ```
#[derive(Clone)]
pub struct ServiceInstance {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
    label: Option<String>,
}

impl ServiceInstance {
    /// Wrap a concrete value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
            label: None,
        }
    }

    /// Wrap an already shared concrete value without re-allocating
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: std::any::type_name::<T>(),
            label: None,
        }
    }

    /// Wrap a shared service port (e.g. `Arc<dyn MemoryService>`)
    ///
    /// Recover it with [`ServiceInstance::port`].
    pub fn from_port<T: ?Sized + Send + Sync + 'static>(port: Arc<T>) -> Self {
        Self {
            inner: Arc::new(port),
            type_name: std::any::type_name::<T>(),
            label: None,
        }
    }

    /// Attach a human-readable label (shown in diagnostics)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Borrow the concrete value if it has type `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Get a shared handle to the concrete value if it has type `T`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }

    /// Recover a service port stored with [`ServiceInstance::from_port`]
    pub fn port<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.downcast_ref::<Arc<T>>().cloned()
    }

    /// Whether the concrete value has type `T`
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Name of the wrapped type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Label if set, otherwise the wrapped type name
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.type_name)
    }

    /// Whether both handles point at the same instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ServiceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceInstance")
            .field("type", &self.type_name)
            .field("label", &self.label)
            .finish()
    }
}
