//! Reference-counted opaque user payloads.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An externally-owned, type-erased payload attached to a node.
///
/// The styling engine never inspects the contents; it only clones the
/// handle. Cloning is a refcount bump, and equality is handle identity,
/// so two payloads built from equal values still compare unequal.
#[derive(Clone)]
pub struct SharedPayload {
    inner: Arc<dyn Any + Send + Sync>,
}

impl SharedPayload {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Borrow the payload as a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Whether two handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles to this payload.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl PartialEq for SharedPayload {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for SharedPayload {}

impl fmt::Debug for SharedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedPayload({:p})", Arc::as_ptr(&self.inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_and_identity() {
        let payload = SharedPayload::new(42u32);
        assert_eq!(payload.downcast_ref::<u32>(), Some(&42));
        assert_eq!(payload.downcast_ref::<String>(), None);

        let clone = payload.clone();
        assert!(payload.ptr_eq(&clone));
        assert_eq!(clone.handle_count(), 2);

        // equality is identity, not value
        let other = SharedPayload::new(42u32);
        assert_ne!(payload, other);
    }
}
