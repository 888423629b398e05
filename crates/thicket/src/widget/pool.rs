//! Free-list recycling of canvas objects.

use std::fmt;

/// A free list of released objects of one shape.
///
/// Objects come back out in no particular order; callers rebind whatever
/// they obtain before showing it. The pool has no capacity limit and never
/// shrinks, so it settles at the largest number of objects that were ever
/// released at once.
///
/// # Example
///
/// ```
/// use thicket::widget::ObjectPool;
///
/// let mut pool = ObjectPool::new();
/// assert!(pool.obtain().is_none());
///
/// pool.release(String::from("row"));
/// assert_eq!(pool.len(), 1);
/// assert_eq!(pool.obtain().as_deref(), Some("row"));
/// assert!(pool.is_empty());
/// ```
pub struct ObjectPool<T> {
    free: Vec<T>,
}

impl<T> ObjectPool<T> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }

    /// Take a previously released object, or `None` if the pool is empty.
    pub fn obtain(&mut self) -> Option<T> {
        self.free.pop()
    }

    /// Return an object to the pool.
    ///
    /// The caller hides the object first so it is not drawn with stale
    /// content while it waits.
    pub fn release(&mut self, item: T) {
        self.free.push(item);
    }

    /// Number of objects waiting for reuse.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Check if no objects are waiting for reuse.
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}

impl<T> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("free", &self.free.len())
            .finish()
    }
}
