//! Guard predicates for controlling the workflow loop.
//!
//! Guards are pure boolean functions evaluated before each iteration. The
//! guessing workflow uses one to decide between asking again and finishing.

use std::fmt;
use std::sync::Arc;

/// Pure predicate over a value of type `T`.
///
/// Guards may be evaluated any number of times; the predicate must be
/// deterministic and free of side effects.
///
/// # Example
///
/// ```rust
/// use humanloop::core::Guard;
///
/// let below_ten = Guard::new(|n: &u32| *n < 10);
///
/// assert!(below_ten.check(&3));
/// assert!(!below_ten.check(&10));
/// ```
pub struct Guard<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
