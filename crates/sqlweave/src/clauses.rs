//! Copy-on-write clause lists.

use std::ops::Deref;
use std::sync::Arc;

/// An ordered clause list shared between builder clones.
///
/// Cloning is a reference-count bump. Appending copies the list only when
/// another builder still holds it, so a parent never sees its fork's clauses.
#[derive(Debug)]
pub(crate) struct Clauses<T>(Arc<Vec<T>>);

impl<T> Clauses<T> {
    pub(crate) fn new() -> Self {
        Self(Arc::new(Vec::new()))
    }

    pub(crate) fn clear(&mut self) {
        self.0 = Arc::new(Vec::new());
    }
}

impl<T: Clone> Clauses<T> {
    pub(crate) fn push(&mut self, item: T) {
        Arc::make_mut(&mut self.0).push(item);
    }

    pub(crate) fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        Arc::make_mut(&mut self.0).extend(items);
    }
}

impl<T> Clone for Clauses<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for Clauses<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Clauses<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fork_does_not_touch_parent() {
        let mut base = Clauses::new();
        base.push("a");

        let mut fork = base.clone();
        assert!(Arc::ptr_eq(&base.0, &fork.0));

        fork.push("b");
        assert_eq!(&*base, &["a"]);
        assert_eq!(&*fork, &["a", "b"]);
    }

    #[test]
    fn unshared_push_is_in_place() {
        let mut list = Clauses::new();
        list.push(1);
        let before = Arc::as_ptr(&list.0);
        list.push(2);
        assert_eq!(before, Arc::as_ptr(&list.0));
        list.clear();
        assert!(list.is_empty());
    }
}
