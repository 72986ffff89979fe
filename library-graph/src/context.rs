use std::sync::Arc;

use crate::store::AuthorRecord;
use crate::store::BookRecord;
use crate::store::DataStore;

/// Read-only view of the library handed to the resolvers of one request.
///
/// A new context is built for every request. It only holds a reference to
/// the shared [`DataStore`], so building one is an `Arc` clone.
#[derive(Clone, Debug)]
pub struct RequestContext {
    store: Arc<DataStore>,
}

impl RequestContext {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn books(&self) -> &[BookRecord] {
        self.store.books()
    }

    pub fn authors(&self) -> &[AuthorRecord] {
        self.store.authors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_share_one_store() {
        let store = Arc::new(DataStore::default());
        let first = RequestContext::new(store.clone());
        let second = RequestContext::new(store.clone());
        assert!(std::ptr::eq(first.store(), second.store()));
        assert_eq!(first.books(), store.books());
        assert_eq!(second.authors(), store.authors());
    }
}
