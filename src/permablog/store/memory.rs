use super::collection::Collection;
use super::RecordStore;
use crate::error::Result;
use crate::model::{IndexedField, Record, RecordId, ScalarField, SequenceField};

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    collection: Collection,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryStore {
    fn insert(&mut self, record: Record) -> Result<RecordId> {
        self.collection.insert(record)
    }

    fn find_by_field_equals(&self, field: IndexedField, value: &str) -> Result<Vec<Record>> {
        Ok(self.collection.find_by_field_equals(field, value))
    }

    fn find_one_by_permalink(&self, permalink: &str) -> Result<Option<Record>> {
        Ok(self.collection.get(permalink).cloned())
    }

    fn update_field(&mut self, permalink: &str, field: ScalarField, value: &str) -> Result<bool> {
        Ok(self.collection.update_field(permalink, field, value))
    }

    fn append_to_sequence(
        &mut self,
        permalink: &str,
        field: SequenceField,
        value: &str,
    ) -> Result<bool> {
        Ok(self.collection.append_to_sequence(permalink, field, value))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.collection.len())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Comment, Post};
    use crate::permalink::post_permalink;

    /// Builds stores by writing records directly, bypassing the commands, so
    /// tests can lay out shapes the commands would never produce (dangling
    /// references, cycles).
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_post(mut self, blog: &str, title: &str) -> Self {
            let post = Post {
                blog_name: blog.to_string(),
                user_name: "alice".to_string(),
                title: title.to_string(),
                post_body: format!("Body of {}", title),
                tags: vec![],
                timestamp: "2024-01-01 00:00:00".to_string(),
                permalink: post_permalink(blog, title),
                comments: vec![],
            };
            self.store.insert(post.into()).unwrap();
            self
        }

        /// Inserts a comment and links it under `parent`.
        pub fn with_reply(self, parent: &str, permalink: &str, user: &str) -> Self {
            self.with_orphan(permalink, user).link(parent, permalink)
        }

        /// Inserts a comment without linking it anywhere.
        pub fn with_orphan(mut self, permalink: &str, user: &str) -> Self {
            let comment = Comment {
                user_name: user.to_string(),
                permalink: permalink.to_string(),
                post_body: format!("{} says hi", user),
                comments: vec![],
            };
            self.store.insert(comment.into()).unwrap();
            self
        }

        /// Appends `child` to `parent.comments` whether or not `child` exists.
        pub fn link(mut self, parent: &str, child: &str) -> Self {
            self.store
                .append_to_sequence(parent, SequenceField::Comments, child)
                .unwrap();
            self
        }
    }
}
