use crate::error::{BlogError, Result};
use crate::model::{IndexedField, Record, RecordId, ScalarField, SequenceField, StoredRecord};
use indexmap::IndexMap;
use std::collections::HashMap;
use uuid::Uuid;

/// An indexed set of documents.
///
/// The primary map is keyed by permalink (the unique index) and keeps
/// insertion order. `by_blog` is the secondary equality index on `blogName`;
/// it only ever holds post permalinks, and since no operation rewrites a
/// post's blog name it never needs to be re-keyed.
#[derive(Debug, Default, Clone)]
pub struct Collection {
    records: IndexMap<String, StoredRecord>,
    by_blog: HashMap<String, Vec<String>>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds both indexes from a flat list of documents, as loaded from disk.
    pub fn from_documents(docs: Vec<StoredRecord>) -> Result<Self> {
        let mut collection = Self::new();
        for doc in docs {
            collection.insert_stored(doc)?;
        }
        Ok(collection)
    }

    pub fn documents(&self) -> impl Iterator<Item = &StoredRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn insert(&mut self, record: Record) -> Result<RecordId> {
        let stored = StoredRecord {
            id: Uuid::new_v4(),
            record,
        };
        let id = stored.id;
        self.insert_stored(stored)?;
        Ok(id)
    }

    fn insert_stored(&mut self, stored: StoredRecord) -> Result<()> {
        let permalink = stored.record.permalink().to_string();
        if self.records.contains_key(&permalink) {
            return Err(BlogError::DuplicateKey(permalink));
        }

        if let Some(blog) = stored.record.blog_name() {
            self.by_blog
                .entry(blog.to_string())
                .or_default()
                .push(permalink.clone());
        }
        self.records.insert(permalink, stored);
        Ok(())
    }

    pub fn get(&self, permalink: &str) -> Option<&Record> {
        self.records.get(permalink).map(|s| &s.record)
    }

    pub fn find_by_field_equals(&self, field: IndexedField, value: &str) -> Vec<Record> {
        match field {
            IndexedField::Permalink => self.get(value).cloned().into_iter().collect(),
            IndexedField::BlogName => self
                .by_blog
                .get(value)
                .map(|permalinks| {
                    permalinks
                        .iter()
                        .filter_map(|p| self.get(p).cloned())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn update_field(&mut self, permalink: &str, field: ScalarField, value: &str) -> bool {
        match self.records.get_mut(permalink) {
            Some(stored) => {
                stored.record.set_field(field, value);
                true
            }
            None => false,
        }
    }

    pub fn append_to_sequence(&mut self, permalink: &str, field: SequenceField, value: &str) -> bool {
        match self.records.get_mut(permalink) {
            Some(stored) => {
                stored.record.push_to(field, value);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comment, Post};

    fn post(blog: &str, permalink: &str) -> Record {
        Record::Post(Post {
            blog_name: blog.into(),
            user_name: "alice".into(),
            title: "t".into(),
            post_body: "b".into(),
            tags: vec![],
            timestamp: "now".into(),
            permalink: permalink.into(),
            comments: vec![],
        })
    }

    fn comment(permalink: &str) -> Record {
        Record::Comment(Comment {
            user_name: "bob".into(),
            permalink: permalink.into(),
            post_body: "c".into(),
            comments: vec![],
        })
    }

    #[test]
    fn permalink_is_unique_across_shapes() {
        let mut c = Collection::new();
        c.insert(post("acme", "shared")).unwrap();
        match c.insert(comment("shared")) {
            Err(BlogError::DuplicateKey(key)) => assert_eq!(key, "shared"),
            other => panic!("Expected DuplicateKey, got {:?}", other),
        }
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn blog_index_only_holds_posts() {
        let mut c = Collection::new();
        c.insert(post("acme", "acme.a")).unwrap();
        c.insert(post("other", "other.a")).unwrap();
        c.insert(comment("2024-01-01T00:00:00Z")).unwrap();
        c.insert(post("acme", "acme.b")).unwrap();

        let found = c.find_by_field_equals(IndexedField::BlogName, "acme");
        let mut permalinks: Vec<_> = found.iter().map(|r| r.permalink()).collect();
        permalinks.sort();
        assert_eq!(permalinks, vec!["acme.a", "acme.b"]);
        assert!(c.find_by_field_equals(IndexedField::BlogName, "nope").is_empty());
    }

    #[test]
    fn find_by_permalink_field() {
        let mut c = Collection::new();
        c.insert(comment("x")).unwrap();
        assert_eq!(c.find_by_field_equals(IndexedField::Permalink, "x").len(), 1);
        assert!(c.find_by_field_equals(IndexedField::Permalink, "y").is_empty());
    }

    #[test]
    fn rebuilding_rejects_duplicate_documents() {
        let doc = StoredRecord {
            id: Uuid::new_v4(),
            record: comment("dup"),
        };
        let result = Collection::from_documents(vec![doc.clone(), doc]);
        assert!(matches!(result, Err(BlogError::DuplicateKey(_))));
    }

    #[test]
    fn updates_miss_quietly() {
        let mut c = Collection::new();
        assert!(!c.update_field("ghost", ScalarField::PostBody, "x"));
        assert!(!c.append_to_sequence("ghost", SequenceField::Comments, "x"));
    }
}
