use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned document id. Never used for lookups; permalinks are.
pub type RecordId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub blog_name: String,
    pub user_name: String,
    pub title: String,
    pub post_body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub timestamp: String,
    pub permalink: String,
    #[serde(default)]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub user_name: String,
    pub permalink: String,
    pub post_body: String,
    #[serde(default)]
    pub comments: Vec<String>,
}

/// One document in the shared collection.
///
/// Posts and comments live side by side; on disk the only thing telling them
/// apart is whether a `title` is present, so `Post` must stay first in the
/// untagged variant order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Post(Post),
    Comment(Comment),
}

impl Record {
    pub fn permalink(&self) -> &str {
        match self {
            Record::Post(p) => &p.permalink,
            Record::Comment(c) => &c.permalink,
        }
    }

    pub fn user_name(&self) -> &str {
        match self {
            Record::Post(p) => &p.user_name,
            Record::Comment(c) => &c.user_name,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Record::Post(p) => &p.post_body,
            Record::Comment(c) => &c.post_body,
        }
    }

    pub fn comments(&self) -> &[String] {
        match self {
            Record::Post(p) => &p.comments,
            Record::Comment(c) => &c.comments,
        }
    }

    pub fn blog_name(&self) -> Option<&str> {
        match self {
            Record::Post(p) => Some(&p.blog_name),
            Record::Comment(_) => None,
        }
    }

    pub fn as_post(&self) -> Option<&Post> {
        match self {
            Record::Post(p) => Some(p),
            Record::Comment(_) => None,
        }
    }

    pub fn into_post(self) -> Option<Post> {
        match self {
            Record::Post(p) => Some(p),
            Record::Comment(_) => None,
        }
    }
}

impl From<Post> for Record {
    fn from(post: Post) -> Self {
        Record::Post(post)
    }
}

impl From<Comment> for Record {
    fn from(comment: Comment) -> Self {
        Record::Comment(comment)
    }
}

/// A record as it sits in a collection, with the id `insert` handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub record: Record,
}

/// Fields with an equality index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexedField {
    BlogName,
    Permalink,
}

/// Scalar fields that can be overwritten in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    PostBody,
}

/// Ordered-sequence fields that accept appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceField {
    Comments,
}

impl Record {
    pub fn set_field(&mut self, field: ScalarField, value: &str) {
        let slot = match (self, field) {
            (Record::Post(p), ScalarField::PostBody) => &mut p.post_body,
            (Record::Comment(c), ScalarField::PostBody) => &mut c.post_body,
        };
        *slot = value.to_string();
    }

    pub fn push_to(&mut self, field: SequenceField, value: &str) {
        let seq = match (self, field) {
            (Record::Post(p), SequenceField::Comments) => &mut p.comments,
            (Record::Comment(c), SequenceField::Comments) => &mut c.comments,
        };
        seq.push(value.to_string());
    }
}
