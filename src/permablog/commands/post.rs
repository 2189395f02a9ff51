use crate::commands::{CmdMessage, CmdResult, NewPost};
use crate::error::Result;
use crate::model::{Post, Record};
use crate::permalink::{normalize_blog_name, post_permalink};
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &mut S, new: NewPost) -> Result<CmdResult> {
    let blog_name = normalize_blog_name(&new.blog_name);
    let permalink = post_permalink(&blog_name, &new.title);

    let post = Post {
        blog_name,
        user_name: new.user_name,
        title: new.title,
        post_body: new.body,
        tags: new.tags,
        timestamp: new.timestamp,
        permalink: permalink.clone(),
        comments: Vec::new(),
    };

    let id = store.insert(Record::Post(post.clone()))?;
    tracing::debug!(%id, permalink = %permalink, "post created");

    let mut result = CmdResult::default().with_affected_records(vec![Record::Post(post)]);
    result.add_message(CmdMessage::success(format!("Post created: {}", permalink)));
    Ok(result)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::BlogError;
    use crate::model::IndexedField;
    use crate::store::memory::InMemoryStore;

    pub(crate) fn hello_world() -> NewPost {
        NewPost {
            blog_name: "acme".into(),
            user_name: "alice".into(),
            title: "Hello World!".into(),
            body: "body text".into(),
            tags: vec!["x".into(), "y".into()],
            timestamp: "t1".into(),
        }
    }

    #[test]
    fn creates_post_with_derived_permalink() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, hello_world()).unwrap();
        assert_eq!(result.affected_records[0].permalink(), "acme.Hello_World_");

        let found = store
            .find_by_field_equals(IndexedField::BlogName, "acme")
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].permalink(), "acme.Hello_World_");

        let post = found[0].as_post().unwrap();
        assert_eq!(post.tags, vec!["x", "y"]);
        assert_eq!(post.timestamp, "t1");
        assert!(post.comments.is_empty());
    }

    #[test]
    fn normalizes_blog_name() {
        let mut store = InMemoryStore::new();
        let mut new = hello_world();
        new.blog_name = "ACME".into();
        run(&mut store, new).unwrap();

        let post = store
            .find_one_by_permalink("acme.Hello_World_")
            .unwrap()
            .unwrap();
        assert_eq!(post.blog_name(), Some("acme"));
    }

    #[test]
    fn duplicate_title_is_rejected() {
        let mut store = InMemoryStore::new();
        run(&mut store, hello_world()).unwrap();

        let mut again = hello_world();
        again.body = "different body".into();
        match run(&mut store, again) {
            Err(BlogError::DuplicateKey(key)) => assert_eq!(key, "acme.Hello_World_"),
            other => panic!("Expected DuplicateKey, got {:?}", other),
        }

        assert_eq!(store.len().unwrap(), 1);
        let kept = store
            .find_one_by_permalink("acme.Hello_World_")
            .unwrap()
            .unwrap();
        assert_eq!(kept.body(), "body text");
    }
}
