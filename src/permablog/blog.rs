use crate::error::Result;
use crate::model::{IndexedField, Post};
use crate::permalink::normalize_blog_name;
use crate::store::RecordStore;
use crate::thread::{resolve, CommentNode};
use serde::Serialize;

/// A post with its comment threads resolved, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub post: Post,
    pub comments: Vec<CommentNode>,
}

impl PostView {
    pub fn comment_count(&self) -> usize {
        self.comments.iter().map(CommentNode::count).sum()
    }
}

/// Every post in `blog_name` (case-insensitive), each with its threads
/// resolved in the order the post lists them. Post order is whatever the
/// store returns.
pub fn list_posts<S: RecordStore>(
    store: &S,
    blog_name: &str,
    max_depth: usize,
) -> Result<Vec<PostView>> {
    let blog = normalize_blog_name(blog_name);
    let records = store.find_by_field_equals(IndexedField::BlogName, &blog)?;
    tracing::debug!(blog = %blog, posts = records.len(), "listing blog");

    records
        .into_iter()
        .filter_map(|r| r.into_post())
        .map(|post| resolve_post(store, post, max_depth))
        .collect()
}

/// A single post by permalink. `None` when the permalink is missing or
/// names a comment.
pub fn find_post<S: RecordStore>(
    store: &S,
    permalink: &str,
    max_depth: usize,
) -> Result<Option<PostView>> {
    match store.find_one_by_permalink(permalink)?.and_then(|r| r.into_post()) {
        Some(post) => resolve_post(store, post, max_depth).map(Some),
        None => Ok(None),
    }
}

fn resolve_post<S: RecordStore>(store: &S, post: Post, max_depth: usize) -> Result<PostView> {
    let comments = post
        .comments
        .iter()
        .map(|c| resolve(store, c, max_depth))
        .collect::<Result<Vec<_>>>()?;
    Ok(PostView { post, comments })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn empty_blog_is_empty_list() {
        let store = StoreFixture::new().with_post("acme", "Hello").store;
        assert!(list_posts(&store, "elsewhere", 8).unwrap().is_empty());
    }

    #[test]
    fn lists_every_post_once_with_threads() {
        let store = StoreFixture::new()
            .with_post("acme", "One")
            .with_post("acme", "Two")
            .with_post("other", "Three")
            .with_reply("acme.One", "c1", "bob")
            .with_reply("acme.One", "c2", "carol")
            .with_reply("c1", "c1a", "dave")
            .store;

        let mut posts = list_posts(&store, "acme", 8).unwrap();
        posts.sort_by(|a, b| a.post.permalink.cmp(&b.post.permalink));
        assert_eq!(posts.len(), 2);

        let one = &posts[0];
        assert_eq!(one.post.permalink, "acme.One");
        assert_eq!(one.comments.len(), 2);
        assert_eq!(one.comments[0].permalink(), "c1");
        assert_eq!(one.comments[1].permalink(), "c2");
        assert_eq!(one.comment_count(), 3);

        assert!(posts[1].comments.is_empty());
    }

    #[test]
    fn blog_lookup_is_case_insensitive() {
        let store = StoreFixture::new().with_post("acme", "Hello").store;
        assert_eq!(list_posts(&store, "ACME", 8).unwrap().len(), 1);
    }

    #[test]
    fn find_post_ignores_comments() {
        let store = StoreFixture::new()
            .with_post("acme", "Hello")
            .with_reply("acme.Hello", "c1", "bob")
            .store;

        let view = find_post(&store, "acme.Hello", 8).unwrap().unwrap();
        assert_eq!(view.comment_count(), 1);
        assert!(find_post(&store, "c1", 8).unwrap().is_none());
        assert!(find_post(&store, "acme.Nope", 8).unwrap().is_none());
    }
}
