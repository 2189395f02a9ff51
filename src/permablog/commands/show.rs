use crate::blog::{find_post, list_posts};
use crate::commands::CmdResult;
use crate::error::{BlogError, Result};
use crate::permalink::normalize_blog_name;
use crate::render::{render_blog, render_post, RenderOptions};
use crate::store::RecordStore;

pub fn blog<S: RecordStore>(
    store: &S,
    blog_name: &str,
    max_depth: usize,
    options: &RenderOptions,
) -> Result<CmdResult> {
    let posts = list_posts(store, blog_name, max_depth)?;
    let report = render_blog(&normalize_blog_name(blog_name), &posts, options);
    Ok(CmdResult::default()
        .with_report(report)
        .with_listed_posts(posts))
}

pub fn post<S: RecordStore>(
    store: &S,
    permalink: &str,
    max_depth: usize,
    options: &RenderOptions,
) -> Result<CmdResult> {
    let view = find_post(store, permalink, max_depth)?
        .ok_or_else(|| BlogError::NotFound(permalink.to_string()))?;
    let report = render_post(&view, options);
    Ok(CmdResult::default()
        .with_report(report)
        .with_listed_posts(vec![view]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::delete;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn renders_whole_blog() {
        let store = StoreFixture::new()
            .with_post("acme", "Hello World!")
            .with_reply("acme.Hello_World_", "c1", "bob")
            .with_reply("c1", "c2", "carol")
            .store;

        let result = blog(&store, "Acme", 8, &RenderOptions::default()).unwrap();
        let report = result.report.unwrap();
        assert!(report.starts_with("in Acme\n"));
        assert!(report.contains("        > bob @ c1\n"));
        assert!(report.contains("            > carol @ c2\n"));
        assert_eq!(result.listed_posts.len(), 1);
    }

    #[test]
    fn empty_blog_still_reports() {
        let store = StoreFixture::new().store;
        let result = blog(&store, "ghost", 8, &RenderOptions::default()).unwrap();
        assert!(result.report.unwrap().contains("No posts found."));
        assert!(result.listed_posts.is_empty());
    }

    #[test]
    fn tombstoned_post_still_shows_threads() {
        let mut store = StoreFixture::new()
            .with_post("acme", "Hello")
            .with_reply("acme.Hello", "c1", "bob")
            .store;
        delete::run(&mut store, "acme.Hello", "mod").unwrap();

        let report = post(&store, "acme.Hello", 8, &RenderOptions::default())
            .unwrap()
            .report
            .unwrap();
        assert!(report.contains("deleted by mod"));
        assert!(report.contains("> bob @ c1"));
    }

    #[test]
    fn unknown_post_is_not_found() {
        let store = StoreFixture::new().store;
        let err = post(&store, "acme.Nope", 8, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, BlogError::NotFound(_)));
    }
}
