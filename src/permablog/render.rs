//! # Rendering
//!
//! Turns resolved posts into a plain-text report. Pure functions: no I/O, no
//! terminal styling (the CLI colors messages, not reports).
//!
//! Each comment is indented by `indent` spaces per level below its post:
//!
//! ```text
//! in Acme
//!
//!     - - - -
//!     title:      Hello World!
//!     userName:   alice
//!     ...
//!     body:
//!         body text
//!
//!         > bob @ 2024-01-01T00:00:00Z
//!           nice post
//!             > carol @ 2024-01-01T00:00:05Z
//!               agreed
//! ```

use crate::blog::PostView;
use crate::thread::CommentNode;
use std::fmt::Write;

pub const DEFAULT_INDENT: usize = 4;
const SEPARATOR: &str = "- - - -";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces added per nesting level.
    pub indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

pub fn render_blog(blog_name: &str, posts: &[PostView], options: &RenderOptions) -> String {
    let mut out = format!("in {}\n", title_case(blog_name));

    if posts.is_empty() {
        out.push_str("\nNo posts found.\n");
        return out;
    }

    for post in posts {
        out.push('\n');
        out.push_str(&render_post(post, options));
    }
    out
}

pub fn render_post(view: &PostView, options: &RenderOptions) -> String {
    let pad = " ".repeat(options.indent);
    let post = &view.post;
    let mut out = String::new();

    let _ = writeln!(out, "{}{}", pad, SEPARATOR);
    let _ = writeln!(out, "{}title:      {}", pad, post.title);
    let _ = writeln!(out, "{}userName:   {}", pad, post.user_name);
    if !post.tags.is_empty() {
        let _ = writeln!(out, "{}tags:       {}", pad, post.tags.join(", "));
    }
    let _ = writeln!(out, "{}timestamp:  {}", pad, post.timestamp);
    let _ = writeln!(out, "{}permalink:  {}", pad, post.permalink);
    let _ = writeln!(out, "{}body:", pad);
    write_body(&mut out, &post.post_body, options.indent * 2);

    if !view.comments.is_empty() {
        out.push('\n');
        for node in &view.comments {
            write_node(&mut out, node, 2, options);
        }
    }
    out
}

fn write_node(out: &mut String, node: &CommentNode, level: usize, options: &RenderOptions) {
    let pad = " ".repeat(options.indent * level);
    match node {
        CommentNode::Resolved { view, replies } => {
            let _ = writeln!(out, "{}> {} @ {}", pad, view.user_name, view.permalink);
            write_body(out, &view.body, options.indent * level + 2);
            for reply in replies {
                write_node(out, reply, level + 1, options);
            }
        }
        CommentNode::Dangling { permalink } => {
            let _ = writeln!(out, "{}> [missing comment {}]", pad, permalink);
        }
        CommentNode::Truncated { permalink } => {
            let _ = writeln!(out, "{}> [... replies truncated at {}]", pad, permalink);
        }
    }
}

fn write_body(out: &mut String, body: &str, width: usize) {
    let pad = " ".repeat(width);
    if body.is_empty() {
        out.push_str(&pad);
        out.push('\n');
        return;
    }
    for line in body.lines() {
        let _ = writeln!(out, "{}{}", pad, line);
    }
}

/// Capitalizes the first letter of every alphabetic run: `my blog` → `My Blog`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
