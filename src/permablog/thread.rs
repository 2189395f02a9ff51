//! # Comment Threads
//!
//! Comments are stored flat: each record only lists the permalinks of its
//! direct replies. [`resolve`] walks those references from a root permalink
//! and builds an owned tree, parent to child only.
//!
//! Two shapes are legal outcomes rather than failures:
//!
//! - a reference that finds no record becomes [`CommentNode::Dangling`]
//! - anything deeper than `max_depth` becomes [`CommentNode::Truncated`]
//!
//! Acyclicity is a property of how comments are written, not something the
//! store can guarantee, so the depth bound is what keeps a corrupted
//! collection from recursing forever.

use crate::error::Result;
use crate::model::Record;
use crate::store::RecordStore;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub user_name: String,
    pub permalink: String,
    pub body: String,
}

impl From<&Record> for CommentView {
    fn from(record: &Record) -> Self {
        Self {
            user_name: record.user_name().to_string(),
            permalink: record.permalink().to_string(),
            body: record.body().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommentNode {
    Resolved {
        view: CommentView,
        replies: Vec<CommentNode>,
    },
    Dangling {
        permalink: String,
    },
    Truncated {
        permalink: String,
    },
}

impl CommentNode {
    pub fn permalink(&self) -> &str {
        match self {
            CommentNode::Resolved { view, .. } => &view.permalink,
            CommentNode::Dangling { permalink } | CommentNode::Truncated { permalink } => permalink,
        }
    }

    pub fn replies(&self) -> &[CommentNode] {
        match self {
            CommentNode::Resolved { replies, .. } => replies,
            _ => &[],
        }
    }

    /// Number of resolved comments in this subtree.
    pub fn count(&self) -> usize {
        match self {
            CommentNode::Resolved { replies, .. } => {
                1 + replies.iter().map(CommentNode::count).sum::<usize>()
            }
            _ => 0,
        }
    }

    /// Levels of resolved comments, this one included.
    pub fn depth(&self) -> usize {
        match self {
            CommentNode::Resolved { replies, .. } => {
                1 + replies.iter().map(CommentNode::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    pub fn is_truncated(&self) -> bool {
        match self {
            CommentNode::Truncated { .. } => true,
            CommentNode::Resolved { replies, .. } => replies.iter().any(CommentNode::is_truncated),
            CommentNode::Dangling { .. } => false,
        }
    }
}

/// Resolves the subtree rooted at `root`. The root is level 1; nodes below
/// level `max_depth` are not looked up.
pub fn resolve<S: RecordStore>(store: &S, root: &str, max_depth: usize) -> Result<CommentNode> {
    resolve_at(store, root, 1, max_depth)
}

fn resolve_at<S: RecordStore>(
    store: &S,
    permalink: &str,
    level: usize,
    max_depth: usize,
) -> Result<CommentNode> {
    if level > max_depth {
        tracing::debug!(permalink, max_depth, "comment thread truncated");
        return Ok(CommentNode::Truncated {
            permalink: permalink.to_string(),
        });
    }

    let Some(record) = store.find_one_by_permalink(permalink)? else {
        tracing::debug!(permalink, "dangling comment reference");
        return Ok(CommentNode::Dangling {
            permalink: permalink.to_string(),
        });
    };

    let replies = record
        .comments()
        .iter()
        .map(|child| resolve_at(store, child, level + 1, max_depth))
        .collect::<Result<Vec<_>>>()?;

    Ok(CommentNode::Resolved {
        view: CommentView::from(&record),
        replies,
    })
}
