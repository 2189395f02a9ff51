use crate::blog::PostView;
use crate::config::BlogConfig;
use crate::model::Record;
use chrono::{DateTime, Utc};

pub mod comment;
pub mod config;
pub mod delete;
pub mod post;
pub mod show;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records written by the command, as they were written.
    pub affected_records: Vec<Record>,
    pub listed_posts: Vec<PostView>,
    /// Rendered report for read commands.
    pub report: Option<String>,
    /// Comments that were stored but could not be linked to their parent.
    pub orphaned: Vec<String>,
    pub config: Option<BlogConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_posts(mut self, posts: Vec<PostView>) -> Self {
        self.listed_posts = posts;
        self
    }

    pub fn with_report(mut self, report: String) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_config(mut self, config: BlogConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Arguments for creating a post. `blog_name` is normalized by the command.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub blog_name: String,
    pub user_name: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub timestamp: String,
}

/// Arguments for adding a comment under an existing post or comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub parent: String,
    pub user_name: String,
    pub body: String,
    /// Becomes the comment's permalink; callers supply it so ordering is
    /// deterministic.
    pub timestamp: DateTime<Utc>,
}
