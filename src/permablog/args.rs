use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use permablog::api::{NewComment, NewPost};
use permablog::error::{BlogError, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "permablog", version)]
#[command(about = "Blog posts and threaded comments, addressed by permalink", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $PERMABLOG_HOME, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Request(Request),

    /// Get or set configuration
    Config {
        /// Configuration key (max-depth, indent, collection)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Read requests line by line from an interactive prompt
    #[command(alias = "repl")]
    Shell,
}

/// The operations a request line can name, shared by the command line and
/// the interactive shell.
#[derive(Subcommand, Debug)]
pub enum Request {
    /// Create a post
    Post(PostArgs),

    /// Show every post of a blog with its comment threads
    Show(ShowArgs),

    /// Show a single post by permalink
    View {
        permalink: String,
    },

    /// Comment on a post, or reply to a comment
    Comment(CommentArgs),

    /// Replace a post's body with a deletion notice
    #[command(alias = "rm")]
    Delete(DeleteArgs),
}

/// One line typed at the shell prompt.
#[derive(Parser, Debug)]
#[command(name = "request", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    #[command(flatten)]
    Request(Request),

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Args, Debug)]
pub struct PostArgs {
    pub blog_name: String,
    pub user_name: String,
    pub title: String,
    pub body: String,

    /// Comma-separated tags
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Stored as given; defaults to now
    #[arg(long)]
    pub timestamp: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    pub blog_name: String,

    /// Print posts and threads as JSON instead of a report
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Permalink of the post or comment being answered
    pub parent: String,
    pub user_name: String,
    pub body: String,

    /// RFC 3339 instant that becomes the comment's permalink; defaults to now
    #[arg(long)]
    pub timestamp: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub permalink: String,
    pub user_name: String,
}

fn required(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BlogError::Invalid(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| BlogError::Invalid(format!("timestamp {:?} is not RFC 3339: {}", value, e)))
}

impl PostArgs {
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewPost> {
        let tags = self
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Ok(NewPost {
            blog_name: required("blog name", self.blog_name)?,
            user_name: required("user name", self.user_name)?,
            title: self.title,
            body: self.body,
            tags,
            timestamp: self.timestamp.unwrap_or_else(|| now.to_rfc3339()),
        })
    }
}

impl CommentArgs {
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewComment> {
        let timestamp = match self.timestamp.as_deref() {
            Some(ts) => parse_instant(ts)?,
            None => now,
        };
        Ok(NewComment {
            parent: required("parent permalink", self.parent)?,
            user_name: required("user name", self.user_name)?,
            body: self.body,
            timestamp,
        })
    }
}

impl DeleteArgs {
    pub fn validate(self) -> Result<(String, String)> {
        Ok((
            required("permalink", self.permalink)?,
            required("user name", self.user_name)?,
        ))
    }
}
