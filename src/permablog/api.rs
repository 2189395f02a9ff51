//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every operation, whatever the front end.
//!
//! It owns the store handle for the life of the process and the settings the
//! read path needs (`max_depth`, indentation). It returns structured
//! [`CmdResult`]s and never prints.
//!
//! `BlogApi<S: RecordStore>` is generic over the backend:
//! - Production: `BlogApi<FileStore>`
//! - Testing: `BlogApi<InMemoryStore>`

use crate::commands;
use crate::config::BlogConfig;
use crate::error::Result;
use crate::store::RecordStore;
use std::path::PathBuf;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, NewComment, NewPost};

pub struct BlogApi<S: RecordStore> {
    store: S,
    config: BlogConfig,
    data_dir: PathBuf,
}

impl<S: RecordStore> BlogApi<S> {
    pub fn new(store: S, config: BlogConfig, data_dir: PathBuf) -> Self {
        Self {
            store,
            config,
            data_dir,
        }
    }

    pub fn create_post(&mut self, new: NewPost) -> Result<CmdResult> {
        commands::post::run(&mut self.store, new)
    }

    pub fn add_comment(&mut self, new: NewComment) -> Result<CmdResult> {
        commands::comment::run(&mut self.store, new)
    }

    pub fn delete_post(&mut self, permalink: &str, user_name: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, permalink, user_name)
    }

    pub fn show_blog(&self, blog_name: &str) -> Result<CmdResult> {
        commands::show::blog(
            &self.store,
            blog_name,
            self.config.max_depth,
            &self.config.render_options(),
        )
    }

    pub fn show_post(&self, permalink: &str) -> Result<CmdResult> {
        commands::show::post(
            &self.store,
            permalink,
            self.config.max_depth,
            &self.config.render_options(),
        )
    }

    /// Reads or writes `config.json`. Changes apply from the next process
    /// start; the running facade keeps the settings it was built with.
    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}
