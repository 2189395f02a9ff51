//! # Permablog Architecture
//!
//! Permablog stores blog posts and arbitrarily deep comment threads as flat
//! documents addressed by **permalink**, a key derived from the content
//! itself rather than an opaque id. It is a library with a CLI client, not a
//! CLI with some library code.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, cli/)                         │
//! │  - Parses arguments and shell lines into typed requests     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store handle and read settings                  │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - post, comment, delete, show, config                      │
//! │  - Read path: blog.rs → thread.rs → render.rs               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore trait over one permalink-keyed collection    │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threads are references, not nesting
//!
//! A post lists the permalinks of its top-level comments; each comment lists
//! the permalinks of its replies. Nothing holds a pointer to anything else.
//! On read, [`thread::resolve`] follows those keys parent-to-child and builds
//! an owned [`thread::CommentNode`] tree, which [`render`] turns into text.
//! Missing keys become leaves; a depth bound stops runaway recursion.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never calls
//! `std::process::exit`. Diagnostics go through `tracing`; the binary decides
//! where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: The operations
//! - [`blog`]: Blog aggregation (posts plus resolved threads)
//! - [`thread`]: Comment thread resolution
//! - [`render`]: Plain-text reports
//! - [`permalink`]: Key derivation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Document types
//! - [`config`]: Configuration
//! - [`error`]: Error types

pub mod api;
pub mod blog;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod permalink;
pub mod render;
pub mod store;
pub mod thread;
