//! Cogito — a thought journal with a deterministic NLP annotation engine.
//!
//! Every logged entry ("thought") is passed through a rule-based analysis
//! pipeline that derives an emotion label, sentiment, complexity, novelty,
//! a keyword set, and an aggregate importance score. Entries are stored in
//! SQLite and retrieved through a CLI or a JSON web API.
//!
//! # Architecture
//!
//! - **Analysis**: pure, deterministic keyword/feature scoring — no models,
//!   no network, same output for the same input every time
//! - **Storage**: SQLite with FTS5 for free-text search, WAL mode, and a
//!   forward-only migration gate
//! - **Surfaces**: clap CLI subcommands and an axum JSON API
//! - **Chat**: pluggable provider (deterministic mock or any
//!   OpenAI-compatible endpoint) whose turns are logged like any thought
//!
//! # Modules
//!
//! - [`analysis`] — the annotation pipeline: lexicon, tokenizer, emotion,
//!   sentiment, complexity/novelty, importance aggregation
//! - [`config`] — configuration loading from TOML files and environment
//!   variables
//! - [`db`] — SQLite initialization, schema, migrations, and health checks
//! - [`thought`] — store, search, stats, and bulk recompute over entries
//! - [`chat`] — provider selection and the interactive session
//! - [`server`] / [`api`] — the JSON web surface

pub mod analysis;
pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod db;
pub mod server;
pub mod thought;
