//! # précis
//!
//! A TUI workspace for text summarisation backed by a remote service.
//!
//! ## Features
//!
//! - **Three input modes**: pasted text, a webpage URL, or the service's
//!   preloaded sample
//! - **Configurable analysis**: extractive and abstractive algorithms, with
//!   optional named-entity and sentiment annotations
//! - **Session history**: every produced summary is kept, newest first, for
//!   the lifetime of the workspace

pub mod client;
pub mod config;
pub mod history;
pub mod options;
pub mod submission;
pub mod ui;

pub use client::AnalysisResult;
pub use config::Config;
pub use history::HistoryLedger;
pub use options::SummarizeOptions;
