//! Deep Research API Library
//!
//! HTTP facade over an external multi-agent research pipeline. One endpoint
//! takes a question and a mode and returns the final report text.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod research;
/// Application context shared with request handlers
pub mod state;
