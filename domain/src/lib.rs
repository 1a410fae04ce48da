//! Business operations for the meeting summarizer: transcript extraction,
//! AI summary generation and summary delivery over email.
//!
//! Operations take an explicit [`service::config::Config`] and build their
//! provider gateway clients from it per call. Nothing in this crate touches
//! HTTP status codes; failures are reported through [`error::Error`] and
//! translated at the web layer.

pub mod emails;
pub mod error;
pub mod gateway;
pub mod summaries;
pub mod transcripts;
