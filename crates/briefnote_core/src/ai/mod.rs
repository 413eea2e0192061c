//! AI text-generation boundary.
//!
//! # Responsibility
//! - Wrap the single external generative-text endpoint behind a trait seam.
//! - Build the instruction prompts for summary and title generation.
//!
//! # Invariants
//! - Each service call issues at most one outbound request: no retries, no
//!   caching, no batching.
//! - Failures never cross the service boundary; callers receive a fixed
//!   fallback string instead.

pub mod gemini;
pub mod summary_service;
