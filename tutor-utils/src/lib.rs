//! Edu Tutor Utility Functions
//!
//! ## Current API
//!
//! - Validate quiz questions
//! - Grade quiz attempts
//! - Generate lessons from a topic
//! - Sync lessons and quizzes to an LMS (simulated)
//!
pub mod attempt;
pub mod error;
pub mod generation;
pub mod lms;
pub mod quiz;
