//! quizmark-core: quiz grading engine, answer normalization, and tutoring analytics.
//!
//! This crate defines the canonical question and answer model, the pure
//! grading engine, and the analytics that are derived from graded attempts.

pub mod config;
pub mod error;
pub mod grading;
pub mod homework;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod planner;
pub mod report;
pub mod statistics;
pub mod timing;
