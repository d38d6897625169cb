//! Test Module
//!
//! Cross-module test suite for the Kaiwa backend.
//!
//! ## Test Categories
//! - `brain_tests`: pipeline properties across normalizer, keywords,
//!   sentiment, classifier, and enhancer
//! - `engine_tests`: response cascade end-to-end over in-memory fakes
//! - `store_tests`: SQLite store CRUD, seeding, and analytics aggregates

pub mod brain_tests;
