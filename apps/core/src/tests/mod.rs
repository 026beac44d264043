//! Test Module
//!
//! Cross-component test suite for the intent detection core.
//!
//! ## Test Categories
//! - `detector_tests`: End-to-end detections through the orchestrator
//! - `escalation_tests`: Async re-ranking path with mock collaborators
//! - `property_tests`: Invariants over a corpus of messages
//! - `config_tests`: Environment and file configuration

pub mod config_tests;
pub mod property_tests;
