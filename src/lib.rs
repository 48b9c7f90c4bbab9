//! QuestPulse - Question Lifecycle & Personalization Engine
//!
//! This crate turns a stream of free-text analytics questions into a
//! per-user decaying relevance profile over a fixed set of pillars,
//! drives an asynchronous clarification protocol for ambiguous questions,
//! and aggregates question history into a weekly trend digest.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
