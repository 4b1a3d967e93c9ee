//! Daybook - Diary Journaling Backend Core
//!
//! This crate implements the voice-diary completion flow: structured
//! time-of-day diary entries, a guided question loop, and AI-assisted
//! analysis through pluggable collaborator ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
