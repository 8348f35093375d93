//! Tutoring session booking core.
//!
//! Students request sessions with tutors, tutors accept or reject them,
//! either side cancels ahead of time, a scheduled sweep completes sessions
//! whose time has passed, and students review completed sessions to build
//! each tutor's reputation.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
