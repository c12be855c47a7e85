//! Giasu - AI tutoring backend for Vietnamese K-12 families and teachers
//!
//! Parents chat with an LLM tutor, teachers generate exercises, lesson plans
//! and tests. Every call is charged against a daily token quota that paid
//! plans raise. Plans are bought by manual bank transfer and approved by an
//! admin.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
