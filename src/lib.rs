//! Headless core of the admin back office: list screens, moderation actions,
//! the pack editor and permission-gated tabs, driven over the admin REST API.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
