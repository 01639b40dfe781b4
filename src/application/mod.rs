//! Screen logic driving the admin resources.

pub mod access;
pub mod controller;
pub mod error;
pub mod notify;
pub mod pack_editor;
pub mod repos;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
