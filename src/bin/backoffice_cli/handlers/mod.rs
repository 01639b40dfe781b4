#![deny(clippy::all, clippy::pedantic)]

pub mod members;
pub mod packs;
pub mod resource;
pub mod tabs;
pub mod testimonials;
