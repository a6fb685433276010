//! Read-through caching and aggregation over the TMDB media catalog.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;
