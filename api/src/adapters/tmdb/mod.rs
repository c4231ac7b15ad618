//! TMDB adapter
//!
//! Implementation of the TMDB API client.

pub mod client;

pub use client::TmdbClientImpl;
