//! Diversion CLI - command line tools for diversion airport ranking.
//!
//! This crate provides the `divert-rank` binary, which ranks alternates
//! locally from JSON files or posts the request to a running server.

pub mod client;
pub mod fixtures;
pub mod input;

pub use client::DivertClient;
