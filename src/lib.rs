//! Gator - A command-line RSS aggregator
//!
//! This crate registers users, tracks the feeds they follow, and fetches
//! RSS documents into a normalized structure. Each invocation runs one
//! command through a name-keyed handler table and exits.

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod fetcher;
pub mod handlers;
