//! Kuber inventory management backend.
//!
//! REST API for a small-business inventory system: admin authentication,
//! product and category management, image uploads, derived statistics, an
//! append-only activity ledger and an AI chat assistant grounded in live
//! inventory data.
//!
//! # Architecture
//!
//! - Axum web framework over a shared `PostgreSQL` pool
//! - Repositories in [`db`] own all SQL; handlers stay thin
//! - Derived numbers come from [`services::stats`], never stored
//! - Quantity movements append to the ledger in the same transaction as
//!   the product write
//! - OpenRouter for chat completions; absent or failing, chat degrades to
//!   fixed fallback text instead of erroring

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod ai;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
