// src/lib.rs

//! ark-resolver library
//!
//! Resolves Gallica and IRHT manuscript URLs into normalized metadata
//! records.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
