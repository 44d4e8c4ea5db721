// src/lib.rs

//! hoops_crawler library
//!
//! Turns a season label and a date window into one row per player per game
//! by walking basketball-reference schedule and box score pages.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
