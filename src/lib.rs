// src/lib.rs

//! Digital library catalog: article search, filtering, pagination,
//! citations, reviews, reading history and translation over a JSON fixture.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
