//! Bus fare and stage estimation server.
//!
//! Computes fares for intercity bus trips: stage fares between known
//! depots, private charter quotes from a rate card, and blended estimates
//! from a generative model.

pub mod cache;
pub mod config;
pub mod depots;
pub mod domain;
pub mod engine;
pub mod estimate;
pub mod records;
pub mod tariff;
pub mod web;
