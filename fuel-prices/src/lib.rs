//! Spanish fuel price lookup.
//!
//! Answers "where is fuel cheapest around here?" against the Ministry of
//! Industry's public price service: resolve a place or product name to
//! codes, query station prices, and return them cheapest first.

pub mod api;
pub mod cache;
pub mod coerce;
pub mod domain;
pub mod prices;
pub mod resolve;
pub mod text;
