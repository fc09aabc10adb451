//! triolingo-core — Quiz state machine, score store, and lesson model.
//!
//! This crate defines the data model, the lesson repository format, and the
//! quiz and scoring logic that the TrioLingo front ends build on.

pub mod catalog;
pub mod error;
pub mod glossary;
pub mod model;
pub mod parser;
pub mod quiz;
pub mod route;
pub mod score;
pub mod traits;
