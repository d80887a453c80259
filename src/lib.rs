//! Quizgen · quiz sampling and scoring backend
//!
//! The core is synchronous and in-memory:
//!   - `store`   : loads the question dataset once and lists tags
//!   - `sampler` : draws a random, non-repeating quiz for a tag filter
//!   - `scorer`  : single-choice and proportional-credit scoring
//!   - `logic`   : the caller-facing contract built on the three above
//!
//! `routes` exposes that contract over HTTP and WebSocket for a frontend.

pub mod config;
pub mod domain;
pub mod error;
pub mod logic;
pub mod protocol;
pub mod routes;
pub mod sampler;
pub mod scorer;
pub mod state;
pub mod store;
pub mod telemetry;
