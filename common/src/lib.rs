//! Core of the lead-intake form, shared by the browser frontend and the
//! development backend.
//!
//! Nothing in this crate touches the DOM or the network: rendering and
//! transport live in `frontend`, which plugs into the seams declared in
//! [`orchestrator`].

pub mod admission;
pub mod catalog;
pub mod config;
pub mod encoding;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod payload;
