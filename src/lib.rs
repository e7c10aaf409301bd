//! Vahan: driver-behavior and vehicle-maintenance dashboard
//!
//! Talks to a remote prediction service when logged in, and generates
//! consistent demo data from a single confidence value otherwise.

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod demo;
pub mod events;
pub mod logging;
pub mod session;
