//! Core library for the Taller client.
//!
//! Configuration, the request client, local storage and the session manager.
//! Shared by the terminal UI and the command line.

pub mod api;
pub mod config;
pub mod logging;
pub mod messages;
pub mod models;
pub mod notify;
pub mod session;
pub mod storage;
pub mod users;
