pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod hinting;
pub mod session;
pub mod status_text;
