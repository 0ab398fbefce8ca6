pub mod backend;
pub mod chain;
pub mod client;
pub mod config;
pub mod json_api;
pub mod receipt;
pub mod state;
pub mod view;
