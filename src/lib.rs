pub mod api;
pub mod assistant;
pub mod chat;
pub mod cli;
pub mod core;
