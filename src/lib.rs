pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod geo;
pub mod output;
pub mod scoring;
pub mod state;
pub mod stderr_buffer;
pub mod tui;
