pub mod app;
pub mod config;
pub mod handler;
pub mod linkify;
pub mod responder;
pub mod transcript;
pub mod tui;
pub mod ui;
