pub mod action;
pub mod config;
pub mod platform;
