pub mod access;
pub mod config;
pub mod error;
pub mod output;
pub mod profile;
pub mod scoring;
pub mod service;
pub mod store;
