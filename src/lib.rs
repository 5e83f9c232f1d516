//! 道路損傷点検ダッシュボード CLI

pub mod cli;
pub mod config;
pub mod dataset;
pub mod editor;
pub mod error;
pub mod export;
pub mod file_store;
pub mod logging;
pub mod render;
