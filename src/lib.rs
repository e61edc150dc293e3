pub mod error;
pub mod validation;
pub mod model;
pub mod db;
pub mod auth;
pub mod chart;
pub mod ops;
pub mod queries;
pub mod state;
pub mod migrate;
pub mod logging;
pub mod config;
pub mod cli;
