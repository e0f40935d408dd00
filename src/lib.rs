pub mod app_state;
pub mod auth;
pub mod config;
pub mod constants;
pub mod db;
pub mod errors;
pub mod generator;
pub mod handlers;
pub mod importer;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub mod test_utils;
