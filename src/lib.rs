// HTTP server modules
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

// Document store
pub mod store;

// Placeholder reply generation and demo data
pub mod generator;
pub mod seed;
