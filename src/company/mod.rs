// Public API - what other modules can use
pub use handlers::{create_company, delete_company, get_company, patch_company};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
