//! Storage abstractions for service layer
//!
//! Contains the file-backed list store the catalog persists through.

pub mod json_list_store;
