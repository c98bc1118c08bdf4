//! Service layer for the product catalog.
//! - `storage` holds the JSON file primitive.
//! - `catalog` implements CRUD and validation on top of it.
//! - Errors are typed so callers can branch on the failure kind.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod catalog;
