//! Types for communication between the frontend and the hunter backend.

pub mod id;
pub mod request;
pub mod response;

pub use id::HunterId;

/// The local storage key holding the active hunter's id.
pub const HUNTER_ID_STORAGE_KEY: &str = "hunter_id";
