//! Remote data access: fetching the serialized model artifact.

pub mod fetch;

pub use fetch::*;
