//! Pretrained model artifact: schema, decode-time validation, and evaluation.
//!
//! The model is an opaque, externally-trained collaborator; this module only
//! knows how to decode its serialized form and evaluate it. Training lives
//! elsewhere.

pub mod gbdt;

pub use gbdt::*;
