//! EIP-712 type schema inference.
//!
//! Derives an EIP-712 `types` object from an arbitrary JSON object, so that
//! the object itself can be signed as typed data. Inference is pure and
//! deterministic: two structurally identical objects, with keys in the same
//! insertion order, always produce the same schema.
//!
//! ```
//! use serde_json::json;
//! use typeddata_schema::infer_types;
//!
//! let inferred = infer_types(&json!({ "sub": "1234567890", "iat": 1516239022 }), "JWT").unwrap();
//! assert_eq!(inferred.types.encode_type("JWT").unwrap(), "JWT(string sub,uint32 iat)");
//! ```

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::{InferenceError, UnsupportedReason};

mod infer;
pub use infer::{infer_types, InferredTypes};

mod schema;
pub use schema::{FieldDef, TypeSchema};

mod shape;

mod sol_type;
pub use sol_type::SolType;
