//! EIP-712 typed-data signatures for JWTs.
//!
//! A JWT's decoded `{ header, payload }` is signed as EIP-712 typed data,
//! with the type schema inferred from the JSON itself and the domain taken
//! from `payload.domain` or configured on the signer. Verification recovers
//! the signer address and matches it against a list of DID verification
//! methods.
//!
//! ```no_run
//! use serde_json::json;
//! use typeddata_jwt::{verify_jwt, SignerKey, TypedDataDomain, TypedDataSigner, VerificationMethod};
//!
//! # async fn example() -> Result<(), typeddata_jwt::Error> {
//! let signer = TypedDataSigner::from_key(
//!     SignerKey::Hex("0x0123456789012345678901234567890123456789012345678901234567890123".into()),
//!     Some(TypedDataDomain::with_chain_id(11155111)),
//! )?;
//!
//! let header = json!({ "alg": "EthTypedDataSignature", "typ": "JWT" });
//! let claims = json!({ "sub": "1234567890", "iat": 1516239022 });
//! let token = signer
//!     .sign_jwt(header.as_object().unwrap().clone(), claims.as_object().unwrap().clone())
//!     .await?;
//!
//! let methods = [VerificationMethod::new(
//!     "did:example:123#controller",
//!     "EcdsaSecp256k1RecoveryMethod2020",
//!     "did:example:123",
//! )
//! .with_blockchain_account_id(format!("eip155:11155111:{}", signer.address()))];
//! let method = verify_jwt(&token, &methods, None)?;
//! assert_eq!(method.controller, "did:example:123");
//! # Ok(())
//! # }
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

mod algorithm;
pub use algorithm::{EthTypedDataAlgorithm, JwtSigner, SignerOutput, ALGORITHM_NAME};

mod config;
pub use config::{load_string, load_string_opt, ConfigError, DEFAULT_DOMAIN_ENV_PREFIX};

mod domain;
pub use domain::{parse_chain_id, TypedDataDomain};

mod error;
pub use error::{DecodeError, Error};

pub mod jwt;

mod method;
pub use method::{VerificationMethod, VALID_VERIFICATION_METHOD_TYPES};

mod payload;
pub use payload::{TypedPayload, PLACEHOLDER_SIGNATURE, PRIMARY_TYPE};

mod signer;
pub use signer::{LocalSignerKey, SignerKey, TypedDataSigner};

mod verify;
pub use verify::{recover_typed_data_signer, verify_jwt, verify_typed_data_signature};

pub use typeddata_schema::{infer_types, InferenceError, InferredTypes, TypeSchema};
