use alloy::primitives::Address;
use typeddata_jwt::{VerificationMethod, VALID_VERIFICATION_METHOD_TYPES};

/// A verification method identified by `eip155:<chain_id>:<address>`.
pub fn account_id_method(address: Address, chain_id: u64) -> VerificationMethod {
    method().with_blockchain_account_id(format!("eip155:{chain_id}:{address}"))
}

/// A verification method identified by a bare address.
pub fn address_method(address: Address) -> VerificationMethod {
    method().with_ethereum_address(address.to_string())
}

/// A verification method that carries no address.
pub fn unidentified_method() -> VerificationMethod {
    method()
}

fn method() -> VerificationMethod {
    VerificationMethod::new(
        "did:ethr#controller",
        VALID_VERIFICATION_METHOD_TYPES[1],
        "did:ethr:1234",
    )
}
