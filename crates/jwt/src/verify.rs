use crate::{
    domain::resolve_verification_domain, Error, TypedDataDomain, TypedPayload, VerificationMethod,
    PLACEHOLDER_SIGNATURE,
};
use alloy::primitives::{Address, Signature};
use std::str::FromStr;
use tracing::{debug, instrument, trace};

/// Verify a typed-data signature over `header.payload` compact data and
/// return the first authenticator that matches the recovered signer.
///
/// The domain is `domain_override` if given, else the domain embedded at
/// `payload.domain`, else the empty domain. Every failure, whether the data
/// is malformed, the signature does not recover, or nothing matches, is
/// reported as [`Error::InvalidSignature`].
#[instrument(skip_all, fields(authenticators = authenticators.len()))]
pub fn verify_typed_data_signature<'a>(
    data: &str,
    signature: &str,
    authenticators: &'a [VerificationMethod],
    domain_override: Option<&TypedDataDomain>,
) -> Result<&'a VerificationMethod, Error> {
    if !authenticators.iter().any(VerificationMethod::has_identifier) {
        debug!("no authenticator carries an address");
        return Err(Error::InvalidSignature);
    }

    let (recovered, domain) =
        recover_typed_data_signer(data, signature, domain_override).map_err(|error| {
            debug!(%error, "signer recovery failed");
            Error::InvalidSignature
        })?;

    let chain_id = domain.chain_id_string();
    authenticators
        .iter()
        .find(|method| method.matches(recovered, chain_id.as_deref()))
        .inspect(|method| debug!(%recovered, method = %method.id, "signature verified"))
        .ok_or_else(|| {
            debug!(%recovered, ?chain_id, "no authenticator matches the recovered signer");
            Error::InvalidSignature
        })
}

/// Verify a complete `header.payload.signature` token. See
/// [`verify_typed_data_signature`].
pub fn verify_jwt<'a>(
    token: &str,
    authenticators: &'a [VerificationMethod],
    domain_override: Option<&TypedDataDomain>,
) -> Result<&'a VerificationMethod, Error> {
    let (data, signature) = token.rsplit_once('.').ok_or(Error::InvalidSignature)?;
    verify_typed_data_signature(data, signature, authenticators, domain_override)
}

/// Recover the address that signed `header.payload` data, along with the
/// domain the signature was checked under.
///
/// Unlike [`verify_typed_data_signature`], errors are returned as they occur.
pub fn recover_typed_data_signer(
    data: &str,
    signature: &str,
    domain_override: Option<&TypedDataDomain>,
) -> Result<(Address, TypedDataDomain), Error> {
    let payload = TypedPayload::from_token(&format!("{data}.{PLACEHOLDER_SIGNATURE}"))?;
    let (payload, domain) = resolve_verification_domain(payload, domain_override)?;
    let hash = payload.typed_data(&domain)?.eip712_signing_hash()?;
    trace!(%hash, "computed typed-data hash");

    let signature = Signature::from_str(&format!("0x{signature}"))?;
    let recovered = signature.recover_address_from_prehash(&hash)?;
    Ok((recovered, domain))
}
