use typeddata_jwt::{verify_typed_data_signature, EthTypedDataAlgorithm, Error, ALGORITHM_NAME};
use typeddata_jwt_test_utils::{
    authenticators::account_id_method,
    init_tracing,
    signers::{AcceptsAnything, RawEcdsaSigner},
    tokens::{DATA_WITHOUT_DOMAIN, DATA_WITH_DOMAIN},
    users::{typed_data_signer, TEST_CHAIN_ID, TEST_SIGNERS, TEST_USERS},
};

#[tokio::test]
async fn signs_through_the_algorithm() {
    init_tracing();
    let signer = typed_data_signer(0, None);

    let signature = EthTypedDataAlgorithm.sign(DATA_WITH_DOMAIN, &signer).await.unwrap();
    let authenticators = [account_id_method(TEST_USERS[0], TEST_CHAIN_ID)];
    verify_typed_data_signature(DATA_WITH_DOMAIN, &signature, &authenticators, None).unwrap();
    assert_eq!(EthTypedDataAlgorithm.name(), ALGORITHM_NAME);
}

#[tokio::test]
async fn signer_errors_propagate() {
    init_tracing();
    let signer = typed_data_signer(0, None);
    assert!(matches!(
        EthTypedDataAlgorithm.sign(DATA_WITHOUT_DOMAIN, &signer).await,
        Err(Error::DomainMissing)
    ));
}

#[tokio::test]
async fn rejects_signer_accepting_anything() {
    init_tracing();
    assert!(matches!(
        EthTypedDataAlgorithm.sign(DATA_WITH_DOMAIN, &AcceptsAnything).await,
        Err(Error::ForeignSigner(_))
    ));
}

#[tokio::test]
async fn rejects_raw_ecdsa_output() {
    init_tracing();
    let signer = RawEcdsaSigner(TEST_SIGNERS[1].clone());
    assert!(matches!(
        EthTypedDataAlgorithm.sign(DATA_WITH_DOMAIN, &signer).await,
        Err(Error::ForeignSigner(_))
    ));
    // malformed input still fails before the output is inspected
    assert!(matches!(EthTypedDataAlgorithm.sign("{}", &signer).await, Err(Error::Decode(_))));
}
