//! End-to-end: a minimal custom header, claims with an embedded Sepolia
//! domain, signed as a JSON object and verified as compact data.

use serde_json::json;
use typeddata_jwt::{
    infer_types, jwt, verify_jwt, verify_typed_data_signature, TypedDataDomain, TypedPayload,
    PRIMARY_TYPE,
};
use typeddata_jwt_test_utils::{
    authenticators::account_id_method,
    init_tracing,
    tokens::object,
    users::{typed_data_signer, TEST_CHAIN_ID, TEST_USERS},
};

#[tokio::test]
async fn custom_header_with_sepolia_domain() {
    init_tracing();
    let header = object(json!({ "alg": "X" }));
    let payload = object(json!({ "sub": "1234567890", "domain": { "chainId": 11155111 } }));

    let typed = TypedPayload::new(header.clone(), payload.clone());
    let inferred = infer_types(&typed.to_value(), PRIMARY_TYPE).unwrap();
    assert_eq!(
        inferred.types.encode_type(PRIMARY_TYPE).unwrap(),
        "JWT(JWT_header header,JWT_payload payload)JWT_header(string alg)\
         JWT_payload(string sub,JWT_payload_domain domain)JWT_payload_domain(uint24 chainId)"
    );

    let signer = typed_data_signer(5, None);
    let signature = signer.sign(serde_json::to_vec(&typed).unwrap()).await.unwrap();

    let data = jwt::encode_segments(&header, &payload).unwrap();
    let authenticators = [account_id_method(TEST_USERS[5], TEST_CHAIN_ID)];
    let found = verify_typed_data_signature(&data, &signature, &authenticators, None).unwrap();
    assert_eq!(found.blockchain_account_id, authenticators[0].blockchain_account_id);

    let token = format!("{data}.{signature}");
    verify_jwt(&token, &authenticators, Some(&TypedDataDomain::with_chain_id(TEST_CHAIN_ID)))
        .unwrap();
}
