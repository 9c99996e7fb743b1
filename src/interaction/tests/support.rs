//! Signing keys, payload builders and mocks shared by interaction tests.

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use mockall::mock;
use serde_json::{Value, json};

use crate::command::domain::HandlerSignature;
use crate::command::ports::{CommandHandler, HandlerResult};
use crate::interaction::domain::{
    CommandArguments, InteractionContext, InteractionResponse, SignatureVerifier,
};

pub const TIMESTAMP: &str = "1700000000";

mock! {
    pub Handler {}

    #[async_trait]
    impl CommandHandler for Handler {
        fn signature(&self) -> HandlerSignature;
        async fn handle(
            &self,
            context: InteractionContext,
            arguments: CommandArguments,
        ) -> HandlerResult<Option<InteractionResponse>>;
    }
}

pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[7; 32])
}

pub fn other_signing_key() -> SigningKey {
    SigningKey::from_bytes(&[9; 32])
}

pub fn verifier() -> SignatureVerifier {
    SignatureVerifier::from_bytes(signing_key().verifying_key().as_bytes())
        .expect("derived key should be valid")
}

pub fn sign_with(key: &SigningKey, timestamp: &str, body: &[u8]) -> String {
    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(body);
    hex::encode(key.sign(&message).to_bytes())
}

pub fn sign(body: &[u8]) -> String {
    sign_with(&signing_key(), TIMESTAMP, body)
}

pub fn ping_body() -> Vec<u8> {
    json!({"id": "1", "type": 1, "application_id": "app", "token": "tok"})
        .to_string()
        .into_bytes()
}

pub fn command_body(name: &str, options: Value, resolved: Value) -> Vec<u8> {
    json!({
        "id": "42",
        "type": 2,
        "application_id": "app",
        "token": "tok",
        "channel_id": "900",
        "data": {
            "id": "7",
            "name": name,
            "options": options,
            "resolved": resolved,
        },
    })
    .to_string()
    .into_bytes()
}
