//! Request signing and environment guards shared by integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

use ed25519_dalek::{Signer, SigningKey};
use slashhook::interaction::domain::SignatureVerifier;

/// Timestamp sent with every signed test request.
pub const TIMESTAMP: &str = "1700000000";

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Deterministic application key used to sign test requests.
pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[7; 32])
}

/// Hex form of the public half of [`signing_key`].
pub fn public_key_hex() -> String {
    hex::encode(signing_key().verifying_key().as_bytes())
}

/// Verifier matching [`signing_key`].
pub fn verifier() -> SignatureVerifier {
    SignatureVerifier::from_hex(&public_key_hex()).expect("test key should load")
}

/// Signs `timestamp ++ body` and returns the hex signature.
pub fn sign(body: &[u8]) -> String {
    let mut message = TIMESTAMP.as_bytes().to_vec();
    message.extend_from_slice(body);
    hex::encode(signing_key().sign(&message).to_bytes())
}

/// Sets environment variables for the guard lifetime and restores them on drop.
///
/// Guards are serialised through a global mutex so parallel tests do not
/// observe each other's variables.
pub struct ScopedEnv {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    /// Applies `changes`; `None` removes the variable.
    pub fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = env_lock();
        let previous = changes
            .iter()
            .map(|(key, value)| {
                let before = env::var_os(key);
                unsafe {
                    // SAFETY: the global mutex serializes environment mutations in tests.
                    match value {
                        Some(new_value) => env::set_var(key, new_value),
                        None => env::remove_var(key),
                    }
                }
                (OsString::from(key), before)
            })
            .collect();

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, &previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
