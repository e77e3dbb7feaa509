//! Anonymous identity provisioning.
//!
//! The identity key lives in the simple persistent key store, not the
//! tiered document store, so it survives independently of the main
//! document. A corrupted progress document can be reset without ever
//! losing the identity.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use solfa_storage::KeyValueStore;
use solfa_types::Identity;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Storage key holding only the identity string.
pub const IDENTITY_KEY: &str = "solfa.identity";

/// Produces and persists the stable anonymous identifier for this
/// device.
pub struct IdentityProvider {
    store: Arc<dyn KeyValueStore>,
    cached: Mutex<Option<Identity>>,
}

impl IdentityProvider {
    /// Creates a provider over the given key store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            cached: Mutex::new(None),
        }
    }

    /// Returns the device identity, generating and persisting one on
    /// first use. Idempotent and side-effect-free after the first call.
    ///
    /// If the key store is unusable the freshly generated value is
    /// returned unpersisted; every call in such a session then yields
    /// a new identity, a known limitation of running without storage.
    pub async fn get_identity(&self) -> Identity {
        if let Some(identity) = self.cached.lock().unwrap().clone() {
            return identity;
        }

        match self.store.get(IDENTITY_KEY).await {
            Ok(Some(bytes)) => {
                let token = String::from_utf8_lossy(&bytes).trim().to_string();
                if !token.is_empty() {
                    let identity = Identity::new(token);
                    *self.cached.lock().unwrap() = Some(identity.clone());
                    return identity;
                }
                // An empty record is as good as none; regenerate below.
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "identity storage unreadable, using unpersisted identity");
                return generate_identity();
            }
        }

        let identity = generate_identity();
        match self
            .store
            .set(IDENTITY_KEY, identity.as_str().as_bytes())
            .await
        {
            Ok(()) => *self.cached.lock().unwrap() = Some(identity.clone()),
            Err(e) => {
                warn!(error = %e, "identity not persisted, it will not survive this session");
            }
        }
        identity
    }
}

/// Generates a random 128-bit identity formatted as a UUID.
///
/// Prefers the OS entropy source; if that fails, synthesizes the bytes
/// from a time-seeded generator. Either way the version/variant bits
/// make the output shape-compatible with a standard v4 UUID.
fn generate_identity() -> Identity {
    let mut bytes = [0u8; 16];
    if OsRng.try_fill_bytes(&mut bytes).is_err() {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        StdRng::seed_from_u64(seed).fill_bytes(&mut bytes);
    }
    Identity::from_uuid(uuid::Builder::from_random_bytes(bytes).into_uuid())
}
