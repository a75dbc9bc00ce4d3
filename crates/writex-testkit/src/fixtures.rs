//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use writex::{Registry, Writex};
use writex_core::{AddressDeriver, DerivationSecret};
use writex_gateway::{MemoryGateway, MemoryLedger};
use writex_store::MemoryStore;

/// Derivation secret used by every fixture and golden vector.
pub const TEST_SECRET: &str = "writex-test-secret";

/// The service type fixtures build.
pub type TestService = Writex<Arc<MemoryStore>, Arc<MemoryGateway>>;

/// A service wired to in-memory collaborators, with handles kept so tests
/// can inspect or sabotage them.
pub struct TestFixture {
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<MemoryGateway>,
    pub ledger: Option<Arc<MemoryLedger>>,
    pub service: TestService,
}

impl TestFixture {
    /// A service with no ledger.
    pub fn new() -> Self {
        Self::build(false)
    }

    /// A service that records publications to a [`MemoryLedger`].
    pub fn with_ledger() -> Self {
        Self::build(true)
    }

    fn build(ledger: bool) -> Self {
        let store = Arc::new(MemoryStore::new());
        let gateway = Arc::new(MemoryGateway::new());
        let registry = Registry::new(Arc::clone(&store), test_deriver());

        let mut service = Writex::new(registry, Arc::clone(&gateway));
        let ledger = ledger.then(|| Arc::new(MemoryLedger::new()));
        if let Some(ledger) = &ledger {
            service = service.with_ledger(ledger.clone());
        }

        Self {
            store,
            gateway,
            ledger,
            service,
        }
    }

    /// The fixture's ledger. Panics if built without one.
    pub fn ledger(&self) -> &MemoryLedger {
        self.ledger
            .as_deref()
            .expect("fixture was built without a ledger")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Address deriver keyed with [`TEST_SECRET`].
pub fn test_deriver() -> AddressDeriver {
    AddressDeriver::new(test_secret())
}

pub fn test_secret() -> DerivationSecret {
    DerivationSecret::new(TEST_SECRET).expect("test secret is non-empty")
}

/// Hex-encoded Ed25519 public key for a deterministic seed.
pub fn writer_public_key(seed: [u8; 32]) -> String {
    hex::encode(SigningKey::from_bytes(&seed).verifying_key().to_bytes())
}

/// Hex-encoded Ed25519 public key from a fresh random keypair.
pub fn random_public_key() -> String {
    hex::encode(SigningKey::generate(&mut OsRng).verifying_key().to_bytes())
}

/// Distinct deterministic public keys for multi-writer tests.
pub fn multi_writer_keys(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            writer_public_key(seed)
        })
        .collect()
}
