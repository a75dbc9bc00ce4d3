//! The WriteX service: publish and verify pipelines over the registry.
//!
//! The service is what a transport layer (HTTP handler, CLI, RPC) calls.
//! It owns no I/O of its own; every side effect goes through the registry's
//! store, the storage gateway or the optional ledger.

use std::sync::Arc;

use serde::Serialize;
use writex_core::{now_millis, Commitment, Locator, WriterAddress, WriterIdentity};
use writex_gateway::{GatewayError, Ledger, LedgerEntry, StorageGateway};
use writex_store::WriterStore;

use crate::config::PublishLimits;
use crate::error::{Result, WritexError};
use crate::registry::Registry;

/// Outcome of a successful publish.
///
/// The client keeps `locator` and `commitment`; nothing about the document
/// is persisted by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
    pub locator: Locator,
    pub author: WriterAddress,
    pub commitment: Commitment,
    /// Position assigned by the ledger, when one is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_sequence: Option<u64>,
}

/// Outcome of a verification that reached the stored content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub valid: bool,
}

/// Registry plus publish/verify pipelines.
pub struct Writex<S: WriterStore, G: StorageGateway> {
    registry: Registry<S>,
    gateway: G,
    ledger: Option<Arc<dyn Ledger>>,
    limits: PublishLimits,
}

impl<S: WriterStore, G: StorageGateway> Writex<S, G> {
    /// Create a service without a ledger.
    pub fn new(registry: Registry<S>, gateway: G) -> Self {
        Self {
            registry,
            gateway,
            ledger: None,
            limits: PublishLimits::default(),
        }
    }

    /// Record every publication to `ledger`.
    pub fn with_ledger(mut self, ledger: Arc<dyn Ledger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn with_limits(mut self, limits: PublishLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn registry(&self) -> &Registry<S> {
        &self.registry
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Writers
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a writer, or return the existing registration.
    pub async fn create_writer(&self, public_key: &str) -> Result<WriterIdentity> {
        self.registry.create(public_key).await
    }

    /// Address registered for `public_key`.
    pub async fn fetch_address(&self, public_key: &str) -> Result<WriterAddress> {
        self.registry.fetch_address(public_key).await
    }

    /// Turn a caller-supplied author into an address.
    ///
    /// Input starting with `0x` must be a well-formed [`WriterAddress`].
    /// Anything else is treated as a public key and must already be
    /// registered.
    pub async fn resolve_author(&self, author: &str) -> Result<WriterAddress> {
        match self.claimed_author(author).await? {
            Some(address) => Ok(address),
            None => Err(WritexError::NotFound(format!(
                "no writer registered for key {}",
                author.trim()
            ))),
        }
    }

    /// Like [`resolve_author`](Self::resolve_author), but an unregistered
    /// public key is `None` rather than an error.
    async fn claimed_author(&self, author: &str) -> Result<Option<WriterAddress>> {
        let author = author.trim();
        if author.is_empty() {
            return Err(WritexError::Validation("author must not be empty".into()));
        }

        if author.starts_with("0x") || author.starts_with("0X") {
            return Ok(Some(WriterAddress::parse(author)?));
        }
        Ok(self.registry.fetch(author).await?.map(|writer| writer.address))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Publish
    // ─────────────────────────────────────────────────────────────────────────

    /// Upload `content` and bind it to `author`.
    ///
    /// If the upload succeeds and the ledger write fails, the returned
    /// [`WritexError::Ledger`] carries the locator of the stored content.
    /// The upload is not undone.
    pub async fn publish(&self, author: &str, content: &str, title: &str) -> Result<Publication> {
        self.validate_publish(content, title)?;
        let author = self.resolve_author(author).await?;

        let commitment = Commitment::generate(content.as_bytes(), &author);

        let locator = self
            .gateway
            .put(content, title)
            .await
            .map_err(WritexError::Upload)?;

        tracing::info!(%locator, %author, title, "published document");

        let ledger_sequence = match &self.ledger {
            Some(ledger) => {
                let entry = LedgerEntry {
                    locator: locator.clone(),
                    author: author.clone(),
                    commitment,
                    recorded_at: now_millis(),
                };
                match ledger.record(&entry).await {
                    Ok(ack) => Some(ack.sequence),
                    Err(source) => {
                        tracing::warn!(
                            %locator,
                            error = %source,
                            "ledger write failed after upload; content left without a ledger record"
                        );
                        return Err(WritexError::Ledger { locator, source });
                    }
                }
            }
            None => None,
        };

        Ok(Publication {
            locator,
            author,
            commitment,
            ledger_sequence,
        })
    }

    fn validate_publish(&self, content: &str, title: &str) -> Result<()> {
        if content.is_empty() {
            return Err(WritexError::Validation("content must not be empty".into()));
        }
        if content.len() > self.limits.max_content_bytes {
            return Err(WritexError::Validation(format!(
                "content is {} bytes, limit is {}",
                content.len(),
                self.limits.max_content_bytes
            )));
        }
        if title.trim().is_empty() {
            return Err(WritexError::Validation("title must not be empty".into()));
        }
        let title_len = title.chars().count();
        if title_len > self.limits.max_title_len {
            return Err(WritexError::Validation(format!(
                "title is {} characters, limit is {}",
                title_len, self.limits.max_title_len
            )));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verify
    // ─────────────────────────────────────────────────────────────────────────

    /// Check that the content at `locator` was committed to by `author`.
    ///
    /// A missing document is `NotFound`. A document that exists but does not
    /// match is `Ok(Verification { valid: false })`, and so is a claimed
    /// author that is neither an address nor a registered public key.
    pub async fn verify(&self, locator: &str, author: &str, commitment: &str) -> Result<Verification> {
        let locator = Locator::parse(locator.trim())?;
        let commitment = Commitment::from_hex(commitment.trim())?;
        let author = self.claimed_author(author).await?;

        let content = self.fetch_content(&locator).await?;
        match author {
            Some(author) => Ok(self.check(&locator, &author, &commitment, &content)),
            None => {
                tracing::warn!(%locator, "claimed author is not a registered writer");
                Ok(Verification { valid: false })
            }
        }
    }

    /// Typed form of [`verify`](Self::verify).
    pub async fn verify_document(
        &self,
        locator: &Locator,
        author: &WriterAddress,
        commitment: &Commitment,
    ) -> Result<Verification> {
        let content = self.fetch_content(locator).await?;
        Ok(self.check(locator, author, commitment, &content))
    }

    async fn fetch_content(&self, locator: &Locator) -> Result<String> {
        self.gateway.get(locator).await.map_err(|e| match e {
            GatewayError::NotFound(what) => WritexError::NotFound(format!("no content at {what}")),
            other => WritexError::Fetch(other),
        })
    }

    fn check(
        &self,
        locator: &Locator,
        author: &WriterAddress,
        commitment: &Commitment,
        content: &str,
    ) -> Verification {
        let valid = commitment.verify(content.as_bytes(), author);
        if valid {
            tracing::info!(%locator, %author, "commitment verified");
        } else {
            tracing::warn!(%locator, %author, "commitment does not match");
        }
        Verification { valid }
    }

    /// Like [`verify`](Self::verify), but a mismatch is `ProofMismatch`.
    pub async fn verify_strict(&self, locator: &str, author: &str, commitment: &str) -> Result<()> {
        if self.verify(locator, author, commitment).await?.valid {
            Ok(())
        } else {
            Err(WritexError::ProofMismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use writex_core::{AddressDeriver, DerivationSecret};
    use writex_gateway::{MemoryGateway, MemoryLedger};
    use writex_store::MemoryStore;

    fn service() -> Writex<MemoryStore, Arc<MemoryGateway>> {
        let secret = DerivationSecret::new("writex-test-secret").unwrap();
        let registry = Registry::new(MemoryStore::new(), AddressDeriver::new(secret));
        Writex::new(registry, Arc::new(MemoryGateway::new()))
    }

    #[tokio::test]
    async fn test_resolve_author_accepts_address_or_key() {
        let service = service();
        let writer = service.create_writer("pub123").await.unwrap();

        let by_key = service.resolve_author("pub123").await.unwrap();
        assert_eq!(by_key, writer.address);

        let upper = writer.address.as_str().to_ascii_uppercase().replacen("0X", "0x", 1);
        assert_eq!(service.resolve_author(&upper).await.unwrap(), writer.address);

        assert!(matches!(
            service.resolve_author("unregistered").await,
            Err(WritexError::NotFound(_))
        ));
        assert!(matches!(
            service.resolve_author("  ").await,
            Err(WritexError::Validation(_))
        ));
        assert!(matches!(
            service.resolve_author("0xdeadbeef").await,
            Err(WritexError::Validation(_))
        ));
        assert_eq!(service.resolve_author(" pub123 ").await.unwrap(), writer.address);
    }

    #[tokio::test]
    async fn test_publish_rejects_bad_input_before_upload() {
        let service = service().with_limits(PublishLimits {
            max_content_bytes: 8,
            max_title_len: 4,
        });
        service.create_writer("pub123").await.unwrap();

        for (content, title) in [("", "t"), ("body", ""), ("too much content", "t"), ("body", "title")] {
            let result = service.publish("pub123", content, title).await;
            assert!(
                matches!(result, Err(WritexError::Validation(_))),
                "content={content:?} title={title:?}"
            );
        }
        assert!(service.gateway().is_empty());
    }

    #[tokio::test]
    async fn test_publish_then_verify() {
        let service = service();
        let writer = service.create_writer("pub123").await.unwrap();

        let publication = service
            .publish("pub123", "hello world", "My Post")
            .await
            .unwrap();
        assert_eq!(publication.author, writer.address);
        assert!(publication.ledger_sequence.is_none());

        let verification = service
            .verify(
                publication.locator.as_str(),
                writer.address.as_str(),
                &publication.commitment.to_hex(),
            )
            .await
            .unwrap();
        assert!(verification.valid);
    }

    #[tokio::test]
    async fn test_publish_records_to_ledger() {
        let ledger = Arc::new(MemoryLedger::new());
        let service = service().with_ledger(ledger.clone());
        service.create_writer("pub123").await.unwrap();

        let publication = service.publish("pub123", "hello world", "My Post").await.unwrap();
        assert_eq!(publication.ledger_sequence, Some(1));

        let entries = ledger.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].locator, publication.locator);
        assert_eq!(entries[0].commitment, publication.commitment);
    }

    #[tokio::test]
    async fn test_verify_rejects_malformed_commitment() {
        let service = service();
        let writer = service.create_writer("pub123").await.unwrap();
        let publication = service.publish("pub123", "hello world", "My Post").await.unwrap();

        let result = service
            .verify(publication.locator.as_str(), writer.address.as_str(), "abcd")
            .await;
        assert!(matches!(result, Err(WritexError::Validation(_))));
    }

    #[tokio::test]
    async fn test_verify_claimed_author_kinds() {
        let service = service();
        service.create_writer("pub123").await.unwrap();
        let publication = service.publish("pub123", "hello world", "My Post").await.unwrap();
        let locator = publication.locator.as_str();
        let commitment = publication.commitment.to_hex();

        for unknown in ["pub999", "alice"] {
            let verification = service.verify(locator, unknown, &commitment).await.unwrap();
            assert!(!verification.valid, "{unknown}");
        }

        assert!(matches!(
            service.verify(locator, "0xdeadbeef", &commitment).await,
            Err(WritexError::Validation(_))
        ));

        // Storage misses stay distinguishable from unknown authors.
        assert!(matches!(
            service.verify("QmNoSuchThing", "pub999", &commitment).await,
            Err(WritexError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_verify_strict_mismatch() {
        let service = service();
        service.create_writer("pub123").await.unwrap();
        service.create_writer("pub124").await.unwrap();
        let publication = service.publish("pub123", "hello world", "My Post").await.unwrap();

        let commitment = publication.commitment.to_hex();
        service
            .verify_strict(publication.locator.as_str(), "pub123", &commitment)
            .await
            .unwrap();
        assert!(matches!(
            service
                .verify_strict(publication.locator.as_str(), "pub124", &commitment)
                .await,
            Err(WritexError::ProofMismatch)
        ));
    }

    #[test]
    fn test_publication_json_shape() {
        let publication = Publication {
            locator: Locator::parse("QmTest").unwrap(),
            author: WriterAddress::from_digest([0xab; 32]),
            commitment: Commitment::from_bytes([0x01; 64]),
            ledger_sequence: None,
        };
        let json = serde_json::to_value(&publication).unwrap();
        assert_eq!(json["locator"], "QmTest");
        assert_eq!(json["commitment"].as_str().unwrap().len(), 128);
        assert!(json.get("ledger_sequence").is_none());
    }
}
