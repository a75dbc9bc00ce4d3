//! End-to-end publish/verify scenarios over in-memory collaborators.

use writex::gateway::{cid_v0, GatewayError};
use writex::WritexError;
use writex_testkit::{all_vectors, writer_public_key, TestFixture};

#[tokio::test]
async fn create_publish_verify() {
    let fixture = TestFixture::new();
    let service = &fixture.service;

    let writer = service.create_writer("pub123").await.unwrap();
    assert!(writer.address.as_str().starts_with("0x"));
    assert_eq!(writer.address.as_str().len(), 66);

    let publication = service
        .publish("pub123", "hello world", "My Post")
        .await
        .unwrap();
    assert!(publication.locator.as_str().starts_with("Qm"));
    assert_eq!(
        fixture.gateway.title(&publication.locator).as_deref(),
        Some("My Post")
    );

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
async fn golden_vectors_through_the_service() {
    for vector in all_vectors().into_iter().filter(|v| {
        v.secret == writex_testkit::TEST_SECRET && !v.content.is_empty()
    }) {
        let fixture = TestFixture::new();
        let writer = fixture.service.create_writer(vector.public_key).await.unwrap();
        assert_eq!(writer.address.as_str(), vector.expected_address, "{}", vector.name);

        let publication = fixture
            .service
            .publish(vector.public_key, vector.content, "Golden")
            .await
            .unwrap();
        assert_eq!(publication.locator.as_str(), vector.expected_locator);
        assert_eq!(publication.commitment.to_hex(), vector.expected_commitment());
    }
}

#[tokio::test]
async fn publish_by_address_needs_no_registration() {
    let fixture = TestFixture::new();
    let address = fixture.service.registry().derive("pub123").unwrap();

    let publication = fixture
        .service
        .publish(address.as_str(), "hello world", "My Post")
        .await
        .unwrap();
    assert_eq!(publication.author, address);
    assert_eq!(fixture.service.registry().count().await.unwrap(), 0);
}

#[tokio::test]
async fn verify_accepts_public_key_as_author() {
    let fixture = TestFixture::new();
    let key = writer_public_key([0x42; 32]);
    fixture.service.create_writer(&key).await.unwrap();

    let publication = fixture.service.publish(&key, "body", "Title").await.unwrap();
    let verification = fixture
        .service
        .verify(publication.locator.as_str(), &key, &publication.commitment.to_hex())
        .await
        .unwrap();
    assert!(verification.valid);
}

#[tokio::test]
async fn wrong_author_is_invalid_not_missing() {
    let fixture = TestFixture::new();
    fixture.service.create_writer("pub123").await.unwrap();
    let impostor = fixture.service.create_writer("pub124").await.unwrap();

    let publication = fixture
        .service
        .publish("pub123", "hello world", "My Post")
        .await
        .unwrap();

    let verification = fixture
        .service
        .verify(
            publication.locator.as_str(),
            impostor.address.as_str(),
            &publication.commitment.to_hex(),
        )
        .await
        .unwrap();
    assert!(!verification.valid);
}

#[tokio::test]
async fn unregistered_claimed_author_is_invalid() {
    let fixture = TestFixture::new();
    fixture.service.create_writer("pub123").await.unwrap();
    let publication = fixture
        .service
        .publish("pub123", "hello world", "My Post")
        .await
        .unwrap();

    let verification = fixture
        .service
        .verify(
            publication.locator.as_str(),
            "pub999",
            &publication.commitment.to_hex(),
        )
        .await
        .unwrap();
    assert!(!verification.valid);
    assert_eq!(fixture.service.registry().count().await.unwrap(), 1);
}

#[tokio::test]
async fn malformed_claimed_address_is_validation() {
    let fixture = TestFixture::new();
    fixture.service.create_writer("pub123").await.unwrap();
    let publication = fixture
        .service
        .publish("pub123", "hello world", "My Post")
        .await
        .unwrap();

    let result = fixture
        .service
        .verify(
            publication.locator.as_str(),
            "0xdeadbeef",
            &publication.commitment.to_hex(),
        )
        .await;
    assert!(matches!(result, Err(WritexError::Validation(_))));
}

#[tokio::test]
async fn missing_locator_is_not_found() {
    let fixture = TestFixture::new();
    let writer = fixture.service.create_writer("pub123").await.unwrap();
    let never_stored = cid_v0(b"never stored").unwrap();
    let commitment = writex::Commitment::generate(b"never stored", &writer.address);

    let result = fixture
        .service
        .verify(never_stored.as_str(), "pub123", &commitment.to_hex())
        .await;
    assert!(matches!(result, Err(WritexError::NotFound(_))));
}

#[tokio::test]
async fn tampered_content_is_invalid() {
    let fixture = TestFixture::new();
    fixture.service.create_writer("pub123").await.unwrap();
    let publication = fixture
        .service
        .publish("pub123", "hello world", "My Post")
        .await
        .unwrap();

    assert!(fixture.gateway.overwrite(&publication.locator, "hello worle"));

    let verification = fixture
        .service
        .verify(
            publication.locator.as_str(),
            "pub123",
            &publication.commitment.to_hex(),
        )
        .await
        .unwrap();
    assert!(!verification.valid);
}

#[tokio::test]
async fn upload_failure_is_upload_error() {
    let fixture = TestFixture::with_ledger();
    fixture.service.create_writer("pub123").await.unwrap();
    fixture.gateway.set_failing(true);

    let result = fixture.service.publish("pub123", "hello world", "My Post").await;
    assert!(matches!(
        result,
        Err(WritexError::Upload(GatewayError::Unavailable(_)))
    ));
    assert!(fixture.ledger().entries().is_empty());
}

#[tokio::test]
async fn ledger_failure_reports_orphaned_upload() {
    let fixture = TestFixture::with_ledger();
    fixture.service.create_writer("pub123").await.unwrap();
    fixture.ledger().set_failing(true);

    let err = fixture
        .service
        .publish("pub123", "hello world", "My Post")
        .await
        .unwrap_err();

    let locator = err.orphaned_locator().cloned().expect("ledger error carries locator");
    assert!(matches!(err, WritexError::Ledger { .. }));

    // The upload stands and still verifies.
    let address = fixture.service.fetch_address("pub123").await.unwrap();
    let commitment = writex::Commitment::generate(b"hello world", &address);
    let verification = fixture
        .service
        .verify_document(&locator, &address, &commitment)
        .await
        .unwrap();
    assert!(verification.valid);
}

#[tokio::test]
async fn unregistered_public_key_cannot_publish() {
    let fixture = TestFixture::new();
    let result = fixture.service.publish("pub999", "hello world", "My Post").await;
    assert!(matches!(result, Err(WritexError::NotFound(_))));
    assert!(fixture.gateway.is_empty());
}
