//! The writer registry: public key to derived address, persisted.

use writex_core::{now_millis, AddressDeriver, WriterAddress, WriterIdentity};
use writex_store::{InsertResult, WriterFilter, WriterStore};

use crate::error::{Result, WritexError};

/// Create-or-fetch registry over a [`WriterStore`].
///
/// The registry owns no connection lifecycle. The store handle is passed
/// in already opened; share it with `Arc<S>` if several registries (or
/// tasks) need the same backend.
pub struct Registry<S: WriterStore> {
    store: S,
    deriver: AddressDeriver,
}

impl<S: WriterStore> Registry<S> {
    pub fn new(store: S, deriver: AddressDeriver) -> Self {
        Self { store, deriver }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Derive the address for `public_key` without touching the store.
    ///
    /// Surrounding whitespace is not part of a key, here or in any other
    /// registry operation.
    pub fn derive(&self, public_key: &str) -> Result<WriterAddress> {
        Ok(self.deriver.derive(public_key.trim())?)
    }

    /// Register `public_key`, or return the existing record unchanged.
    ///
    /// Safe under concurrent calls for the same key: the store's uniqueness
    /// constraint picks one winner and every caller gets the winner's record.
    pub async fn create(&self, public_key: &str) -> Result<WriterIdentity> {
        let public_key = public_key.trim();
        let address = self.derive(public_key)?;

        if let Some(existing) = self.fetch(public_key).await? {
            tracing::debug!(address = %existing.address, "writer already registered");
            return Ok(existing);
        }

        let writer = WriterIdentity::new(public_key, address, now_millis());
        match self.store.insert_writer(&writer).await? {
            InsertResult::Inserted => {
                tracing::info!(id = %writer.id, address = %writer.address, "registered writer");
                Ok(writer)
            }
            InsertResult::AlreadyExists => {
                tracing::warn!(
                    address = %writer.address,
                    "lost registration race, returning existing record"
                );
                self.fetch(public_key).await?.ok_or_else(|| {
                    WritexError::Conflict(format!(
                        "insert for {} reported an existing record that cannot be read",
                        writer.address
                    ))
                })
            }
        }
    }

    /// Full record for `public_key`, if registered.
    pub async fn fetch(&self, public_key: &str) -> Result<Option<WriterIdentity>> {
        let public_key = public_key.trim();
        if public_key.is_empty() {
            return Err(WritexError::Validation("public key must not be empty".into()));
        }
        Ok(self
            .store
            .find_writer(&WriterFilter::PublicKey(public_key.to_string()))
            .await?)
    }

    /// Stored address for `public_key`, or `NotFound`.
    pub async fn fetch_address(&self, public_key: &str) -> Result<WriterAddress> {
        self.fetch(public_key)
            .await?
            .map(|writer| writer.address)
            .ok_or_else(|| {
                WritexError::NotFound(format!("no writer registered for key {}", public_key.trim()))
            })
    }

    /// Record registered under `address`, if any.
    pub async fn find_by_address(&self, address: &WriterAddress) -> Result<Option<WriterIdentity>> {
        Ok(self
            .store
            .find_writer(&WriterFilter::Address(address.clone()))
            .await?)
    }

    /// Number of registered writers.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.store.count_writers().await?)
    }
}
