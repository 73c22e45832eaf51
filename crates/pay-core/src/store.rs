//! # Payment Repository Port
//!
//! Persistence port for payment records. The host application owns the
//! real storage; adapters only call `save` after a status transition.
//! `MemoryRepository` backs tests and the demo server.

use crate::error::{PaymentError, PaymentResult};
use crate::payment::PaymentRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Persistence port for payment records
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Load a record by id
    async fn load(&self, id: &str) -> PaymentResult<PaymentRecord>;

    /// Persist the record (insert or overwrite)
    async fn save(&self, record: &PaymentRecord) -> PaymentResult<()>;
}

/// Type alias for a boxed repository (dynamic dispatch)
pub type BoxedPaymentRepository = Arc<dyn PaymentRepository>;

/// In-memory repository
#[derive(Default)]
pub struct MemoryRepository {
    records: RwLock<HashMap<String, PaymentRecord>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().expect("repository lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PaymentRepository for MemoryRepository {
    async fn load(&self, id: &str) -> PaymentResult<PaymentRecord> {
        self.records
            .read()
            .map_err(|e| PaymentError::Storage(e.to_string()))?
            .get(id)
            .cloned()
            .ok_or_else(|| PaymentError::NotFound {
                payment_id: id.to_string(),
            })
    }

    async fn save(&self, record: &PaymentRecord) -> PaymentResult<()> {
        self.records
            .write()
            .map_err(|e| PaymentError::Storage(e.to_string()))?
            .insert(record.id.clone(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use crate::payment::PaymentStatus;

    #[tokio::test]
    async fn test_save_and_load() {
        let repo = MemoryRepository::new();
        let payment = PaymentRecord::new(19.99, Currency::INR);
        let id = payment.id.clone();

        repo.save(&payment).await.unwrap();
        let loaded = repo.load(&id).await.unwrap();
        assert_eq!(loaded.total, 19.99);
        assert_eq!(loaded.status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_load_missing() {
        let repo = MemoryRepository::new();
        let err = repo.load("nope").await.unwrap_err();
        assert!(matches!(err, PaymentError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let repo = MemoryRepository::new();
        let mut payment = PaymentRecord::new(19.99, Currency::INR);
        repo.save(&payment).await.unwrap();

        payment
            .transition(PaymentStatus::Confirmed, None)
            .unwrap();
        repo.save(&payment).await.unwrap();

        assert_eq!(repo.len(), 1);
        let loaded = repo.load(&payment.id).await.unwrap();
        assert_eq!(loaded.status, PaymentStatus::Confirmed);
    }
}
