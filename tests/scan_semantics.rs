//! Enumeration semantics of the bounded prefix probe.
//!
//! The campaign contract exposes no count query; the scanner probes ids
//! sequentially and treats the first absence as the end of the record
//! space. These tests pin that contract down against an in-memory record
//! source.

use std::sync::atomic::{AtomicU64, Ordering};

use crowdfund_client::campaigns::scanner::scan_prefix;
use crowdfund_client::campaigns::types::Campaign;
use crowdfund_client::chain::types::ChainError;

use alloy::primitives::{Address, U256};

fn record(id: u64) -> Campaign {
    Campaign {
        id,
        title: format!("Campaign {}", id),
        creator: Address::repeat_byte(0x42),
        goal_wei: U256::from(2_000_000_000_000_000_000u64),
        collected_wei: U256::from(500_000_000_000_000_000u64),
        deadline: 1_767_225_600,
        finalized: false,
    }
}

/// A store holding records for ids `0..len`, counting every probe.
struct DenseStore {
    len: u64,
    probes: AtomicU64,
}

impl DenseStore {
    fn new(len: u64) -> Self {
        Self { len, probes: AtomicU64::new(0) }
    }

    async fn fetch(&self, id: u64) -> Result<Campaign, ChainError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if id < self.len {
            Ok(record(id))
        } else {
            Err(ChainError::NotFound)
        }
    }
}

#[tokio::test]
async fn scan_returns_dense_prefix_in_order() {
    let store = DenseStore::new(5);
    let found = scan_prefix(20, |id| store.fetch(id)).await;

    let ids: Vec<u64> = found.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn scan_stops_at_first_absence_without_probing_further() {
    let store = DenseStore::new(3);
    let found = scan_prefix(20, |id| store.fetch(id)).await;

    assert_eq!(found.len(), 3);
    // Probes 0, 1, 2 succeeded and probe 3 terminated the scan; the
    // remaining 16 ids under the ceiling were never queried.
    assert_eq!(store.probes.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn scan_is_capped_by_the_configured_ceiling() {
    // More records exist than the ceiling allows; the scan must not look
    // past the bound.
    let store = DenseStore::new(100);
    let found = scan_prefix(20, |id| store.fetch(id)).await;

    assert_eq!(found.len(), 20);
    assert_eq!(store.probes.load(Ordering::SeqCst), 20);
}

#[tokio::test]
async fn rescan_without_mutation_is_identical() {
    let store = DenseStore::new(7);
    let first = scan_prefix(20, |id| store.fetch(id)).await;
    let second = scan_prefix(20, |id| store.fetch(id)).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_store_yields_empty_projection() {
    let store = DenseStore::new(0);
    let found = scan_prefix(20, |id| store.fetch(id)).await;

    assert!(found.is_empty());
    assert_eq!(store.probes.load(Ordering::SeqCst), 1);
}
