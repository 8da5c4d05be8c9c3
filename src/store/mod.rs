pub mod bookings;

pub use bookings::{LegacyBookingLog, VisitLog};

use crate::error::StoreError;
use crate::models::{PropertyRecord, PROPERTY_COLUMNS};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// In-memory listing table, read-only once loaded
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<PropertyRecord>,
    by_id: HashMap<String, usize>,
}

impl RecordStore {
    /// Load every listing from a CSV source
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }

        info!("Loading listings from {}", path.display());

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        for column in PROPERTY_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(StoreError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        let records = reader
            .deserialize()
            .collect::<Result<Vec<PropertyRecord>, _>>()?;

        let store = Self::from_records(records)?;
        info!("Loaded {} listings", store.len());
        Ok(store)
    }

    /// Build a store from records already in memory
    pub fn from_records(records: Vec<PropertyRecord>) -> Result<Self, StoreError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let key = record.listing_id.trim().to_lowercase();
            if by_id.insert(key, idx).is_some() {
                return Err(StoreError::DuplicateListing(record.listing_id.clone()));
            }
        }
        debug!("Indexed {} listing ids", by_id.len());
        Ok(Self { records, by_id })
    }

    /// Case-insensitive lookup by listing id
    pub fn get(&self, listing_id: &str) -> Option<&PropertyRecord> {
        self.by_id
            .get(&listing_id.trim().to_lowercase())
            .map(|&idx| &self.records[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
