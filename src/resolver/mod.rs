//! Free-text listing resolution.
//!
//! Strategies run from most to least specific. The first strategy that
//! matches anything wins, and the earliest record in store order is
//! returned from its matches.

use crate::models::PropertyRecord;
use crate::store::RecordStore;
use std::fmt;
use tracing::debug;

/// Matching strategy, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ExactId,
    ExactName,
    NameContains,
    AllWords,
}

impl Strategy {
    pub const CASCADE: [Strategy; 4] = [
        Strategy::ExactId,
        Strategy::ExactName,
        Strategy::NameContains,
        Strategy::AllWords,
    ];

    /// Whether `record` satisfies this strategy for an already case-folded query
    fn matches(self, query: &Query<'_>, record: &PropertyRecord) -> bool {
        match self {
            Strategy::ExactId => record.listing_id.trim().to_lowercase() == query.folded,
            Strategy::ExactName => record.property_name.to_lowercase() == query.folded,
            Strategy::NameContains => record.property_name.to_lowercase().contains(&query.folded),
            Strategy::AllWords => {
                let name = record.property_name.to_lowercase();
                query.tokens.iter().all(|t| name.contains(t.as_str()))
            }
        }
    }

    fn applies(self, query: &Query<'_>) -> bool {
        match self {
            Strategy::AllWords => query.tokens.len() > 1,
            _ => true,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::ExactId => "exact id",
            Strategy::ExactName => "exact name",
            Strategy::NameContains => "name contains",
            Strategy::AllWords => "all words",
        };
        f.write_str(name)
    }
}

struct Query<'a> {
    raw: &'a str,
    folded: String,
    tokens: Vec<String>,
}

impl<'a> Query<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let folded = raw.to_lowercase();
        let tokens = folded.split_whitespace().map(str::to_string).collect();
        Some(Self { raw, folded, tokens })
    }
}

/// Resolves free text to at most one listing of a store
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'s> {
    store: &'s RecordStore,
}

impl<'s> Resolver<'s> {
    pub fn new(store: &'s RecordStore) -> Self {
        Self { store }
    }

    /// Best match for `query`, or `None` when nothing matches
    pub fn resolve(&self, query: &str) -> Option<&'s PropertyRecord> {
        self.resolve_with_strategy(query).map(|(record, _)| record)
    }

    /// Like [`resolve`](Self::resolve), also reporting which strategy matched
    pub fn resolve_with_strategy(&self, query: &str) -> Option<(&'s PropertyRecord, Strategy)> {
        let query = Query::parse(query)?;

        for strategy in Strategy::CASCADE {
            if !strategy.applies(&query) {
                continue;
            }
            if let Some(record) = self.store.iter().find(|r| strategy.matches(&query, r)) {
                debug!(
                    "Resolved '{}' to {} via {}",
                    query.raw, record.listing_id, strategy
                );
                return Some((record, strategy));
            }
        }

        debug!("No listing matches '{}'", query.raw);
        None
    }
}
