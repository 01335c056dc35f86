//! Basket — the ordered symbol → display-name mapping.

use serde::{Deserialize, Serialize};

/// One basket member: an opaque market symbol and its human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketEntry {
    pub symbol: String,
    pub name: String,
}

/// The fixed basket of instruments for a run.
///
/// Entry order is configuration order and defines output order; symbols
/// are unique within a basket (enforced at config validation).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Basket {
    entries: Vec<BasketEntry>,
}

impl Basket {
    pub fn new(entries: Vec<BasketEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BasketEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.symbol.as_str())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.iter().any(|e| e.symbol == symbol)
    }
}
