//! Market conventions for overnight index swaps.
//!
//! A [`Conventions`] record fixes the calendar (through the market), the day
//! count and the settlement lag used to turn tenor quotes into dated
//! instruments. [`ConventionsRegistry`] looks records up by index name.
//!
//! # Built-in indices
//!
//! | Index | Market | Day count | Settlement days |
//! |-------|--------|-----------|-----------------|
//! | SOFR  | US     | ACT/360   | 2 |
//! | SONIA | UK     | ACT/365F  | 0 |
//! | TONA  | JP     | ACT/365F  | 2 |
//! | ESTR  | EU     | ACT/360   | 2 |
//!
//! # Example
//!
//! ```rust
//! use rfr_curves::conventions::ConventionsRegistry;
//!
//! let registry = ConventionsRegistry::from_json(
//!     r#"{"SOFR": {"market": "US", "settlement_days": 2}}"#,
//! ).unwrap();
//!
//! let sofr = registry.get("sofr").unwrap();
//! assert_eq!(sofr.settlement_days, 2);
//! assert_eq!(sofr.day_count.name(), "ACT/360");
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use rfr_core::calendars::{Calendar, Market};
use rfr_core::daycounts::DayCountConvention;

use crate::error::{CurveError, CurveResult};

/// Conventions of one overnight index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// Index name, e.g. "SOFR".
    pub index: String,
    /// Market identifier; selects the holiday calendar.
    pub market: Market,
    /// Day count for accruals and curve times.
    pub day_count: DayCountConvention,
    /// Business days between the evaluation date and swap start.
    pub settlement_days: u32,
}

impl Conventions {
    /// Creates conventions with the market's default day count.
    #[must_use]
    pub fn new(index: impl Into<String>, market: Market, settlement_days: u32) -> Self {
        Self {
            index: index.into(),
            market,
            day_count: market.default_day_count(),
            settlement_days,
        }
    }

    /// Overrides the day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Holiday calendar of the market.
    #[must_use]
    pub fn calendar(&self) -> &'static dyn Calendar {
        self.market.calendar()
    }

    /// SOFR: US government securities calendar, ACT/360, T+2.
    #[must_use]
    pub fn sofr() -> Self {
        Self::new("SOFR", Market::US, 2)
    }

    /// SONIA: UK settlement calendar, ACT/365F, T+0.
    #[must_use]
    pub fn sonia() -> Self {
        Self::new("SONIA", Market::UK, 0)
    }

    /// TONA: Japan calendar, ACT/365F, T+2.
    #[must_use]
    pub fn tona() -> Self {
        Self::new("TONA", Market::JP, 2)
    }

    /// €STR: TARGET calendar, ACT/360, T+2.
    #[must_use]
    pub fn estr() -> Self {
        Self::new("ESTR", Market::EU, 2)
    }
}

/// JSON record as stored in conventions files; the index name is the key.
#[derive(Debug, Deserialize)]
struct ConventionsRecord {
    market: Market,
    settlement_days: u32,
    #[serde(default)]
    day_count: Option<DayCountConvention>,
}

/// Conventions keyed by index name, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ConventionsRegistry {
    entries: HashMap<String, Arc<Conventions>>,
}

impl ConventionsRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding SOFR, SONIA, TONA and ESTR.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for conventions in [
            Conventions::sofr(),
            Conventions::sonia(),
            Conventions::tona(),
            Conventions::estr(),
        ] {
            registry.insert(conventions);
        }
        registry
    }

    /// Parses a JSON object of `{"INDEX": {"market": .., "settlement_days": ..}}`.
    ///
    /// `day_count` may be given per record; it defaults from the market.
    pub fn from_json(json: &str) -> CurveResult<Self> {
        let records: HashMap<String, ConventionsRecord> = serde_json::from_str(json)
            .map_err(|e| CurveError::config(format!("invalid conventions JSON: {e}")))?;

        let mut registry = Self::new();
        for (index, record) in records {
            let mut conventions = Conventions::new(index, record.market, record.settlement_days);
            if let Some(day_count) = record.day_count {
                conventions.day_count = day_count;
            }
            registry.insert(conventions);
        }
        Ok(registry)
    }

    /// Loads a registry from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> CurveResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CurveError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Adds or replaces the conventions for an index.
    pub fn insert(&mut self, conventions: Conventions) {
        self.entries
            .insert(conventions.index.to_uppercase(), Arc::new(conventions));
    }

    /// Adds every entry of `other`, replacing entries with the same name.
    #[must_use]
    pub fn merge(mut self, other: ConventionsRegistry) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Looks up conventions by index name.
    pub fn get(&self, index: &str) -> CurveResult<Arc<Conventions>> {
        self.entries
            .get(&index.trim().to_uppercase())
            .cloned()
            .ok_or_else(|| CurveError::missing_convention(index))
    }

    /// Returns true if the index is registered.
    #[must_use]
    pub fn contains(&self, index: &str) -> bool {
        self.entries.contains_key(&index.trim().to_uppercase())
    }

    /// Registered index names, sorted.
    #[must_use]
    pub fn indices(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
