//! Par OIS quotes.
//!
//! Quotes arrive as tenor label → par rate in percent and are stored as
//! fractions (`4.5` → `0.045`). Each quote keeps the label it was given so
//! errors can name it exactly as the caller wrote it.

use serde::{Deserialize, Serialize};

use rfr_core::{CoreError, Tenor};

use crate::error::{CurveError, CurveResult};

/// A par OIS quote.
///
/// Deserializes from `{"label": ..., "rate": ...}`; the tenor is always
/// parsed from the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuoteRecord")]
pub struct Quote {
    /// Tenor label as supplied, e.g. "12M".
    pub label: String,
    /// Parsed tenor.
    pub tenor: Tenor,
    /// Par rate as a fraction (0.045 = 4.5%).
    pub rate: f64,
}

impl Quote {
    /// Creates a quote from a tenor label and a fractional rate.
    pub fn new(label: impl Into<String>, rate: f64) -> CurveResult<Self> {
        let label = label.into();
        let tenor = parse_tenor(&label)?;
        Ok(Self {
            label: label.trim().to_string(),
            tenor,
            rate,
        })
    }

    /// Creates a quote from a tenor label and a rate in percent.
    pub fn from_percent(label: impl Into<String>, rate_percent: f64) -> CurveResult<Self> {
        Self::new(label, rate_percent / 100.0)
    }

    /// Par rate in percent.
    #[must_use]
    pub fn rate_percent(&self) -> f64 {
        self.rate * 100.0
    }
}

/// Serialized form of a quote; any `tenor` field is ignored.
#[derive(Deserialize)]
struct QuoteRecord {
    label: String,
    rate: f64,
}

impl TryFrom<QuoteRecord> for Quote {
    type Error = CurveError;

    fn try_from(record: QuoteRecord) -> CurveResult<Self> {
        Self::new(record.label, record.rate)
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={:.4}%", self.label, self.rate_percent())
    }
}

fn parse_tenor(label: &str) -> CurveResult<Tenor> {
    label.parse().map_err(|e: CoreError| match e {
        CoreError::InvalidTenor { reason, .. } => CurveError::invalid_tenor(label, reason),
        other => CurveError::from(other),
    })
}

/// An ordered collection of quotes.
///
/// Input order is preserved; the bootstrapper sorts by maturity itself.
///
/// # Example
///
/// ```rust
/// use rfr_curves::quotes::QuoteSet;
///
/// let quotes = QuoteSet::from_pairs([("1W", 1.0), ("1M", 1.5), ("1Y", 4.0)]).unwrap();
/// assert_eq!(quotes.len(), 3);
/// assert!((quotes.get("1Y").unwrap().rate - 0.04).abs() < 1e-15);
///
/// let parsed = QuoteSet::parse_list("1W=1.0, 1M=1.5, 1Y=4.0").unwrap();
/// assert_eq!(parsed, quotes);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSet {
    quotes: Vec<Quote>,
}

impl QuoteSet {
    /// Creates an empty quote set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a quote set from (tenor label, rate in percent) pairs.
    ///
    /// Accepts any iterator of pairs, including the iteration of a map.
    pub fn from_pairs<I, S>(pairs: I) -> CurveResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let quotes = pairs
            .into_iter()
            .map(|(label, rate)| Quote::from_percent(label.as_ref(), rate))
            .collect::<CurveResult<Vec<_>>>()?;
        Ok(Self { quotes })
    }

    /// Parses `"1W=1.0,1M=1.5,..."` (rates in percent).
    pub fn parse_list(text: &str) -> CurveResult<Self> {
        let mut quotes = Vec::new();
        for item in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (label, rate) = item.split_once('=').ok_or_else(|| {
                CurveError::config(format!("expected TENOR=RATE, found '{item}'"))
            })?;
            let rate: f64 = rate.trim().parse().map_err(|_| {
                CurveError::config(format!("invalid rate '{}' for {}", rate.trim(), label.trim()))
            })?;
            quotes.push(Quote::from_percent(label, rate)?);
        }
        Ok(Self { quotes })
    }

    /// Appends a quote.
    pub fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// Appends a quote, builder style.
    #[must_use]
    pub fn with(mut self, quote: Quote) -> Self {
        self.quotes.push(quote);
        self
    }

    /// Finds a quote by its label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.label.eq_ignore_ascii_case(label.trim()))
    }

    /// Iterates over the quotes in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.quotes.iter()
    }

    /// Number of quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if there are no quotes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl<'a> IntoIterator for &'a QuoteSet {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}

impl FromIterator<Quote> for QuoteSet {
    fn from_iter<T: IntoIterator<Item = Quote>>(iter: T) -> Self {
        Self {
            quotes: iter.into_iter().collect(),
        }
    }
}
