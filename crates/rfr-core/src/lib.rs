//! # RFR Core
//!
//! Foundation types for overnight-rate curve construction.
//!
//! This crate provides the collaborators a curve bootstrapper consumes but
//! does not own:
//!
//! - **Types**: [`Date`] and [`Tenor`] (period grammar `<n><D|W|M|Y>`)
//! - **Day Count Conventions**: ACT/360 and ACT/365 Fixed year fractions
//! - **Business Day Calendars**: US SOFR, UK, Japan and TARGET holiday rules
//!
//! ## Example
//!
//! ```rust
//! use rfr_core::prelude::*;
//!
//! let trade = Date::from_ymd(2025, 1, 15).unwrap();
//! let tenor: Tenor = "6M".parse().unwrap();
//! let end = trade.add_tenor(tenor).unwrap();
//!
//! let yf = DayCountConvention::Act360.year_fraction(trade, end);
//! assert!(yf > 0.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, Market};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Tenor, TenorUnit};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Tenor, TenorUnit};
