//! Sales reporting dashboard core
//!
//! Loads invoice line items into an in-memory table, filters them on
//! salesperson, month, year and status, and produces the summary metrics,
//! chart series and customer ranking a dashboard front end displays.
//! Rendering widgets and drawing charts is left to that front end.

pub mod aggregate;
pub mod charts;
pub mod config;
pub mod constants;
pub mod currency;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod loader;
pub mod metrics;
pub mod ranking;
pub mod records;
pub mod reports;

pub use aggregate::{group_and_sum, AggregateRow};
pub use currency::{format_brl, format_currency};
pub use dashboard::{DashboardSession, DashboardView, DisplaySettings};
pub use error::{FilterError, LoadError};
pub use filters::{apply_filters, filter_options, FilterCriteria, FilterOptions};
pub use metrics::{compute, SalesMetrics};
pub use ranking::{build_ranking, customer_ranking, top_n, top_products, RankingEntry};
pub use records::{Dimension, DimensionKey, Metric, SaleRecord, SalesTable};
