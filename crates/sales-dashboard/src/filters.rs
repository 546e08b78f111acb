//! Filter criteria and the dropdown options that feed them
//!
//! Each of the four filters is either a concrete value or unset. Unset
//! filters let every row through; set ones require exact equality with the
//! value in the data.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants;
use crate::error::FilterError;
use crate::records::{Dimension, DimensionKey, SaleRecord, SalesTable};

/// Equality constraints on salesperson, month, year and status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub salesperson: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub status: Option<String>,
}

/// Whether a dropdown selection means "no constraint"
pub fn is_sentinel(selection: &str) -> bool {
    let selection = selection.trim();
    selection.is_empty() || selection.eq_ignore_ascii_case(constants::ALL_SENTINEL)
}

/// Text selection, kept verbatim so it compares equal to the listed option
fn selected(selection: &str) -> Option<&str> {
    (!is_sentinel(selection)).then_some(selection)
}

/// Numeric selection; also accepts the `all` alias, which no number can collide with
fn selected_number(selection: &str) -> Option<&str> {
    selected(selection)
        .map(str::trim)
        .filter(|raw| !raw.eq_ignore_ascii_case(constants::ALL_ALIAS))
}

impl FilterCriteria {
    /// Criteria that match every row
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Build criteria from raw dropdown selections, where `Todos` means unset
    pub fn from_selections(
        salesperson: &str,
        month: &str,
        year: &str,
        status: &str,
    ) -> Result<Self, FilterError> {
        let month = match selected_number(month) {
            Some(raw) => {
                let value: u32 = raw
                    .parse()
                    .map_err(|_| FilterError::InvalidMonth(raw.to_string()))?;
                if !constants::MONTH_TICKS.contains(&value) {
                    return Err(FilterError::MonthOutOfRange(value));
                }
                Some(value)
            }
            None => None,
        };

        let year = match selected_number(year) {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|_| FilterError::InvalidYear(raw.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            salesperson: selected(salesperson).map(str::to_string),
            month,
            year,
            status: selected(status).map(str::to_string),
        })
    }

    pub fn is_unconstrained(&self) -> bool {
        self.salesperson.is_none() && self.month.is_none() && self.year.is_none() && self.status.is_none()
    }

    /// Whether `row` satisfies every active constraint
    pub fn matches(&self, row: &SaleRecord) -> bool {
        fn text_eq(wanted: &Option<String>, actual: &Option<String>) -> bool {
            wanted.as_ref().is_none_or(|w| actual.as_deref() == Some(w.as_str()))
        }

        text_eq(&self.salesperson, &row.salesperson)
            && self.month.is_none_or(|m| row.month == Some(m))
            && self.year.is_none_or(|y| row.year == Some(y))
            && text_eq(&self.status, &row.status)
    }

    /// Human-readable summary, e.g. `Vendedor=Ana, Mes=5`
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(salesperson) = &self.salesperson {
            parts.push(format!("{}={}", constants::COL_SALESPERSON, salesperson));
        }
        if let Some(month) = self.month {
            parts.push(format!("{}={}", constants::COL_MONTH, month));
        }
        if let Some(year) = self.year {
            parts.push(format!("{}={}", constants::COL_YEAR, year));
        }
        if let Some(status) = &self.status {
            parts.push(format!("{}={}", constants::COL_STATUS, status));
        }

        if parts.is_empty() {
            constants::ALL_SENTINEL.to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Narrow `table` to the rows matching `criteria`
///
/// Unconstrained criteria return the table unchanged. An empty result is valid.
pub fn apply_filters(table: &SalesTable, criteria: &FilterCriteria) -> SalesTable {
    if criteria.is_unconstrained() {
        return table.clone();
    }

    let filtered = table.retain_where(|row| criteria.matches(row));
    tracing::debug!(
        before = table.len(),
        after = filtered.len(),
        filters = %criteria.describe(),
        "Applied filters"
    );
    filtered
}

// =============================================================================
// Dropdown Options
// =============================================================================

/// Dropdown choices, each list starting with the `Todos` sentinel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub salespeople: Vec<String>,
    pub months: Vec<String>,
    pub years: Vec<String>,
    pub statuses: Vec<String>,
    pub customers: Vec<String>,
}

/// Distinct values per filterable column, in order of first appearance
///
/// Missing values are left out since an equality filter cannot select them.
pub fn filter_options(table: &SalesTable) -> FilterOptions {
    FilterOptions {
        salespeople: distinct_values(table, Dimension::Salesperson),
        months: distinct_values(table, Dimension::Month),
        years: distinct_values(table, Dimension::Year),
        statuses: distinct_values(table, Dimension::Status),
        customers: distinct_values(table, Dimension::Customer),
    }
}

fn distinct_values(table: &SalesTable, dimension: Dimension) -> Vec<String> {
    let mut seen: HashSet<DimensionKey> = HashSet::new();
    let mut values = vec![constants::ALL_SENTINEL.to_string()];

    for row in table {
        let key = dimension.key(row);
        if key.is_missing() || seen.contains(&key) {
            continue;
        }
        values.push(key.to_string());
        seen.insert(key);
    }

    values
}
