//! Top-N rankings by a summed metric

use serde::Serialize;

use crate::aggregate::{group_and_sum, AggregateRow};
use crate::currency::format_currency;
use crate::records::{Dimension, Metric, SalesTable};

/// One line of a ranking table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    /// 1-based, contiguous
    pub rank: usize,
    pub name: String,
    pub value: String,
}

/// Groups of `dimension` sorted by `metric` descending, at most `n` of them
///
/// The sort is stable, so groups with equal totals keep key order.
pub fn top_n(table: &SalesTable, dimension: Dimension, metric: Metric, n: usize) -> Vec<AggregateRow> {
    let mut groups = group_and_sum(table, dimension);
    groups.sort_by(|a, b| b.metric(metric).total_cmp(&a.metric(metric)));
    groups.truncate(n);
    groups
}

/// Best-selling products by revenue
pub fn top_products(table: &SalesTable, n: usize) -> Vec<AggregateRow> {
    top_n(table, Dimension::Product, Metric::Revenue, n)
}

/// Top `n` values of `dimension` by revenue, ranked 1..k with formatted amounts
pub fn build_ranking(table: &SalesTable, dimension: Dimension, n: usize, symbol: &str) -> Vec<RankingEntry> {
    top_n(table, dimension, Metric::Revenue, n)
        .into_iter()
        .enumerate()
        .map(|(i, group)| RankingEntry {
            rank: i + 1,
            name: group.key.to_string(),
            value: format_currency(group.revenue, symbol),
        })
        .collect()
}

/// Customer revenue ranking shown below the charts
pub fn customer_ranking(table: &SalesTable, n: usize, symbol: &str) -> Vec<RankingEntry> {
    build_ranking(table, Dimension::Customer, n, symbol)
}
