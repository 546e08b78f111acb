//! Group-by-and-sum over a single dimension

use serde::Serialize;
use std::collections::HashMap;

use crate::records::{Dimension, DimensionKey, Metric, SalesTable};

/// One group: its key and the summed numeric columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub key: DimensionKey,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub quantity: f64,
}

impl AggregateRow {
    fn empty(key: DimensionKey) -> Self {
        Self {
            key,
            revenue: 0.0,
            cost: 0.0,
            profit: 0.0,
            quantity: 0.0,
        }
    }

    /// Summed value of `metric` for this group
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Revenue => self.revenue,
            Metric::Cost => self.cost,
            Metric::Profit => self.profit,
            Metric::Quantity => self.quantity,
        }
    }
}

/// Sum revenue, cost, profit and quantity per distinct value of `dimension`
///
/// Rows with a missing value form their own [`DimensionKey::Missing`] group.
/// Groups come back ordered by key.
pub fn group_and_sum(table: &SalesTable, dimension: Dimension) -> Vec<AggregateRow> {
    let mut groups: HashMap<DimensionKey, AggregateRow> = HashMap::new();

    for row in table {
        let key = dimension.key(row);
        let entry = groups
            .entry(key.clone())
            .or_insert_with(|| AggregateRow::empty(key));
        entry.revenue += Metric::Revenue.value(row);
        entry.cost += Metric::Cost.value(row);
        entry.profit += Metric::Profit.value(row);
        entry.quantity += Metric::Quantity.value(row);
    }

    let mut result: Vec<_> = groups.into_values().collect();
    result.sort_by(|a, b| a.key.cmp(&b.key));
    result
}
