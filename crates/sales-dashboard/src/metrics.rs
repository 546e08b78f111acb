//! Summary metrics shown at the top of the dashboard

use serde::Serialize;
use std::collections::HashSet;

use crate::currency::{format_currency, format_quantity};
use crate::records::{Metric, SalesTable};

/// Scalar totals over a (usually filtered) table
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SalesMetrics {
    /// Distinct invoice identifiers, not rows
    pub invoice_count: usize,
    pub total_quantity: f64,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
}

/// One metric widget: a label and its display value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

/// Compute the five summary metrics; an empty table yields all zeros
pub fn compute(table: &SalesTable) -> SalesMetrics {
    let mut invoices = HashSet::new();
    let mut metrics = SalesMetrics::default();

    for row in table {
        invoices.insert(row.invoice.as_str());
        metrics.total_quantity += Metric::Quantity.value(row);
        metrics.total_revenue += Metric::Revenue.value(row);
        metrics.total_cost += Metric::Cost.value(row);
        metrics.total_profit += Metric::Profit.value(row);
    }

    metrics.invoice_count = invoices.len();
    metrics
}

impl SalesMetrics {
    /// Widgets in display order, amounts formatted with `symbol`
    pub fn cards(&self, symbol: &str) -> Vec<MetricCard> {
        let card = |label: &str, value: String| MetricCard {
            label: label.to_string(),
            value,
        };

        vec![
            card("Total de Notas", self.invoice_count.to_string()),
            card("Total de Produtos", format_quantity(self.total_quantity)),
            card("Faturamento Total", format_currency(self.total_revenue, symbol)),
            card("Custo Total", format_currency(self.total_cost, symbol)),
            card("Lucro Total", format_currency(self.total_profit, symbol)),
        ]
    }
}
