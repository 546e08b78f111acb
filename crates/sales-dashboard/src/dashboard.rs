//! Dashboard session and the per-interaction render pass
//!
//! A session is created once per data load and only read afterwards. Loading
//! new data means building a new session. Each filter change runs
//! [`DashboardSession::render`] from scratch; nothing is cached between passes.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;

use crate::charts::{self, ChartSpec};
use crate::constants;
use crate::filters::{apply_filters, filter_options, FilterCriteria, FilterOptions};
use crate::metrics::{self, MetricCard, SalesMetrics};
use crate::ranking::{customer_ranking, RankingEntry};
use crate::records::SalesTable;

/// Presentation settings applied to every render pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySettings {
    pub currency_symbol: String,
    pub top_products: usize,
    pub top_customers: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: constants::DEFAULT_CURRENCY_SYMBOL.to_string(),
            top_products: constants::DEFAULT_TOP_PRODUCTS,
            top_customers: constants::DEFAULT_TOP_CUSTOMERS,
        }
    }
}

/// Loaded sales data plus the options derived from it
pub struct DashboardSession {
    table: Arc<SalesTable>,
    options: FilterOptions,
    settings: DisplaySettings,
    loaded_at: DateTime<Local>,
}

/// Everything one render pass produces, in display order
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub criteria: FilterCriteria,
    pub currency_symbol: String,
    pub generated_at: DateTime<Local>,
    pub metrics: SalesMetrics,
    pub cards: Vec<MetricCard>,
    /// Only present when a month is selected
    pub day_chart: Option<ChartSpec>,
    pub month_chart: ChartSpec,
    pub product_line_chart: ChartSpec,
    pub salesperson_chart: ChartSpec,
    pub top_products_chart: ChartSpec,
    pub customer_ranking: Vec<RankingEntry>,
    /// Rows that passed the filters
    #[serde(skip)]
    pub filtered: SalesTable,
}

impl DashboardView {
    /// Charts in the order they are displayed
    pub fn charts(&self) -> Vec<&ChartSpec> {
        let mut charts: Vec<&ChartSpec> = self.day_chart.iter().collect();
        charts.extend([
            &self.month_chart,
            &self.product_line_chart,
            &self.salesperson_chart,
            &self.top_products_chart,
        ]);
        charts
    }
}

impl DashboardSession {
    pub fn new(table: SalesTable, settings: DisplaySettings) -> Self {
        let options = filter_options(&table);
        tracing::info!(
            rows = table.len(),
            salespeople = options.salespeople.len() - 1,
            customers = options.customers.len() - 1,
            "Dashboard session created"
        );

        Self {
            table: Arc::new(table),
            options,
            settings,
            loaded_at: Local::now(),
        }
    }

    pub fn table(&self) -> &SalesTable {
        &self.table
    }

    /// Shared handle to the loaded table
    pub fn shared_table(&self) -> Arc<SalesTable> {
        Arc::clone(&self.table)
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }

    /// Full recomputation for one set of filter selections
    pub fn render(&self, criteria: &FilterCriteria) -> DashboardView {
        let symbol = self.settings.currency_symbol.as_str();
        let filtered = apply_filters(&self.table, criteria);
        if filtered.is_empty() && !self.table.is_empty() {
            tracing::info!(filters = %criteria.describe(), "No rows match the selected filters");
        }

        let metrics = metrics::compute(&filtered);
        let view = DashboardView {
            criteria: criteria.clone(),
            currency_symbol: symbol.to_string(),
            generated_at: Local::now(),
            metrics,
            cards: metrics.cards(symbol),
            day_chart: charts::day_chart(&filtered, criteria.month),
            month_chart: charts::month_chart(&filtered),
            product_line_chart: charts::product_line_chart(&filtered),
            salesperson_chart: charts::salesperson_chart(&filtered),
            top_products_chart: charts::top_products_chart(&filtered, self.settings.top_products),
            customer_ranking: customer_ranking(&filtered, self.settings.top_customers, symbol),
            filtered,
        };

        tracing::debug!(
            rows = view.filtered.len(),
            charts = view.charts().len(),
            ranked = view.customer_ranking.len(),
            "Rendered dashboard"
        );
        view
    }
}
