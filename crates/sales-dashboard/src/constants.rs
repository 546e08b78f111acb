//! Centralized constants for the sales dashboard
//!
//! Column names follow the sales export the dashboard is fed with.
//! Deployment-specific settings are loaded from dashboard.toml.

// =============================================================================
// Filters
// =============================================================================

/// Dropdown value meaning "no constraint" for a filter
pub const ALL_SENTINEL: &str = "Todos";

/// English alias for the sentinel, accepted for the month and year filters only
/// so a salesperson or status named "All" stays selectable
pub const ALL_ALIAS: &str = "all";

// =============================================================================
// Display Defaults
// =============================================================================

/// Currency symbol prefixed to every formatted amount
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Number of products in the "top products" chart
pub const DEFAULT_TOP_PRODUCTS: usize = 10;

/// Number of customers in the revenue ranking table
pub const DEFAULT_TOP_CUSTOMERS: usize = 20;

/// Shown in place of a missing dimension value
pub const MISSING_LABEL: &str = "(sem valor)";

// =============================================================================
// Source Columns
// =============================================================================

pub const COL_INVOICE: &str = "NF";
pub const COL_PRODUCT: &str = "Descricao_produto";
pub const COL_PRODUCT_LINE: &str = "Linha";
pub const COL_QUANTITY: &str = "Qtd_Produto";
pub const COL_REVENUE: &str = "Valor_Total_Item";
pub const COL_COST: &str = "Total_Custo_Compra";
pub const COL_PROFIT: &str = "Total_Lucro_Venda_Item";
pub const COL_SALESPERSON: &str = "Vendedor";
pub const COL_CUSTOMER: &str = "Cliente";
pub const COL_YEAR: &str = "Ano";
pub const COL_MONTH: &str = "Mes";
pub const COL_DAY: &str = "Dia";
pub const COL_STATUS: &str = "situacao";

// =============================================================================
// Chart Axes
// =============================================================================

/// Months shown on the monthly chart axis, even without data
pub const MONTH_TICKS: std::ops::RangeInclusive<u32> = 1..=12;

/// Days shown on the daily chart axis, even without data
pub const DAY_TICKS: std::ops::RangeInclusive<u32> = 1..=31;

/// Chart height in pixels
pub const CHART_HEIGHT: u32 = 400;

/// Plot template the UI collaborator should apply
pub const CHART_TEMPLATE: &str = "plotly_white";

/// Hover format for the y value
pub const CHART_HOVER_FORMAT: &str = ":,.2f";

// =============================================================================
// Titles and Labels
// =============================================================================

pub const TITLE_MONTHLY: &str = "Vendas por Mês";
pub const TITLE_PRODUCT_LINE: &str = "Vendas por Linha de Produto";
pub const TITLE_SALESPERSON: &str = "Vendas por Vendedor";

pub const LABEL_REVENUE: &str = "Valor Total de Venda";
pub const LABEL_MONTH: &str = "Mês";
pub const LABEL_DAY: &str = "Dia do Mês";
pub const LABEL_PRODUCT: &str = "Produto";

// =============================================================================
// File Names
// =============================================================================

/// Default config file
pub const CONFIG_FILENAME: &str = "dashboard.toml";

/// Default sales export location
pub const DEFAULT_SALES_CSV: &str = "./data/vendas.csv";

/// Default report directory
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

pub const METRICS_FILENAME: &str = "metrics.csv";
pub const MONTHLY_FILENAME: &str = "monthly_revenue.csv";
pub const DAILY_FILENAME: &str = "daily_revenue.csv";
pub const PRODUCT_LINES_FILENAME: &str = "product_lines.csv";
pub const SALESPEOPLE_FILENAME: &str = "salespeople.csv";
pub const TOP_PRODUCTS_FILENAME: &str = "top_products.csv";
pub const RANKING_FILENAME: &str = "customer_ranking.csv";
pub const LEDGER_FILENAME: &str = "sales_ledger.csv";
pub const CHARTS_FILENAME: &str = "charts.json";
