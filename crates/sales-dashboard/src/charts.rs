//! Chart series and rendering hints for the UI collaborator
//!
//! This module never draws anything. Each [`ChartSpec`] carries the data
//! points, field names, title, label map and style the bar chart should use.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

use crate::aggregate::{group_and_sum, AggregateRow};
use crate::constants;
use crate::ranking::top_products;
use crate::records::{Dimension, DimensionKey, Metric, SalesTable};

/// One bar: x category and y value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: DimensionKey,
    pub y: f64,
}

/// X axis tick behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "values", rename_all = "snake_case")]
pub enum AxisTicks {
    /// Let the renderer choose ticks from the data
    Auto,
    /// Show exactly these ticks, even where there is no data
    Fixed(Vec<u32>),
}

impl AxisTicks {
    fn fixed(range: RangeInclusive<u32>) -> Self {
        AxisTicks::Fixed(range.collect())
    }
}

/// Bar styling shared by every dashboard chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    pub template: String,
    /// Color bars by their y value
    pub color_by_value: bool,
    /// Print the value on each bar
    pub text_auto: bool,
    pub outline_color: String,
    pub outline_width: f64,
    pub hover_background: String,
    pub hover_font_size: u32,
    pub hover_font_family: String,
    /// Format applied to y in the hover box; x is hidden there
    pub hover_y_format: String,
    pub show_legend: bool,
    pub height: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            template: constants::CHART_TEMPLATE.to_string(),
            color_by_value: true,
            text_auto: true,
            outline_color: "black".to_string(),
            outline_width: 1.0,
            hover_background: "white".to_string(),
            hover_font_size: 14,
            hover_font_family: "Arial, sans-serif".to_string(),
            hover_y_format: constants::CHART_HOVER_FORMAT.to_string(),
            show_legend: false,
            height: constants::CHART_HEIGHT,
        }
    }
}

/// Everything the renderer needs to draw one bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_field: String,
    pub y_field: String,
    /// Field name to display name; unlisted fields show their own name
    pub labels: BTreeMap<String, String>,
    pub points: Vec<SeriesPoint>,
    pub x_ticks: AxisTicks,
    pub style: ChartStyle,
}

impl ChartSpec {
    fn bar(title: impl Into<String>, x_field: &str, y_field: &str, labels: &[(&str, &str)]) -> Self {
        Self {
            title: title.into(),
            x_field: x_field.to_string(),
            y_field: y_field.to_string(),
            labels: labels
                .iter()
                .map(|(field, label)| (field.to_string(), label.to_string()))
                .collect(),
            points: Vec::new(),
            x_ticks: AxisTicks::Auto,
            style: ChartStyle::default(),
        }
    }

    fn with_points(mut self, points: Vec<SeriesPoint>) -> Self {
        self.points = points;
        self
    }

    fn with_ticks(mut self, ticks: AxisTicks) -> Self {
        self.x_ticks = ticks;
        self
    }

    /// X axis title
    pub fn x_label(&self) -> &str {
        self.labels.get(&self.x_field).map_or(&self.x_field, |label| label)
    }

    /// Y axis title
    pub fn y_label(&self) -> &str {
        self.labels.get(&self.y_field).map_or(&self.y_field, |label| label)
    }
}

// =============================================================================
// Series
// =============================================================================

/// Revenue per month, one point for each of months 1-12 (zero when absent)
///
/// Rows with a missing or out-of-range month have no place on this axis.
pub fn monthly_revenue(table: &SalesTable) -> Vec<SeriesPoint> {
    dense_series(table, Dimension::Month, constants::MONTH_TICKS)
}

/// Revenue per day of `month`, one point for each of days 1-31
///
/// Returns `None` when no month is selected: the daily breakdown only makes
/// sense within a single month.
pub fn daily_revenue(table: &SalesTable, month: Option<u32>) -> Option<Vec<SeriesPoint>> {
    let month = month?;
    let in_month = table.retain_where(|row| row.month == Some(month));
    Some(dense_series(&in_month, Dimension::Day, constants::DAY_TICKS))
}

fn dense_series(table: &SalesTable, dimension: Dimension, ticks: RangeInclusive<u32>) -> Vec<SeriesPoint> {
    let totals: HashMap<i64, f64> = group_and_sum(table, dimension)
        .into_iter()
        .filter_map(|group| group.key.as_number().map(|n| (n, group.revenue)))
        .collect();

    ticks
        .map(|tick| {
            let x = i64::from(tick);
            SeriesPoint {
                x: DimensionKey::Number(x),
                y: totals.get(&x).copied().unwrap_or(0.0),
            }
        })
        .collect()
}

fn revenue_points(groups: Vec<AggregateRow>) -> Vec<SeriesPoint> {
    groups
        .into_iter()
        .map(|group| SeriesPoint {
            x: group.key,
            y: group.revenue,
        })
        .collect()
}

// =============================================================================
// Charts
// =============================================================================

/// Monthly revenue chart with all twelve month ticks
pub fn month_chart(table: &SalesTable) -> ChartSpec {
    ChartSpec::bar(
        constants::TITLE_MONTHLY,
        constants::COL_MONTH,
        constants::COL_REVENUE,
        &[
            (constants::COL_MONTH, constants::LABEL_MONTH),
            (constants::COL_REVENUE, constants::LABEL_REVENUE),
        ],
    )
    .with_points(monthly_revenue(table))
    .with_ticks(AxisTicks::fixed(constants::MONTH_TICKS))
}

/// Daily revenue chart for the selected month, with all 31 day ticks
pub fn day_chart(table: &SalesTable, month: Option<u32>) -> Option<ChartSpec> {
    let points = daily_revenue(table, month)?;
    let month = month?;

    Some(
        ChartSpec::bar(
            format!("Vendas por Dia - Mês {}", month),
            constants::COL_DAY,
            constants::COL_REVENUE,
            &[
                (constants::COL_DAY, constants::LABEL_DAY),
                (constants::COL_REVENUE, constants::LABEL_REVENUE),
            ],
        )
        .with_points(points)
        .with_ticks(AxisTicks::fixed(constants::DAY_TICKS)),
    )
}

/// Revenue per product line
pub fn product_line_chart(table: &SalesTable) -> ChartSpec {
    ChartSpec::bar(
        constants::TITLE_PRODUCT_LINE,
        Dimension::ProductLine.field_name(),
        Metric::Revenue.field_name(),
        &[(constants::COL_REVENUE, constants::LABEL_REVENUE)],
    )
    .with_points(revenue_points(group_and_sum(table, Dimension::ProductLine)))
}

/// Revenue per salesperson
pub fn salesperson_chart(table: &SalesTable) -> ChartSpec {
    ChartSpec::bar(
        constants::TITLE_SALESPERSON,
        Dimension::Salesperson.field_name(),
        Metric::Revenue.field_name(),
        &[(constants::COL_REVENUE, constants::LABEL_REVENUE)],
    )
    .with_points(revenue_points(group_and_sum(table, Dimension::Salesperson)))
}

/// The `n` best-selling products by revenue, highest first
pub fn top_products_chart(table: &SalesTable, n: usize) -> ChartSpec {
    ChartSpec::bar(
        format!("Top {} Produtos Mais Vendidos", n),
        constants::COL_PRODUCT,
        constants::COL_REVENUE,
        &[
            (constants::COL_PRODUCT, constants::LABEL_PRODUCT),
            (constants::COL_REVENUE, constants::LABEL_REVENUE),
        ],
    )
    .with_points(revenue_points(top_products(table, n)))
}
