//! Report generation (CSV outputs, chart hints JSON and console summary)

use anyhow::{Context, Result};
use csv::Writer;
use std::path::Path;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::charts::ChartSpec;
use crate::constants;
use crate::currency::{format_currency, format_quantity};
use crate::dashboard::DashboardView;

/// Generate all report files for one rendered view
pub fn generate_all_reports(output_dir: &Path, view: &DashboardView) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    generate_metrics(output_dir, view)?;
    generate_series(&output_dir.join(constants::MONTHLY_FILENAME), &view.month_chart)?;
    if let Some(day_chart) = &view.day_chart {
        generate_series(&output_dir.join(constants::DAILY_FILENAME), day_chart)?;
    }
    generate_series(
        &output_dir.join(constants::PRODUCT_LINES_FILENAME),
        &view.product_line_chart,
    )?;
    generate_series(
        &output_dir.join(constants::SALESPEOPLE_FILENAME),
        &view.salesperson_chart,
    )?;
    generate_series(
        &output_dir.join(constants::TOP_PRODUCTS_FILENAME),
        &view.top_products_chart,
    )?;
    generate_ranking(output_dir, view)?;
    generate_ledger(output_dir, view)?;
    generate_chart_hints(output_dir, view)?;

    Ok(())
}

/// Generate metrics.csv (raw and formatted value per metric)
fn generate_metrics(output_dir: &Path, view: &DashboardView) -> Result<()> {
    let path = output_dir.join(constants::METRICS_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(["Filters", "Metric", "Value", "Display"])?;

    let filters = view.criteria.describe();
    let raw = [
        view.metrics.invoice_count as f64,
        view.metrics.total_quantity,
        view.metrics.total_revenue,
        view.metrics.total_cost,
        view.metrics.total_profit,
    ];
    for (card, value) in view.cards.iter().zip(raw) {
        wtr.write_record([
            filters.as_str(),
            &card.label,
            &format!("{:.2}", value),
            &card.value,
        ])?;
    }

    wtr.flush()?;
    println!("  Generated: {}", path.display());

    Ok(())
}

/// Generate one chart's data as x/y columns
fn generate_series(path: &Path, chart: &ChartSpec) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([chart.x_field.as_str(), chart.y_field.as_str()])?;
    for point in &chart.points {
        wtr.write_record([point.x.to_string(), format!("{:.2}", point.y)])?;
    }

    wtr.flush()?;
    println!("  Generated: {}", path.display());

    Ok(())
}

/// Generate customer_ranking.csv
fn generate_ranking(output_dir: &Path, view: &DashboardView) -> Result<()> {
    let path = output_dir.join(constants::RANKING_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(["Ranking", constants::COL_CUSTOMER, constants::COL_REVENUE])?;
    for entry in &view.customer_ranking {
        wtr.write_record([entry.rank.to_string(), entry.name.clone(), entry.value.clone()])?;
    }

    wtr.flush()?;
    println!("  Generated: {}", path.display());

    Ok(())
}

/// Generate sales_ledger.csv (the filtered rows)
fn generate_ledger(output_dir: &Path, view: &DashboardView) -> Result<()> {
    let path = output_dir.join(constants::LEDGER_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record([
        "Date",
        constants::COL_INVOICE,
        constants::COL_CUSTOMER,
        constants::COL_SALESPERSON,
        constants::COL_PRODUCT,
        constants::COL_PRODUCT_LINE,
        constants::COL_QUANTITY,
        constants::COL_REVENUE,
        constants::COL_COST,
        constants::COL_PROFIT,
        constants::COL_STATUS,
    ])?;

    for row in &view.filtered {
        let date = row
            .sale_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());

        wtr.write_record([
            date.as_str(),
            &row.invoice,
            row.customer.as_deref().unwrap_or(""),
            row.salesperson.as_deref().unwrap_or(""),
            row.product.as_deref().unwrap_or(""),
            row.product_line.as_deref().unwrap_or(""),
            &format!("{}", row.quantity),
            &format!("{:.2}", row.revenue),
            &format!("{:.2}", row.cost),
            &format!("{:.2}", row.profit),
            row.status.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    println!("  Generated: {}", path.display());

    Ok(())
}

/// Generate charts.json (data and rendering hints for every chart)
fn generate_chart_hints(output_dir: &Path, view: &DashboardView) -> Result<()> {
    let path = output_dir.join(constants::CHARTS_FILENAME);
    let json = chart_hints_json(view)?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("  Generated: {}", path.display());

    Ok(())
}

/// Chart hints for the view, in display order, as pretty JSON
pub fn chart_hints_json(view: &DashboardView) -> Result<String> {
    Ok(serde_json::to_string_pretty(&view.charts())?)
}

// =============================================================================
// Console Output
// =============================================================================

fn chart_table(chart: &ChartSpec, symbol: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record([chart.x_label(), chart.y_label()]);
    for point in &chart.points {
        builder.push_record([point.x.to_string(), format_currency(point.y, symbol)]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Print the dashboard to the console
pub fn print_summary(view: &DashboardView) {
    let symbol = view.currency_symbol.as_str();

    println!("\n============================================================");
    println!("                    SALES DASHBOARD");
    println!("  Filters: {}", view.criteria.describe());
    println!(
        "  Generated: {}",
        view.generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("============================================================\n");

    println!("METRICS:");
    for card in &view.cards {
        println!("  {:<20} {:>20}", card.label, card.value);
    }

    if view.filtered.is_empty() {
        println!("\nNo sales match the selected filters.");
        println!("============================================================");
        return;
    }

    if let Some(day_chart) = &view.day_chart {
        println!("\n{}", day_chart.title.to_uppercase());
        println!("{}", chart_table(&non_zero(day_chart), symbol));
    }

    for chart in [
        &view.month_chart,
        &view.product_line_chart,
        &view.salesperson_chart,
        &view.top_products_chart,
    ] {
        println!("\n{}", chart.title.to_uppercase());
        println!("{}", chart_table(chart, symbol));
    }

    println!("\nTOP {} CLIENTES POR FATURAMENTO TOTAL", view.customer_ranking.len());
    let mut builder = Builder::default();
    builder.push_record(["Ranking", constants::COL_CUSTOMER, constants::LABEL_REVENUE]);
    for entry in &view.customer_ranking {
        builder.push_record([entry.rank.to_string(), entry.name.clone(), entry.value.clone()]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);

    println!(
        "\n  {} row(s), {} unit(s)",
        view.filtered.len(),
        format_quantity(view.metrics.total_quantity)
    );
    println!("============================================================");
}

/// Day charts have 31 ticks; the console only lists days with sales
fn non_zero(chart: &ChartSpec) -> ChartSpec {
    let mut chart = chart.clone();
    chart.points.retain(|point| point.y != 0.0);
    chart
}
