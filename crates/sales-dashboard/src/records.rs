//! Sales line items, the in-memory table and the typed column accessors
//!
//! Group-by columns are reached through [`Dimension`] and summed columns
//! through [`Metric`], so no column is ever looked up by name at runtime.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::constants;

/// One invoice line item from the sales export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "NF")]
    pub invoice: String,
    #[serde(rename = "Descricao_produto", default)]
    pub product: Option<String>,
    #[serde(rename = "Linha", default)]
    pub product_line: Option<String>,
    #[serde(rename = "Qtd_Produto", default, deserialize_with = "empty_as_zero")]
    pub quantity: f64,
    #[serde(rename = "Valor_Unitario", default)]
    pub unit_price: Option<f64>,
    #[serde(rename = "Valor_Total_Item", default, deserialize_with = "empty_as_zero")]
    pub revenue: f64,
    #[serde(rename = "Total_Custo_Compra", default, deserialize_with = "empty_as_zero")]
    pub cost: f64,
    #[serde(rename = "Total_Lucro_Venda_Item", default, deserialize_with = "empty_as_zero")]
    pub profit: f64,
    #[serde(rename = "Vendedor", default)]
    pub salesperson: Option<String>,
    #[serde(rename = "Cliente", default)]
    pub customer: Option<String>,
    #[serde(rename = "Ano", default, deserialize_with = "whole_number")]
    pub year: Option<i32>,
    #[serde(rename = "Mes", default, deserialize_with = "whole_number")]
    pub month: Option<u32>,
    #[serde(rename = "Dia", default, deserialize_with = "whole_number")]
    pub day: Option<u32>,
    #[serde(rename = "situacao", default)]
    pub status: Option<String>,
}

/// Empty numeric cells count as zero
fn empty_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Integer cells, also accepting float renderings such as `5.0`
fn whole_number<'de, D, N>(deserializer: D) -> Result<Option<N>, D::Error>
where
    D: Deserializer<'de>,
    N: TryFrom<i64>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let whole = match raw.parse::<i64>() {
        Ok(n) => n,
        Err(_) => match raw.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => f as i64,
            _ => return Err(de::Error::custom(format!("expected a whole number, got '{}'", raw))),
        },
    };
    N::try_from(whole)
        .map(Some)
        .map_err(|_| de::Error::custom(format!("{} is out of range", whole)))
}

impl SaleRecord {
    /// Calendar date of the sale, when year, month and day form a valid date
    pub fn sale_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}

/// Ordered, immutable collection of sales rows
///
/// Filtering and grouping never touch the rows in place; they derive new values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTable {
    rows: Vec<SaleRecord>,
}

impl SalesTable {
    pub fn new(rows: Vec<SaleRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SaleRecord] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SaleRecord> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// New table holding the rows that satisfy `predicate`, in their original order
    pub fn retain_where<F>(&self, predicate: F) -> SalesTable
    where
        F: Fn(&SaleRecord) -> bool,
    {
        self.rows.iter().filter(|row| predicate(*row)).cloned().collect()
    }
}

impl FromIterator<SaleRecord> for SalesTable {
    fn from_iter<I: IntoIterator<Item = SaleRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SalesTable {
    type Item = &'a SaleRecord;
    type IntoIter = std::slice::Iter<'a, SaleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// Categorical column usable as a group-by key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Salesperson,
    Month,
    Year,
    Status,
    ProductLine,
    Customer,
    Product,
    Day,
}

impl Dimension {
    /// Group key of `row` for this dimension
    pub fn key(self, row: &SaleRecord) -> DimensionKey {
        match self {
            Dimension::Salesperson => DimensionKey::from_text(row.salesperson.as_deref()),
            Dimension::Status => DimensionKey::from_text(row.status.as_deref()),
            Dimension::ProductLine => DimensionKey::from_text(row.product_line.as_deref()),
            Dimension::Customer => DimensionKey::from_text(row.customer.as_deref()),
            Dimension::Product => DimensionKey::from_text(row.product.as_deref()),
            Dimension::Month => DimensionKey::from_number(row.month),
            Dimension::Year => DimensionKey::from_number(row.year),
            Dimension::Day => DimensionKey::from_number(row.day),
        }
    }

    /// Column name in the sales export
    pub fn field_name(self) -> &'static str {
        match self {
            Dimension::Salesperson => constants::COL_SALESPERSON,
            Dimension::Month => constants::COL_MONTH,
            Dimension::Year => constants::COL_YEAR,
            Dimension::Status => constants::COL_STATUS,
            Dimension::ProductLine => constants::COL_PRODUCT_LINE,
            Dimension::Customer => constants::COL_CUSTOMER,
            Dimension::Product => constants::COL_PRODUCT,
            Dimension::Day => constants::COL_DAY,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Salesperson => write!(f, "Vendedor"),
            Dimension::Month => write!(f, "Mês"),
            Dimension::Year => write!(f, "Ano"),
            Dimension::Status => write!(f, "Situação"),
            Dimension::ProductLine => write!(f, "Linha"),
            Dimension::Customer => write!(f, "Cliente"),
            Dimension::Product => write!(f, "Produto"),
            Dimension::Day => write!(f, "Dia"),
        }
    }
}

/// Value of a dimension for one row
///
/// Ordering puts missing values first, then numbers ascending, then text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum DimensionKey {
    Missing,
    Number(i64),
    Text(String),
}

impl DimensionKey {
    /// Blank text is treated as missing; anything else is kept verbatim
    pub fn from_text(value: Option<&str>) -> Self {
        match value {
            Some(text) if !text.trim().is_empty() => DimensionKey::Text(text.to_string()),
            _ => DimensionKey::Missing,
        }
    }

    pub fn from_number<N: Into<i64>>(value: Option<N>) -> Self {
        value.map_or(DimensionKey::Missing, |n| DimensionKey::Number(n.into()))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, DimensionKey::Missing)
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            DimensionKey::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionKey::Missing => write!(f, "{}", constants::MISSING_LABEL),
            DimensionKey::Number(n) => write!(f, "{}", n),
            DimensionKey::Text(text) => write!(f, "{}", text),
        }
    }
}

// =============================================================================
// Metrics
// =============================================================================

/// Numeric column that can be summed and ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Revenue,
    Cost,
    Profit,
    Quantity,
}

impl Metric {
    /// Value of this metric for `row`; NaN and infinities contribute zero
    pub fn value(self, row: &SaleRecord) -> f64 {
        let raw = match self {
            Metric::Revenue => row.revenue,
            Metric::Cost => row.cost,
            Metric::Profit => row.profit,
            Metric::Quantity => row.quantity,
        };
        finite_or_zero(raw)
    }

    /// Column name in the sales export
    pub fn field_name(self) -> &'static str {
        match self {
            Metric::Revenue => constants::COL_REVENUE,
            Metric::Cost => constants::COL_COST,
            Metric::Profit => constants::COL_PROFIT,
            Metric::Quantity => constants::COL_QUANTITY,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Revenue => write!(f, "{}", constants::LABEL_REVENUE),
            Metric::Cost => write!(f, "Custo Total"),
            Metric::Profit => write!(f, "Lucro Total"),
            Metric::Quantity => write!(f, "Quantidade"),
        }
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sale;
    use super::*;

    #[test]
    fn test_dimension_key_ordering() {
        let mut keys = vec![
            DimensionKey::Text("b".to_string()),
            DimensionKey::Number(12),
            DimensionKey::Missing,
            DimensionKey::Number(2),
            DimensionKey::Text("a".to_string()),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                DimensionKey::Missing,
                DimensionKey::Number(2),
                DimensionKey::Number(12),
                DimensionKey::Text("a".to_string()),
                DimensionKey::Text("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_text_is_missing() {
        assert_eq!(DimensionKey::from_text(Some("   ")), DimensionKey::Missing);
        assert_eq!(DimensionKey::from_text(None), DimensionKey::Missing);
        assert_eq!(
            DimensionKey::from_text(Some(" Loja ")),
            DimensionKey::Text(" Loja ".to_string())
        );
    }

    #[test]
    fn test_dimension_accessors() {
        let row = sale("1", "Cliente X", 5, 10.0);
        assert_eq!(Dimension::Month.key(&row), DimensionKey::Number(5));
        assert_eq!(Dimension::Year.key(&row), DimensionKey::Number(2024));
        assert_eq!(
            Dimension::Customer.key(&row),
            DimensionKey::Text("Cliente X".to_string())
        );
        assert_eq!(Dimension::Customer.field_name(), "Cliente");
    }

    #[test]
    fn test_non_finite_metric_is_zero() {
        let mut row = sale("1", "C", 1, f64::NAN);
        assert_eq!(Metric::Revenue.value(&row), 0.0);
        row.cost = f64::INFINITY;
        assert_eq!(Metric::Cost.value(&row), 0.0);
    }

    #[test]
    fn test_sale_date() {
        let mut row = sale("1", "C", 2, 1.0);
        row.day = Some(29);
        assert_eq!(row.sale_date(), NaiveDate::from_ymd_opt(2024, 2, 29));
        row.day = Some(30);
        assert_eq!(row.sale_date(), None);
    }

    #[test]
    fn test_retain_where_keeps_order() {
        let table: SalesTable = (1..=4)
            .map(|m| sale(&m.to_string(), "C", m, m as f64))
            .collect();
        let even = table.retain_where(|r| r.month.is_some_and(|m| m % 2 == 0));
        let invoices: Vec<_> = even.iter().map(|r| r.invoice.as_str()).collect();
        assert_eq!(invoices, vec!["2", "4"]);
        assert_eq!(table.len(), 4);
    }
}
