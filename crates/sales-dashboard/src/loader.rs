//! Sales export ingestion (CSV)
//!
//! Columns are matched by header name, extra columns are ignored. Empty text
//! cells load as missing values and empty numeric cells as zero. Year, month
//! and day also accept whole-valued floats like `5.0`.

use std::io::Read;
use std::path::Path;

use crate::error::LoadError;
use crate::records::{SaleRecord, SalesTable};

/// Load the sales table from a CSV file
pub fn load_from_csv(path: &Path) -> Result<SalesTable, LoadError> {
    let rdr = csv::Reader::from_path(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_records(rdr)?;
    tracing::info!(path = %path.display(), rows = table.len(), "Loaded sales data");
    Ok(table)
}

/// Load the sales table from any CSV byte stream with a header row
pub fn load_from_reader<R: Read>(reader: R) -> Result<SalesTable, LoadError> {
    read_records(csv::Reader::from_reader(reader))
}

fn read_records<R: Read>(mut rdr: csv::Reader<R>) -> Result<SalesTable, LoadError> {
    let mut rows = Vec::new();
    for (index, result) in rdr.deserialize::<SaleRecord>().enumerate() {
        let record = result.map_err(|source| LoadError::Record {
            // Header is line 1
            line: source
                .position()
                .map_or(index as u64 + 2, |pos| pos.line()),
            source,
        })?;
        rows.push(record);
    }
    Ok(SalesTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Dimension, DimensionKey};

    const HEADER: &str = "NF,Descricao_produto,Linha,Qtd_Produto,Valor_Total_Item,Total_Custo_Compra,\
                          Total_Lucro_Venda_Item,Vendedor,Cliente,Ano,Mes,Dia,situacao";

    #[test]
    fn test_load_rows() {
        let data = format!(
            "{}\n\
             1001,Parafuso,Ferragens,10,150.5,100,50.5,Ana,Mercado Sul,2024,5,3,Faturado\n\
             1002,Tinta,Pintura,2,80,60,20,Bruno,Loja Leste,2024,6,12,Pendente\n",
            HEADER
        );
        let table = load_from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.rows()[0];
        assert_eq!(first.invoice, "1001");
        assert_eq!(first.product.as_deref(), Some("Parafuso"));
        assert_eq!(first.quantity, 10.0);
        assert_eq!(first.revenue, 150.5);
        assert_eq!(first.month, Some(5));
        assert_eq!(first.unit_price, None);
        assert_eq!(table.rows()[1].status.as_deref(), Some("Pendente"));
    }

    #[test]
    fn test_empty_cells() {
        let data = format!("{}\n1001,,Ferragens,,,,,Ana,,2024,,,Faturado\n", HEADER);
        let table = load_from_reader(data.as_bytes()).unwrap();
        let row = &table.rows()[0];

        assert_eq!(row.product, None);
        assert_eq!(row.revenue, 0.0);
        assert_eq!(row.quantity, 0.0);
        assert_eq!(row.month, None);
        assert_eq!(Dimension::Customer.key(row), DimensionKey::Missing);
    }

    #[test]
    fn test_float_rendered_date_parts() {
        let data = format!(
            "{}\n\
             1001,Parafuso,Ferragens,10,150.5,100,50.5,Ana,Mercado Sul,2024.0,5.0,3.0,Faturado\n\
             1002,Tinta,Pintura,2,80,60,20,Bruno,Loja Leste,,,,Pendente\n",
            HEADER
        );
        let table = load_from_reader(data.as_bytes()).unwrap();
        let first = &table.rows()[0];
        assert_eq!((first.year, first.month, first.day), (Some(2024), Some(5), Some(3)));
        assert_eq!(table.rows()[1].month, None);
    }

    #[test]
    fn test_fractional_month_rejected() {
        let data = format!(
            "{}\n1001,Parafuso,Ferragens,10,150.5,100,50.5,Ana,Mercado Sul,2024,5.5,3,Faturado\n",
            HEADER
        );
        assert!(matches!(
            load_from_reader(data.as_bytes()),
            Err(LoadError::Record { line: 2, .. })
        ));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let data = "NF,Extra,Valor_Total_Item\n7,foo,12.5\n";
        let table = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.rows()[0].revenue, 12.5);
        assert_eq!(table.rows()[0].salesperson, None);
    }

    #[test]
    fn test_malformed_record_reports_line() {
        let data = format!(
            "{}\n\
             1001,Parafuso,Ferragens,10,150.5,100,50.5,Ana,Mercado Sul,2024,5,3,Faturado\n\
             1002,Tinta,Pintura,dois,80,60,20,Bruno,Loja Leste,2024,6,12,Pendente\n",
            HEADER
        );
        match load_from_reader(data.as_bytes()) {
            Err(LoadError::Record { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected record error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_from_csv(Path::new("/nonexistent/vendas.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
