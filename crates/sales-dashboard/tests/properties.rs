use proptest::prelude::*;
use sales_dashboard::{
    apply_filters, build_ranking, compute, group_and_sum, top_n, Dimension, FilterCriteria, Metric, SaleRecord,
    SalesTable,
};

const SALESPEOPLE: [&str; 4] = ["Ana", " Ana", "Bruno", "Carla"];
const CUSTOMERS: [&str; 4] = ["Mercado Sul", "Loja Leste", "Padaria Norte", "Bar Centro"];
const STATUSES: [&str; 2] = ["Faturado", "Pendente"];

fn sale_strategy() -> impl Strategy<Value = SaleRecord> {
    (
        0u32..20,
        0usize..SALESPEOPLE.len(),
        0usize..CUSTOMERS.len(),
        0usize..STATUSES.len(),
        2022i32..2025,
        1u32..=12,
        1u32..=31,
        0u32..100_000,
        0u32..50,
    )
        .prop_map(|(invoice, sp, cust, status, year, month, day, cents, qty)| {
            let revenue = f64::from(cents) / 100.0;
            SaleRecord {
                invoice: format!("NF{}", invoice),
                product: Some(format!("Produto {}", invoice % 7)),
                product_line: Some(format!("Linha {}", invoice % 3)),
                quantity: f64::from(qty),
                unit_price: None,
                revenue,
                cost: revenue * 0.6,
                profit: revenue * 0.4,
                salesperson: Some(SALESPEOPLE[sp].to_string()),
                customer: Some(CUSTOMERS[cust].to_string()),
                year: Some(year),
                month: Some(month),
                day: Some(day),
                status: Some(STATUSES[status].to_string()),
            }
        })
}

fn criteria_strategy() -> impl Strategy<Value = FilterCriteria> {
    (
        proptest::option::of(0usize..SALESPEOPLE.len()),
        proptest::option::of(1u32..=12),
        proptest::option::of(2022i32..2025),
        proptest::option::of(0usize..STATUSES.len()),
    )
        .prop_map(|(sp, month, year, status)| FilterCriteria {
            salesperson: sp.map(|i| SALESPEOPLE[i].to_string()),
            month,
            year,
            status: status.map(|i| STATUSES[i].to_string()),
        })
}

/// Criteria checked field by field against the raw row values
fn satisfies(criteria: &FilterCriteria, row: &SaleRecord) -> bool {
    let text_ok = |wanted: &Option<String>, actual: &Option<String>| match wanted {
        None => true,
        Some(w) => actual.as_ref() == Some(w),
    };

    text_ok(&criteria.salesperson, &row.salesperson)
        && criteria.month.is_none_or(|m| row.month == Some(m))
        && criteria.year.is_none_or(|y| row.year == Some(y))
        && text_ok(&criteria.status, &row.status)
}

proptest! {
    #[test]
    fn unconstrained_filter_is_identity(rows in prop::collection::vec(sale_strategy(), 0..40)) {
        let table = SalesTable::new(rows);
        prop_assert_eq!(apply_filters(&table, &FilterCriteria::unconstrained()), table);
    }

    #[test]
    fn filter_is_sound_and_complete(
        rows in prop::collection::vec(sale_strategy(), 0..40),
        criteria in criteria_strategy(),
    ) {
        let table = SalesTable::new(rows);
        let filtered = apply_filters(&table, &criteria);

        prop_assert!(filtered.iter().all(|row| satisfies(&criteria, row)));
        let expected: Vec<&SaleRecord> = table.iter().filter(|row| satisfies(&criteria, row)).collect();
        prop_assert_eq!(filtered.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn revenue_total_is_order_independent(
        (rows, shuffled) in prop::collection::vec(sale_strategy(), 1..40)
            .prop_flat_map(|rows| (Just(rows.clone()), Just(rows).prop_shuffle())),
    ) {
        let original = compute(&SalesTable::new(rows.clone()));
        let permuted = compute(&SalesTable::new(shuffled));

        let direct: f64 = rows.iter().map(|r| r.revenue).sum();
        prop_assert!((original.total_revenue - direct).abs() < 1e-6);
        prop_assert!((original.total_revenue - permuted.total_revenue).abs() < 1e-6);
        prop_assert_eq!(original.invoice_count, permuted.invoice_count);
    }

    #[test]
    fn group_totals_match_metrics(rows in prop::collection::vec(sale_strategy(), 0..40)) {
        let table = SalesTable::new(rows);
        let metrics = compute(&table);
        let grouped: f64 = group_and_sum(&table, Dimension::Salesperson).iter().map(|g| g.revenue).sum();
        prop_assert!((metrics.total_revenue - grouped).abs() < 1e-6);
    }

    #[test]
    fn top_n_shape(rows in prop::collection::vec(sale_strategy(), 0..40), n in 0usize..8) {
        let table = SalesTable::new(rows);
        let groups = group_and_sum(&table, Dimension::Product);
        let top = top_n(&table, Dimension::Product, Metric::Revenue, n);

        prop_assert_eq!(top.len(), n.min(groups.len()));
        prop_assert!(top.windows(2).all(|w| w[0].revenue >= w[1].revenue));
        prop_assert!(top.iter().all(|entry| groups.contains(entry)));
    }

    #[test]
    fn ranking_is_contiguous(rows in prop::collection::vec(sale_strategy(), 0..40), n in 1usize..25) {
        let table = SalesTable::new(rows);
        let ranking = build_ranking(&table, Dimension::Customer, n, "R$");
        let ranks: Vec<usize> = ranking.iter().map(|e| e.rank).collect();
        let expected: Vec<usize> = (1..=ranking.len()).collect();
        prop_assert_eq!(ranks, expected);
        prop_assert!(ranking.iter().all(|e| e.value.starts_with("R$ ")));
    }
}
