//! End-to-end over the demo data: source -> filter -> statistics -> report.

use medbill_core::Money;
use medbill_infra::{InMemoryInvoiceSource, InvoiceSource, sample_invoices};
use medbill_reporting::{
    StatisticsOptions, compute_statistics, filter_invoices, report_figures,
};

fn records() -> Vec<medbill_invoicing::InvoiceRecord> {
    InMemoryInvoiceSource::with_records(sample_invoices())
        .list()
        .unwrap()
}

#[test]
fn dashboard_figures_for_sample_data() {
    let stats = compute_statistics(&records());

    assert_eq!(stats.total_amount, Money::from_cents(68875));
    assert_eq!(stats.paid_amount, Money::from_cents(50855));
    assert_eq!(stats.pending_amount, Money::from_cents(18020));
    assert_eq!(stats.total_invoices, 5);
    assert_eq!(stats.open_invoices, 3);
    assert_eq!(
        stats.primary_payer_amount + stats.secondary_payer_amount,
        stats.paid_amount
    );
    assert_eq!(stats.total_amount.to_string(), "688,75 €");
}

#[test]
fn search_narrows_without_exceeding_total() {
    let records = records();
    let total = compute_statistics(&records).total_amount;

    for term in ["", "rg-2024", "dr.", "apotheke", "nichts"] {
        let filtered: Vec<_> = filter_invoices(&records, term).into_iter().cloned().collect();
        assert!(compute_statistics(&filtered).total_amount <= total, "{term}");
    }

    let hits = filter_invoices(&records, "rg-2024-001");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].issued_by, "Dr. med. Schmidt");
    assert!(filter_invoices(&records, "nichts").is_empty());
}

#[test]
fn report_for_sample_data() {
    let figures = report_figures(&records(), &StatisticsOptions::default());

    let months: Vec<String> = figures.months.rows().iter().map(|r| r.label()).collect();
    assert_eq!(months, vec!["Jan 2024", "Feb 2024", "Mär 2024"]);

    let feb = &figures.months.rows()[1];
    assert_eq!(feb.total, Money::from_cents(42595));
    assert_eq!(figures.highest_month.as_ref().map(|r| r.month), Some(2));
    assert_eq!(figures.average_per_month, Money::from_cents(22958));
    assert_eq!(figures.outstanding_claims, 3);
    assert_eq!(figures.own_share, Money::from_cents(18020));
}
