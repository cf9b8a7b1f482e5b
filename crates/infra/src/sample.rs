//! Built-in demo data set (five invoices, Jan to Mar 2024).

use chrono::{DateTime, NaiveDate, Utc};

use medbill_core::{InvoiceId, Money};
use medbill_invoicing::InvoiceRecord;

fn d(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

struct Row {
    id: &'static str,
    document_number: &'static str,
    invoice_date: &'static str,
    issued_by: &'static str,
    cents: u64,
    paid_on: Option<&'static str>,
    primary_claim: Option<&'static str>,
    secondary_claim: Option<&'static str>,
    primary_settled: Option<&'static str>,
    secondary_settled: Option<&'static str>,
    created_at: &'static str,
    updated_at: &'static str,
}

const ROWS: [Row; 5] = [
    Row {
        id: "1",
        document_number: "RG-2024-001",
        invoice_date: "2024-01-15",
        issued_by: "Dr. med. Schmidt",
        cents: 12550,
        paid_on: Some("2024-01-16"),
        primary_claim: Some("2024-01-17"),
        secondary_claim: Some("2024-01-17"),
        primary_settled: Some("2024-01-25"),
        secondary_settled: Some("2024-02-05"),
        created_at: "2024-01-15T10:00:00Z",
        updated_at: "2024-02-05T14:30:00Z",
    },
    Row {
        id: "2",
        document_number: "RG-2024-002",
        invoice_date: "2024-02-10",
        issued_by: "Zahnarztpraxis Dr. Müller",
        cents: 34075,
        paid_on: Some("2024-02-11"),
        primary_claim: Some("2024-02-12"),
        secondary_claim: None,
        primary_settled: Some("2024-02-20"),
        secondary_settled: None,
        created_at: "2024-02-10T09:15:00Z",
        updated_at: "2024-02-20T11:45:00Z",
    },
    Row {
        id: "3",
        document_number: "RG-2024-003",
        invoice_date: "2024-02-20",
        issued_by: "Radiologie Zentrum",
        cents: 8520,
        paid_on: Some("2024-02-21"),
        primary_claim: Some("2024-02-22"),
        secondary_claim: None,
        primary_settled: None,
        secondary_settled: None,
        created_at: "2024-02-20T16:20:00Z",
        updated_at: "2024-02-22T08:10:00Z",
    },
    Row {
        id: "4",
        document_number: "RG-2024-004",
        invoice_date: "2024-03-05",
        issued_by: "Physiotherapie Weber",
        cents: 9500,
        paid_on: Some("2024-03-05"),
        primary_claim: None,
        secondary_claim: None,
        primary_settled: None,
        secondary_settled: None,
        created_at: "2024-03-05T13:45:00Z",
        updated_at: "2024-03-05T13:45:00Z",
    },
    Row {
        id: "5",
        document_number: "RG-2024-005",
        invoice_date: "2024-03-12",
        issued_by: "Apotheke am Markt",
        cents: 4230,
        paid_on: Some("2024-03-12"),
        primary_claim: Some("2024-03-13"),
        secondary_claim: Some("2024-03-13"),
        primary_settled: Some("2024-03-18"),
        secondary_settled: Some("2024-03-25"),
        created_at: "2024-03-12T11:30:00Z",
        updated_at: "2024-03-25T16:20:00Z",
    },
];

/// The demo invoices, in document-number order.
pub fn sample_invoices() -> Vec<InvoiceRecord> {
    ROWS.iter()
        .filter_map(|row| {
            Some(InvoiceRecord {
                id: row.id.parse::<InvoiceId>().ok()?,
                document_number: row.document_number.to_string(),
                invoice_date: d(row.invoice_date)?,
                issued_by: row.issued_by.to_string(),
                amount: Money::from_cents(row.cents),
                paid_on_date: row.paid_on.and_then(d),
                primary_payer_claim_date: row.primary_claim.and_then(d),
                secondary_payer_claim_date: row.secondary_claim.and_then(d),
                primary_payer_settled_date: row.primary_settled.and_then(d),
                secondary_payer_settled_date: row.secondary_settled.and_then(d),
                created_at: ts(row.created_at),
                updated_at: ts(row.updated_at),
            })
        })
        .collect()
}
