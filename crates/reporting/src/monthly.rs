//! Month-by-month report figures.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use medbill_core::Money;
use medbill_invoicing::{InvoiceRecord, InvoiceStatus};

use crate::statistics::{StatisticsOptions, compute_statistics_with, trend_between};

/// Spending and reimbursements for one calendar month of invoice dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRow {
    pub year: i32,
    pub month: u32,
    pub total: Money,
    pub primary: Money,
    pub secondary: Money,
    /// Eigenanteil: `total` minus both reimbursements.
    pub own_share: Money,
    pub invoice_count: usize,
}

impl MonthlyRow {
    /// `Jan 2024` style label (German month abbreviations).
    pub fn label(&self) -> String {
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
        ];
        let name = MONTHS
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("?");
        format!("{name} {}", self.year)
    }
}

/// Rows in ascending month order; months without invoices are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonthlyBreakdown {
    rows: Vec<MonthlyRow>,
}

impl MonthlyBreakdown {
    pub fn rows(&self) -> &[MonthlyRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn highest(&self) -> Option<&MonthlyRow> {
        // max_by_key returns the last maximum; prefer the earliest month on ties.
        self.rows
            .iter()
            .rev()
            .max_by_key(|r| r.total)
    }

    /// Percentage change of the latest month against the calendar month
    /// right before it. 0 when that month has no invoices.
    pub fn trend(&self) -> f64 {
        let Some(current) = self.rows.last() else {
            return 0.0;
        };
        let previous = previous_month(current.year, current.month);
        let previous_total = self
            .rows
            .iter()
            .rev()
            .find(|r| (r.year, r.month) == previous)
            .map_or(Money::ZERO, |r| r.total);
        trend_between(current.total, previous_total)
    }
}

pub fn monthly_breakdown(records: &[InvoiceRecord], options: &StatisticsOptions) -> MonthlyBreakdown {
    let mut months: BTreeMap<(i32, u32), Vec<InvoiceRecord>> = BTreeMap::new();
    for record in records {
        let key = month_key(record.invoice_date);
        months.entry(key).or_default().push(record.clone());
    }

    let rows = months
        .into_iter()
        .map(|((year, month), group)| {
            let stats = compute_statistics_with(&group, options);
            MonthlyRow {
                year,
                month,
                total: stats.total_amount,
                primary: stats.primary_payer_amount,
                secondary: stats.secondary_payer_amount,
                own_share: stats.own_share(),
                invoice_count: group.len(),
            }
        })
        .collect();

    MonthlyBreakdown { rows }
}

fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 { (year - 1, 12) } else { (year, month - 1) }
}

/// Key figures of the reports view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFigures {
    /// Average spend over the months that have invoices.
    pub average_per_month: Money,
    pub reimbursement_rate: f64,
    pub primary_payer_share: f64,
    pub own_share: Money,
    pub highest_month: Option<MonthlyRow>,
    /// Claims still awaiting at least one payout.
    pub outstanding_claims: usize,
    pub monthly_trend: f64,
    pub months: MonthlyBreakdown,
}

pub fn report_figures(records: &[InvoiceRecord], options: &StatisticsOptions) -> ReportFigures {
    let months = monthly_breakdown(records, options);
    let stats = compute_statistics_with(records, options).with_monthly_trend(months.trend());

    let month_count = months.rows().len() as u64;
    let average_per_month = if month_count == 0 {
        Money::ZERO
    } else {
        Money::from_cents((stats.total_amount.cents() + month_count / 2) / month_count)
    };

    let outstanding_claims = records
        .iter()
        .filter(|r| r.status(options.policy) != InvoiceStatus::FullySettled)
        .count();

    ReportFigures {
        average_per_month,
        reimbursement_rate: stats.reimbursement_rate(),
        primary_payer_share: stats.primary_payer_share(),
        own_share: stats.own_share(),
        highest_month: months.highest().cloned(),
        outstanding_claims,
        monthly_trend: stats.monthly_trend,
        months,
    }
}
