//! Dashboard summary over a set of invoice records.

use serde::{Deserialize, Serialize};

use medbill_core::{DomainError, Money};
use medbill_invoicing::{InvoiceRecord, InvoiceStatus, Payer, SettlementPolicy};

/// Share of a settled invoice attributed to the primary payer when both
/// payers have paid out. The secondary payer gets the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CoverageSplit {
    primary_percent: u8,
}

impl CoverageSplit {
    pub fn new(primary_percent: u8) -> Result<Self, DomainError> {
        if primary_percent > 100 {
            return Err(DomainError::invariant(format!(
                "primary payer share must be within 0..=100 (got {primary_percent})"
            )));
        }
        Ok(Self { primary_percent })
    }

    pub fn primary_percent(self) -> u8 {
        self.primary_percent
    }

    pub fn secondary_percent(self) -> u8 {
        100 - self.primary_percent
    }

    /// Attribute `amount` among the payers that settled.
    ///
    /// Returns `(primary, secondary)`; the parts always add up to `amount`
    /// when at least one payer settled, and are both zero otherwise.
    pub fn attribute(self, amount: Money, settled: &[Payer]) -> (Money, Money) {
        let primary = settled.contains(&Payer::Primary);
        let secondary = settled.contains(&Payer::Secondary);
        match (primary, secondary) {
            (true, true) => amount.split_percent(self.primary_percent),
            (true, false) => (amount, Money::ZERO),
            (false, true) => (Money::ZERO, amount),
            (false, false) => (Money::ZERO, Money::ZERO),
        }
    }
}

impl TryFrom<u8> for CoverageSplit {
    type Error = DomainError;

    fn try_from(primary_percent: u8) -> Result<Self, Self::Error> {
        Self::new(primary_percent)
    }
}

impl From<CoverageSplit> for u8 {
    fn from(split: CoverageSplit) -> Self {
        split.primary_percent
    }
}

impl Default for CoverageSplit {
    fn default() -> Self {
        Self { primary_percent: 50 }
    }
}

/// Knobs for the aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsOptions {
    pub policy: SettlementPolicy,
    pub split: CoverageSplit,
}

/// Aggregate figures shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_amount: Money,
    /// Amount of every record that is at least partially settled.
    pub paid_amount: Money,
    pub pending_amount: Money,
    pub primary_payer_amount: Money,
    pub secondary_payer_amount: Money,
    pub total_invoices: usize,
    /// Records not fully settled.
    pub open_invoices: usize,
    /// Change versus the prior period in percent; supplied by the caller.
    pub monthly_trend: f64,
}

impl StatisticsSummary {
    pub fn with_monthly_trend(mut self, trend: f64) -> Self {
        self.monthly_trend = trend;
        self
    }

    /// `paid / total` in percent (0 for an empty set).
    pub fn reimbursement_rate(&self) -> f64 {
        self.paid_amount.percent_of(self.total_amount)
    }

    pub fn primary_payer_share(&self) -> f64 {
        self.primary_payer_amount.percent_of(self.total_amount)
    }

    pub fn secondary_payer_share(&self) -> f64 {
        self.secondary_payer_amount.percent_of(self.total_amount)
    }

    /// Eigenanteil: what is left after all reimbursements.
    pub fn own_share(&self) -> Money {
        self.total_amount.saturating_sub(self.paid_amount)
    }
}

/// [`compute_statistics_with`] using default options.
pub fn compute_statistics(records: &[InvoiceRecord]) -> StatisticsSummary {
    compute_statistics_with(records, &StatisticsOptions::default())
}

pub fn compute_statistics_with(
    records: &[InvoiceRecord],
    options: &StatisticsOptions,
) -> StatisticsSummary {
    let mut summary = StatisticsSummary {
        total_invoices: records.len(),
        ..StatisticsSummary::default()
    };

    for record in records {
        summary.total_amount += record.amount;

        let status = record.status(options.policy);
        if status != InvoiceStatus::FullySettled {
            summary.open_invoices += 1;
        }
        if status == InvoiceStatus::Open {
            continue;
        }

        summary.paid_amount += record.amount;
        let (primary, secondary) = options
            .split
            .attribute(record.amount, &record.settled_payers());
        summary.primary_payer_amount += primary;
        summary.secondary_payer_amount += secondary;
    }

    summary.pending_amount = summary.total_amount.saturating_sub(summary.paid_amount);

    tracing::debug!(
        invoices = summary.total_invoices,
        open = summary.open_invoices,
        total = %summary.total_amount,
        paid = %summary.paid_amount,
        "computed statistics"
    );
    summary
}

/// Percentage change from `previous` to `current`; 0 when `previous` is zero.
pub fn trend_between(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    (current.as_euros() - previous.as_euros()) / previous.as_euros() * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn record(cents: u64, primary_settled: bool, secondary_settled: bool) -> InvoiceRecord {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        InvoiceRecord {
            id: "x".parse().unwrap(),
            document_number: "RG".to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            issued_by: "Praxis".to_string(),
            amount: Money::from_cents(cents),
            paid_on_date: None,
            primary_payer_claim_date: primary_settled.then(|| date(2024, 1, 2)).flatten(),
            secondary_payer_claim_date: secondary_settled.then(|| date(2024, 1, 2)).flatten(),
            primary_payer_settled_date: primary_settled.then(|| date(2024, 1, 9)).flatten(),
            secondary_payer_settled_date: secondary_settled.then(|| date(2024, 1, 9)).flatten(),
            created_at: t,
            updated_at: t,
        }
    }

    #[test]
    fn empty_input_yields_zero_summary() {
        let summary = compute_statistics(&[]);
        assert_eq!(summary, StatisticsSummary::default());
        assert_eq!(summary.reimbursement_rate(), 0.0);
        assert_eq!(summary.primary_payer_share(), 0.0);
        assert_eq!(summary.own_share(), Money::ZERO);
    }

    #[test]
    fn paid_and_pending_follow_derived_status() {
        let records = vec![
            record(12550, true, true),
            record(34075, true, false),
            record(8520, false, false),
            record(9500, false, false),
            record(4230, true, true),
        ];
        let summary = compute_statistics(&records);

        assert_eq!(summary.total_amount, Money::from_cents(68875));
        assert_eq!(summary.paid_amount, Money::from_cents(50855));
        assert_eq!(summary.pending_amount, Money::from_cents(18020));
        assert_eq!(summary.total_invoices, 5);
        assert_eq!(summary.open_invoices, 3);
        assert_eq!(summary.monthly_trend, 0.0);

        // 62.75 + 340.75 + 21.15 / 62.75 + 21.15
        assert_eq!(summary.primary_payer_amount, Money::from_cents(42465));
        assert_eq!(summary.secondary_payer_amount, Money::from_cents(8390));
    }

    #[test]
    fn claimed_payers_policy_closes_single_payer_records() {
        let records = vec![record(34075, true, false)];
        let options = StatisticsOptions {
            policy: SettlementPolicy::ClaimedPayers,
            ..StatisticsOptions::default()
        };
        let summary = compute_statistics_with(&records, &options);
        assert_eq!(summary.open_invoices, 0);
        assert_eq!(summary.paid_amount, Money::from_cents(34075));
    }

    #[test]
    fn coverage_split_is_configurable_and_bounded() {
        assert!(CoverageSplit::new(101).is_err());
        let split = CoverageSplit::new(70).unwrap();
        assert_eq!(split.secondary_percent(), 30);

        let summary = compute_statistics_with(
            &[record(10000, true, true)],
            &StatisticsOptions { split, ..StatisticsOptions::default() },
        );
        assert_eq!(summary.primary_payer_amount, Money::from_cents(7000));
        assert_eq!(summary.secondary_payer_amount, Money::from_cents(3000));
        assert_eq!(summary.primary_payer_share(), 70.0);
    }

    #[test]
    fn coverage_split_deserializes_through_bounds_check() {
        let split: CoverageSplit = serde_json::from_str("70").unwrap();
        assert_eq!(split.secondary_percent(), 30);
        assert_eq!(serde_json::to_string(&split).unwrap(), "70");
        assert!(serde_json::from_str::<CoverageSplit>("200").is_err());
    }

    #[test]
    fn trend_is_guarded_against_zero_base() {
        assert_eq!(trend_between(Money::from_cents(100), Money::ZERO), 0.0);
        assert_eq!(
            trend_between(Money::from_cents(15000), Money::from_cents(10000)),
            50.0
        );
        let s = compute_statistics(&[]).with_monthly_trend(12.5);
        assert_eq!(s.monthly_trend, 12.5);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: payer amounts partition the paid amount, and paid plus
        /// pending is the total.
        #[test]
        fn amounts_partition(
            entries in prop::collection::vec((1u64..10_000_000u64, any::<bool>(), any::<bool>()), 0..30),
            pct in 0u8..=100u8,
        ) {
            let records: Vec<InvoiceRecord> = entries
                .iter()
                .map(|(c, p, s)| record(*c, *p, *s))
                .collect();
            let options = StatisticsOptions {
                split: CoverageSplit::new(pct).unwrap(),
                ..StatisticsOptions::default()
            };
            let s = compute_statistics_with(&records, &options);

            prop_assert_eq!(s.primary_payer_amount + s.secondary_payer_amount, s.paid_amount);
            prop_assert_eq!(s.paid_amount + s.pending_amount, s.total_amount);
            prop_assert!(s.open_invoices <= s.total_invoices);
            prop_assert!(s.reimbursement_rate() <= 100.0);
        }
    }
}
