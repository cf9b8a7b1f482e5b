use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use medbill_core::{Entity, InvoiceId, Money};

/// One of the two reimbursing parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Payer {
    /// Private health insurance (PKV).
    Primary,
    /// Supplementary aid scheme (Beihilfe).
    Secondary,
}

impl Payer {
    pub const ALL: [Payer; 2] = [Payer::Primary, Payer::Secondary];

    pub fn label(self) -> &'static str {
        match self {
            Payer::Primary => "PKV",
            Payer::Secondary => "Beihilfe",
        }
    }
}

/// Claim/settlement dates of a record for a single payer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayerMilestones {
    pub claim_filed_on: Option<NaiveDate>,
    pub settled_on: Option<NaiveDate>,
}

impl PayerMilestones {
    pub fn is_settled(&self) -> bool {
        self.settled_on.is_some()
    }

    /// A payer is involved once a claim was filed or a payout recorded.
    pub fn is_involved(&self) -> bool {
        self.claim_filed_on.is_some() || self.settled_on.is_some()
    }
}

/// Reimbursement status, derived from the milestone dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Open,
    PartiallySettled,
    FullySettled,
}

impl InvoiceStatus {
    /// German display label.
    pub fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Open => "Offen",
            InvoiceStatus::PartiallySettled => "Teilweise beglichen",
            InvoiceStatus::FullySettled => "Vollständig beglichen",
        }
    }
}

/// Which payers must have settled for a record to count as fully settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementPolicy {
    /// Both payers are always expected to pay out.
    #[default]
    BothPayers,
    /// Only payers a claim was filed with (or that paid out) are expected.
    ClaimedPayers,
}

/// A billed medical service and its reimbursement progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub document_number: String,
    pub invoice_date: NaiveDate,
    pub issued_by: String,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_on_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_payer_claim_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_payer_claim_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_payer_settled_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_payer_settled_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvoiceRecord {
    pub fn milestones(&self, payer: Payer) -> PayerMilestones {
        match payer {
            Payer::Primary => PayerMilestones {
                claim_filed_on: self.primary_payer_claim_date,
                settled_on: self.primary_payer_settled_date,
            },
            Payer::Secondary => PayerMilestones {
                claim_filed_on: self.secondary_payer_claim_date,
                settled_on: self.secondary_payer_settled_date,
            },
        }
    }

    /// Payers that have paid out, in `Payer::ALL` order.
    pub fn settled_payers(&self) -> Vec<Payer> {
        Payer::ALL
            .into_iter()
            .filter(|p| self.milestones(*p).is_settled())
            .collect()
    }

    /// Derive the status from the settlement dates.
    ///
    /// - `Open`: no payer has settled.
    /// - `FullySettled`: every payer relevant under `policy` has settled.
    /// - `PartiallySettled`: otherwise.
    pub fn status(&self, policy: SettlementPolicy) -> InvoiceStatus {
        let settled = self.settled_payers();
        if settled.is_empty() {
            return InvoiceStatus::Open;
        }

        let all_relevant_settled = Payer::ALL
            .into_iter()
            .filter(|p| match policy {
                SettlementPolicy::BothPayers => true,
                SettlementPolicy::ClaimedPayers => self.milestones(*p).is_involved(),
            })
            .all(|p| settled.contains(&p));

        if all_relevant_settled {
            InvoiceStatus::FullySettled
        } else {
            InvoiceStatus::PartiallySettled
        }
    }

    /// Human-readable notes about implausible milestone combinations.
    ///
    /// These never block anything; callers log them.
    pub fn milestone_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for payer in Payer::ALL {
            let m = self.milestones(payer);
            match (m.claim_filed_on, m.settled_on) {
                (None, Some(_)) => warnings.push(format!(
                    "{}: settlement recorded without a claim date",
                    payer.label()
                )),
                (Some(claim), Some(settled)) if settled < claim => warnings.push(format!(
                    "{}: settled before the claim was filed",
                    payer.label()
                )),
                _ => {}
            }
            if let Some(claim) = m.claim_filed_on {
                if claim < self.invoice_date {
                    warnings.push(format!(
                        "{}: claim filed before the invoice date",
                        payer.label()
                    ));
                }
            }
        }
        warnings
    }
}

impl Entity for InvoiceRecord {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn bare_record() -> InvoiceRecord {
        InvoiceRecord {
            id: "1".parse().unwrap(),
            document_number: "RG-2024-001".to_string(),
            invoice_date: date(2024, 1, 15),
            issued_by: "Dr. med. Schmidt".to_string(),
            amount: Money::from_cents(12550),
            paid_on_date: None,
            primary_payer_claim_date: None,
            secondary_payer_claim_date: None,
            primary_payer_settled_date: None,
            secondary_payer_settled_date: None,
            created_at: test_time(),
            updated_at: test_time(),
        }
    }

    #[test]
    fn record_without_settlement_is_open() {
        let mut record = bare_record();
        assert_eq!(record.status(SettlementPolicy::BothPayers), InvoiceStatus::Open);

        record.primary_payer_claim_date = Some(date(2024, 1, 17));
        assert_eq!(record.status(SettlementPolicy::BothPayers), InvoiceStatus::Open);
        assert_eq!(record.status(SettlementPolicy::ClaimedPayers), InvoiceStatus::Open);
    }

    #[test]
    fn one_settled_payer_depends_on_policy() {
        let mut record = bare_record();
        record.primary_payer_claim_date = Some(date(2024, 1, 17));
        record.primary_payer_settled_date = Some(date(2024, 1, 25));

        assert_eq!(
            record.status(SettlementPolicy::BothPayers),
            InvoiceStatus::PartiallySettled
        );
        assert_eq!(
            record.status(SettlementPolicy::ClaimedPayers),
            InvoiceStatus::FullySettled
        );

        record.secondary_payer_claim_date = Some(date(2024, 1, 17));
        assert_eq!(
            record.status(SettlementPolicy::ClaimedPayers),
            InvoiceStatus::PartiallySettled
        );
    }

    #[test]
    fn both_settled_is_fully_settled_under_any_policy() {
        let mut record = bare_record();
        record.primary_payer_claim_date = Some(date(2024, 1, 17));
        record.secondary_payer_claim_date = Some(date(2024, 1, 17));
        record.primary_payer_settled_date = Some(date(2024, 1, 25));
        record.secondary_payer_settled_date = Some(date(2024, 2, 5));

        for policy in [SettlementPolicy::BothPayers, SettlementPolicy::ClaimedPayers] {
            assert_eq!(record.status(policy), InvoiceStatus::FullySettled);
        }
        assert_eq!(record.settled_payers(), vec![Payer::Primary, Payer::Secondary]);
        assert!(record.milestone_warnings().is_empty());
    }

    #[test]
    fn implausible_milestones_are_reported() {
        let mut record = bare_record();
        record.secondary_payer_settled_date = Some(date(2024, 2, 5));
        record.primary_payer_claim_date = Some(date(2024, 1, 10));
        record.primary_payer_settled_date = Some(date(2024, 1, 9));

        let warnings = record.milestone_warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("settled before the claim")));
        assert!(warnings.iter().any(|w| w.contains("before the invoice date")));
        assert!(warnings.iter().any(|w| w.starts_with("Beihilfe")));
    }

    #[test]
    fn json_shape_uses_camel_case_and_ignores_status() {
        let json = r#"{
            "id": "3",
            "documentNumber": "RG-2024-003",
            "invoiceDate": "2024-02-20",
            "issuedBy": "Radiologie Zentrum",
            "amount": 85.20,
            "paidOnDate": "2024-02-21",
            "primaryPayerClaimDate": "2024-02-22",
            "status": "FULLY_SETTLED",
            "createdAt": "2024-02-20T16:20:00Z",
            "updatedAt": "2024-02-22T08:10:00Z"
        }"#;
        let record: InvoiceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount, Money::from_cents(8520));
        assert_eq!(record.primary_payer_claim_date, Some(date(2024, 2, 22)));
        assert_eq!(record.status(SettlementPolicy::BothPayers), InvoiceStatus::Open);

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["documentNumber"], "RG-2024-003");
        assert!(out.get("secondaryPayerClaimDate").is_none());
    }

    #[test]
    fn entity_identity_is_the_id() {
        let a = bare_record();
        let mut b = bare_record();
        b.amount = Money::from_cents(1);
        assert!(a.same_entity(&b));
        assert_ne!(a, b);
    }
}
