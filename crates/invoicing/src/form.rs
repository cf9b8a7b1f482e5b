//! Invoice entry: raw form input, validation and the creation command.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use medbill_core::{InvoiceId, Money, ValidationError, parse_date};

use crate::invoice::InvoiceRecord;

/// Raw invoice input as typed into a form.
///
/// Everything is text; [`InvoiceForm::validate`] turns it into typed values.
/// Blank optional dates count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub document_number: String,
    pub invoice_date: String,
    pub issued_by: String,
    pub amount: String,
    #[serde(default)]
    pub paid_on_date: Option<String>,
    #[serde(default)]
    pub primary_payer_claim_date: Option<String>,
    #[serde(default)]
    pub secondary_payer_claim_date: Option<String>,
    #[serde(default)]
    pub primary_payer_settled_date: Option<String>,
    #[serde(default)]
    pub secondary_payer_settled_date: Option<String>,
}

/// Typed, checked form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInvoiceInput {
    pub document_number: String,
    pub invoice_date: NaiveDate,
    pub issued_by: String,
    pub amount: Money,
    pub paid_on_date: Option<NaiveDate>,
    pub primary_payer_claim_date: Option<NaiveDate>,
    pub secondary_payer_claim_date: Option<NaiveDate>,
    pub primary_payer_settled_date: Option<NaiveDate>,
    pub secondary_payer_settled_date: Option<NaiveDate>,
}

/// Earliest date the entry form accepts.
pub fn earliest_accepted_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

impl InvoiceForm {
    /// Check every field against the creation contract.
    ///
    /// Dates must parse and lie in `1900-01-01..=today`. All violations are
    /// collected before returning.
    pub fn validate(&self, today: NaiveDate) -> Result<ValidInvoiceInput, ValidationError> {
        let mut errors = ValidationError::new();

        let document_number = self.document_number.trim().to_string();
        if document_number.is_empty() {
            errors.push("documentNumber", "Belegnummer ist erforderlich");
        }

        let invoice_date = if self.invoice_date.trim().is_empty() {
            errors.push("invoiceDate", "Rechnungsdatum ist erforderlich");
            None
        } else {
            check_date(&mut errors, "invoiceDate", &self.invoice_date, today)
        };

        let issued_by = self.issued_by.trim().to_string();
        if issued_by.is_empty() {
            errors.push("issuedBy", "Aussteller ist erforderlich");
        }

        let amount = match self.amount.parse::<Money>() {
            Ok(m) if m.is_zero() => {
                errors.push("amount", "Preis muss größer als 0 sein");
                None
            }
            Ok(m) => Some(m),
            Err(e) => {
                errors.push("amount", format!("Ungültiger Betrag ({e})"));
                None
            }
        };

        let mut optional = |field: &'static str, raw: &Option<String>| match raw {
            Some(s) if !s.trim().is_empty() => check_date(&mut errors, field, s, today),
            _ => None,
        };
        let paid_on_date = optional("paidOnDate", &self.paid_on_date);
        let primary_payer_claim_date =
            optional("primaryPayerClaimDate", &self.primary_payer_claim_date);
        let secondary_payer_claim_date =
            optional("secondaryPayerClaimDate", &self.secondary_payer_claim_date);
        let primary_payer_settled_date =
            optional("primaryPayerSettledDate", &self.primary_payer_settled_date);
        let secondary_payer_settled_date =
            optional("secondaryPayerSettledDate", &self.secondary_payer_settled_date);

        match (invoice_date, amount) {
            (Some(invoice_date), Some(amount)) if errors.is_empty() => Ok(ValidInvoiceInput {
                document_number,
                invoice_date,
                issued_by,
                amount,
                paid_on_date,
                primary_payer_claim_date,
                secondary_payer_claim_date,
                primary_payer_settled_date,
                secondary_payer_settled_date,
            }),
            _ => Err(errors),
        }
    }
}

fn check_date(
    errors: &mut ValidationError,
    field: &'static str,
    raw: &str,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let Some(date) = parse_date(raw) else {
        errors.push(field, format!("Ungültiges Datum: {:?}", raw.trim()));
        return None;
    };
    if date > today {
        errors.push(field, "Datum darf nicht in der Zukunft liegen");
        return None;
    }
    if date < earliest_accepted_date() {
        errors.push(field, "Datum darf nicht vor dem 01.01.1900 liegen");
        return None;
    }
    Some(date)
}

/// Create a record from form input.
///
/// Pure: the caller supplies the id and the clock. Nothing is stored; the
/// caller hands the record to whatever storage it uses.
pub fn submit_invoice(
    form: &InvoiceForm,
    id: InvoiceId,
    now: DateTime<Utc>,
) -> Result<InvoiceRecord, ValidationError> {
    let input = match form.validate(now.date_naive()) {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(violations = errors.violations().len(), "invoice form rejected");
            return Err(errors);
        }
    };

    let record = InvoiceRecord {
        id,
        document_number: input.document_number,
        invoice_date: input.invoice_date,
        issued_by: input.issued_by,
        amount: input.amount,
        paid_on_date: input.paid_on_date,
        primary_payer_claim_date: input.primary_payer_claim_date,
        secondary_payer_claim_date: input.secondary_payer_claim_date,
        primary_payer_settled_date: input.primary_payer_settled_date,
        secondary_payer_settled_date: input.secondary_payer_settled_date,
        created_at: now,
        updated_at: now,
    };

    for warning in record.milestone_warnings() {
        tracing::warn!(document_number = %record.document_number, "{warning}");
    }
    tracing::info!(
        id = %record.id,
        document_number = %record.document_number,
        amount = %record.amount,
        "invoice created"
    );

    Ok(record)
}

fn iso(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

impl From<&InvoiceRecord> for InvoiceForm {
    fn from(record: &InvoiceRecord) -> Self {
        let cents = record.amount.cents();
        Self {
            document_number: record.document_number.clone(),
            invoice_date: record.invoice_date.format("%Y-%m-%d").to_string(),
            issued_by: record.issued_by.clone(),
            amount: format!("{}.{:02}", cents / 100, cents % 100),
            paid_on_date: iso(record.paid_on_date),
            primary_payer_claim_date: iso(record.primary_payer_claim_date),
            secondary_payer_claim_date: iso(record.secondary_payer_claim_date),
            primary_payer_settled_date: iso(record.primary_payer_settled_date),
            secondary_payer_settled_date: iso(record.secondary_payer_settled_date),
        }
    }
}
