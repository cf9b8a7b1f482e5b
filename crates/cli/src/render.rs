//! Plain-text rendering of invoices, statistics and reports.

use std::io::{self, Write};

use serde::Serialize;

use medbill_core::format_opt_date_de;
use medbill_invoicing::{InvoiceRecord, InvoiceStatus, SettlementPolicy};
use medbill_reporting::{ReportFigures, StatisticsSummary};

/// A record together with its derived status, for JSON output.
#[derive(Debug, Serialize)]
pub struct InvoiceView<'a> {
    #[serde(flatten)]
    pub record: &'a InvoiceRecord,
    pub status: InvoiceStatus,
}

impl<'a> InvoiceView<'a> {
    pub fn new(record: &'a InvoiceRecord, policy: SettlementPolicy) -> Self {
        Self {
            record,
            status: record.status(policy),
        }
    }
}

/// `12,5 %` with German decimal comma.
pub fn percent(value: f64) -> String {
    format!("{value:.1} %").replace('.', ",")
}

fn signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", percent(value))
    } else {
        percent(value)
    }
}

pub fn invoice_table<W: Write>(
    out: &mut W,
    records: &[&InvoiceRecord],
    policy: SettlementPolicy,
) -> io::Result<()> {
    let n = records.len();
    writeln!(out, "{n} Rechnung{} gefunden", if n == 1 { "" } else { "en" })?;
    if records.is_empty() {
        writeln!(out, "Keine Rechnungen gefunden")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<14} {:<10} {:<28} {:>12}  {:<22} {:<23} {:<23}",
        "Belegnummer", "Datum", "Aussteller", "Betrag", "Status", "PKV (Antrag/Zahlung)", "Beihilfe (Antrag/Zahlung)"
    )?;
    for r in records {
        writeln!(
            out,
            "{:<14} {:<10} {:<28} {:>12}  {:<22} {:<23} {:<23}",
            r.document_number,
            format_opt_date_de(Some(r.invoice_date)),
            r.issued_by,
            r.amount.to_string(),
            r.status(policy).label(),
            format!(
                "{} / {}",
                format_opt_date_de(r.primary_payer_claim_date),
                format_opt_date_de(r.primary_payer_settled_date)
            ),
            format!(
                "{} / {}",
                format_opt_date_de(r.secondary_payer_claim_date),
                format_opt_date_de(r.secondary_payer_settled_date)
            ),
        )?;
    }
    Ok(())
}

pub fn statistics<W: Write>(out: &mut W, s: &StatisticsSummary) -> io::Result<()> {
    writeln!(
        out,
        "Gesamtausgaben     {:>14}   {} vs. letzter Monat",
        s.total_amount.to_string(),
        signed_percent(s.monthly_trend)
    )?;
    writeln!(
        out,
        "Bereits erstattet  {:>14}   PKV + Beihilfe ({})",
        s.paid_amount.to_string(),
        percent(s.reimbursement_rate())
    )?;
    writeln!(
        out,
        "  davon PKV        {:>14}   {}",
        s.primary_payer_amount.to_string(),
        percent(s.primary_payer_share())
    )?;
    writeln!(
        out,
        "  davon Beihilfe   {:>14}   {}",
        s.secondary_payer_amount.to_string(),
        percent(s.secondary_payer_share())
    )?;
    writeln!(
        out,
        "Noch offen         {:>14}   {} Rechnungen",
        s.pending_amount.to_string(),
        s.open_invoices
    )?;
    writeln!(out, "Anzahl Rechnungen  {:>14}", s.total_invoices)
}

pub fn report<W: Write>(out: &mut W, f: &ReportFigures) -> io::Result<()> {
    writeln!(out, "Durchschnitt/Monat {:>14}", f.average_per_month.to_string())?;
    writeln!(out, "Erstattungsquote   {:>14}", percent(f.reimbursement_rate))?;
    writeln!(out, "PKV-Anteil         {:>14}", percent(f.primary_payer_share))?;
    writeln!(out, "Eigenanteil        {:>14}", f.own_share.to_string())?;
    writeln!(out)?;

    if f.months.is_empty() {
        writeln!(out, "Keine Rechnungen erfasst")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<10} {:>12} {:>12} {:>12} {:>12} {:>7}",
        "Monat", "Gesamt", "PKV", "Beihilfe", "Eigenanteil", "Anzahl"
    )?;
    for row in f.months.rows() {
        writeln!(
            out,
            "{:<10} {:>12} {:>12} {:>12} {:>12} {:>7}",
            row.label(),
            row.total.to_string(),
            row.primary.to_string(),
            row.secondary.to_string(),
            row.own_share.to_string(),
            row.invoice_count
        )?;
    }
    writeln!(out)?;

    if let Some(top) = &f.highest_month {
        writeln!(out, "Höchste Ausgaben: {} mit {}", top.label(), top.total)?;
    }
    writeln!(
        out,
        "Erstattet: {} der Kosten; {} Anträge noch ausstehend; Trend {}",
        percent(f.reimbursement_rate),
        f.outstanding_claims,
        signed_percent(f.monthly_trend)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_uses_decimal_comma() {
        assert_eq!(percent(73.8368), "73,8 %");
        assert_eq!(signed_percent(12.5), "+12,5 %");
        assert_eq!(signed_percent(-3.0), "-3,0 %");
        assert_eq!(signed_percent(0.0), "0,0 %");
    }

    #[test]
    fn empty_table_shows_no_results_state() {
        let mut out = Vec::new();
        invoice_table(&mut out, &[], SettlementPolicy::BothPayers).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("0 Rechnungen gefunden"));
        assert!(text.contains("Keine Rechnungen gefunden"));
    }
}
