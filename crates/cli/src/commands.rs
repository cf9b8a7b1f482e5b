//! Subcommand execution.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use medbill_core::InvoiceId;
use medbill_infra::{InMemoryInvoiceSource, InvoiceSource, JsonFileInvoiceSource, sample_invoices};
use medbill_invoicing::{InvoiceForm, submit_invoice};
use medbill_reporting::{
    compute_statistics_with, filter_invoices, monthly_breakdown, report_figures,
};

use crate::args::{AddArgs, Command};
use crate::config::Config;
use crate::render::{self, InvoiceView};

/// How a command ended, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Input was rejected; messages went to the error stream.
    Rejected,
}

pub fn open_source(config: &Config) -> Box<dyn InvoiceSource> {
    match &config.data_file {
        Some(path) => Box::new(JsonFileInvoiceSource::new(path)),
        None => {
            tracing::debug!("no data file configured; using sample invoices");
            Box::new(InMemoryInvoiceSource::with_records(sample_invoices()))
        }
    }
}

impl From<AddArgs> for InvoiceForm {
    fn from(args: AddArgs) -> Self {
        Self {
            document_number: args.document_number,
            invoice_date: args.invoice_date,
            issued_by: args.issued_by,
            amount: args.amount,
            paid_on_date: args.paid_on,
            primary_payer_claim_date: args.primary_claim,
            secondary_payer_claim_date: args.secondary_claim,
            primary_payer_settled_date: args.primary_settled,
            secondary_payer_settled_date: args.secondary_settled,
        }
    }
}

pub fn run<O: Write, E: Write>(
    command: Command,
    config: &Config,
    source: &dyn InvoiceSource,
    now: DateTime<Utc>,
    out: &mut O,
    err: &mut E,
) -> Result<Outcome> {
    let options = &config.statistics;

    match command {
        Command::List { search, json } => {
            let records = source.list().context("loading invoices")?;
            let filtered = filter_invoices(&records, &search);
            if json {
                let views: Vec<InvoiceView<'_>> = filtered
                    .iter()
                    .map(|r| InvoiceView::new(r, options.policy))
                    .collect();
                serde_json::to_writer_pretty(&mut *out, &views)?;
                writeln!(out)?;
            } else {
                render::invoice_table(out, &filtered, options.policy)?;
            }
        }
        Command::Stats { trend, json } => {
            let records = source.list().context("loading invoices")?;
            let trend = trend.unwrap_or_else(|| monthly_breakdown(&records, options).trend());
            let summary = compute_statistics_with(&records, options).with_monthly_trend(trend);
            if json {
                serde_json::to_writer_pretty(&mut *out, &summary)?;
                writeln!(out)?;
            } else {
                render::statistics(out, &summary)?;
            }
        }
        Command::Report { json } => {
            let records = source.list().context("loading invoices")?;
            let figures = report_figures(&records, options);
            if json {
                serde_json::to_writer_pretty(&mut *out, &figures)?;
                writeln!(out)?;
            } else {
                render::report(out, &figures)?;
            }
        }
        Command::Add(args) => {
            let form = InvoiceForm::from(args);
            let record = match submit_invoice(&form, InvoiceId::generate(), now) {
                Ok(record) => record,
                Err(violations) => {
                    writeln!(err, "Rechnung nicht gespeichert:")?;
                    for v in violations.violations() {
                        writeln!(err, "  {}: {}", v.field, v.message)?;
                    }
                    return Ok(Outcome::Rejected);
                }
            };

            if config.data_file.is_some() {
                source
                    .append(record.clone())
                    .context("saving invoice")?;
            } else {
                tracing::warn!("no data file configured; invoice not persisted");
            }

            serde_json::to_writer_pretty(
                &mut *out,
                &InvoiceView::new(&record, options.policy),
            )?;
            writeln!(out)?;
        }
    }

    Ok(Outcome::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medbill_reporting::StatisticsOptions;

    fn test_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn sample_config() -> Config {
        Config {
            data_file: None,
            statistics: StatisticsOptions::default(),
        }
    }

    fn run_to_string(command: Command, config: &Config) -> (Outcome, String, String) {
        let source = open_source(config);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = run(command, config, source.as_ref(), test_time(), &mut out, &mut err).unwrap();
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn list_filters_sample_data() {
        let (outcome, out, _) = run_to_string(
            Command::List { search: "rg-2024-00".to_string(), json: false },
            &sample_config(),
        );
        assert_eq!(outcome, Outcome::Success);
        assert!(out.starts_with("5 Rechnungen gefunden"));
        assert!(out.contains("Vollständig beglichen"));

        let (_, out, _) = run_to_string(
            Command::List { search: "Apotheke".to_string(), json: true },
            &sample_config(),
        );
        let views: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(views.as_array().unwrap().len(), 1);
        assert_eq!(views[0]["documentNumber"], "RG-2024-005");
        assert_eq!(views[0]["status"], "FULLY_SETTLED");
    }

    #[test]
    fn stats_json_contains_summary() {
        let (_, out, _) = run_to_string(
            Command::Stats { trend: Some(12.5), json: true },
            &sample_config(),
        );
        let stats: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(stats["totalAmount"], 688.75);
        assert_eq!(stats["pendingAmount"], 180.2);
        assert_eq!(stats["openInvoices"], 3);
        assert_eq!(stats["monthlyTrend"], 12.5);
    }

    #[test]
    fn report_text_names_highest_month() {
        let (_, out, _) = run_to_string(Command::Report { json: false }, &sample_config());
        assert!(out.contains("Höchste Ausgaben: Feb 2024 mit 425,95 €"));
        assert!(out.contains("3 Anträge noch ausstehend"));
    }

    #[test]
    fn invalid_add_is_rejected_with_field_messages() {
        let args = AddArgs {
            document_number: "RG-2024-006".to_string(),
            amount: "0".to_string(),
            ..AddArgs::default()
        };
        let (outcome, out, err) = run_to_string(Command::Add(args), &sample_config());
        assert_eq!(outcome, Outcome::Rejected);
        assert!(out.is_empty());
        assert!(err.contains("invoiceDate: Rechnungsdatum ist erforderlich"));
        assert!(err.contains("issuedBy: Aussteller ist erforderlich"));
        assert!(err.contains("amount: Preis muss größer als 0 sein"));
    }

    #[test]
    fn valid_add_is_appended_to_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_file: Some(dir.path().join("invoices.json")),
            statistics: StatisticsOptions::default(),
        };
        let args = AddArgs {
            document_number: "RG-2024-006".to_string(),
            invoice_date: "01.04.2024".to_string(),
            issued_by: "Augenarzt Dr. Weiß".to_string(),
            amount: "150,00".to_string(),
            ..AddArgs::default()
        };

        let (outcome, out, _) = run_to_string(Command::Add(args), &config);
        assert_eq!(outcome, Outcome::Success);
        let created: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(created["status"], "OPEN");

        let stored = open_source(&config).list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].issued_by, "Augenarzt Dr. Weiß");
    }
}
