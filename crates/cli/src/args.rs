use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "medbill", version, about = "Arztrechnungen und Erstattungen (PKV / Beihilfe) verwalten")]
pub struct Cli {
    /// JSON data file (defaults to the built-in sample data)
    #[arg(long = "data", env = "MEDBILL_DATA_FILE", global = true)]
    pub data_file: Option<PathBuf>,

    /// When a record counts as fully settled: `both` or `claimed`
    #[arg(long = "policy", env = "MEDBILL_SETTLEMENT_POLICY", global = true)]
    pub policy: Option<String>,

    /// Primary payer (PKV) share in percent when both payers paid out
    #[arg(long = "primary-share", env = "MEDBILL_PRIMARY_SHARE", global = true)]
    pub primary_share: Option<String>,

    /// Log output: `pretty` or `json`
    #[arg(long = "log-format", env = "MEDBILL_LOG_FORMAT", global = true)]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List invoices, optionally filtered by document number or issuer
    List {
        #[arg(short = 's', long = "search", default_value = "")]
        search: String,
        #[arg(long)]
        json: bool,
    },
    /// Dashboard statistics
    Stats {
        /// Override the month-over-month trend in percent
        #[arg(long, allow_negative_numbers = true)]
        trend: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Monthly breakdown and key report figures
    Report {
        #[arg(long)]
        json: bool,
    },
    /// Record a new invoice
    Add(AddArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Belegnummer
    #[arg(long, default_value = "")]
    pub document_number: String,
    /// Rechnungsdatum (YYYY-MM-DD or DD.MM.YYYY)
    #[arg(long, default_value = "")]
    pub invoice_date: String,
    /// Ausgestellt von
    #[arg(long, default_value = "")]
    pub issued_by: String,
    /// Betrag in EUR, e.g. 125,50
    #[arg(long, default_value = "")]
    pub amount: String,
    #[arg(long)]
    pub paid_on: Option<String>,
    #[arg(long)]
    pub primary_claim: Option<String>,
    #[arg(long)]
    pub secondary_claim: Option<String>,
    #[arg(long)]
    pub primary_settled: Option<String>,
    #[arg(long)]
    pub secondary_settled: Option<String>,
}
