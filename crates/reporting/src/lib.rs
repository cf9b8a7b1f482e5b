//! Statistics aggregator.
//!
//! Pure projections over a slice of invoice records: free-text filtering,
//! the dashboard summary and the monthly report. Nothing here keeps state
//! between calls.

pub mod filter;
pub mod monthly;
pub mod statistics;

pub use filter::filter_invoices;
pub use monthly::{MonthlyBreakdown, MonthlyRow, ReportFigures, monthly_breakdown, report_figures};
pub use statistics::{
    CoverageSplit, StatisticsOptions, StatisticsSummary, compute_statistics,
    compute_statistics_with, trend_between,
};
