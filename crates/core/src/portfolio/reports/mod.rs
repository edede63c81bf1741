//! Reports over a holdings table: performers, group totals, overview and
//! averaging signals. Every function is pure and returns plain records.

mod averaging;
mod performers;
mod reports_model;
mod summaries;


pub use averaging::averaging_candidates;
pub use performers::top_performers;
pub use reports_model::{
    AllocatedHolding, AveragingCandidate, AveragingReport, GroupDimension, GroupSummary,
    PerformanceOrder, PerformerRow, PortfolioOverview,
};
pub use summaries::{group_summary, portfolio_overview, with_allocation};

use rust_decimal::Decimal;

use crate::errors::{CalculatorError, Error, Result};
use crate::portfolio::holdings::percent_of;

/// Percentage share rounded for display; zero for an empty or zero total.
fn share_pct(part: Decimal, total: Decimal) -> Result<Decimal> {
    percent_of(part, total).ok_or_else(|| report_overflow("allocation"))
}

/// Sum that fails instead of panicking when the total leaves `Decimal` range.
fn checked_total<I>(values: I, report: &'static str) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
        .ok_or_else(|| report_overflow(report))
}

fn report_overflow(report: &'static str) -> Error {
    CalculatorError::ReportOverflow(report).into()
}
