//! Monthly and total repayment for repayment and interest-only mortgages.
//!
//! All math in `rust_decimal::Decimal`; results are rounded to pence with
//! midpoints rounded away from zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageCalcError;
use crate::format::{format_currency, round_currency};
use crate::time_value::{annuity_payment, interest_payment};
use crate::types::{with_metadata, ComputationOutput, Money, MortgageType};
use crate::validation::{validate, LoanInput, ValidatedLoan};
use crate::MortgageCalcResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Annual rate above which a warning is attached (25%).
const HIGH_RATE_PERCENT: Decimal = dec!(25);

/// Term above which a warning is attached.
const LONG_TERM_YEARS: u32 = 50;

/// Repayment figures, both carried at exactly two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentResult {
    pub monthly_repayment: Money,
    pub total_repayment: Money,
}

/// Currency text for a [`RepaymentResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentDisplay {
    pub monthly_repayment: String,
    pub total_repayment: String,
}

impl RepaymentResult {
    pub fn display(&self) -> RepaymentDisplay {
        RepaymentDisplay {
            monthly_repayment: format_currency(self.monthly_repayment),
            total_repayment: format_currency(self.total_repayment),
        }
    }
}

/// Compute monthly and total repayment for a validated loan.
///
/// The total is taken from the unrounded monthly figure, then both are
/// rounded. Cannot fail for loans within the validator's limits.
pub fn calculate(loan: &ValidatedLoan) -> MortgageCalcResult<RepaymentResult> {
    let monthly = monthly_repayment(loan)?;
    let total = monthly
        .checked_mul(Decimal::from(loan.term_months()))
        .ok_or_else(|| MortgageCalcError::Overflow {
            context: "total repayment".into(),
        })?;

    Ok(RepaymentResult {
        monthly_repayment: round_currency(monthly),
        total_repayment: round_currency(total),
    })
}

fn monthly_repayment(loan: &ValidatedLoan) -> MortgageCalcResult<Money> {
    let annual_rate = loan.annual_rate_percent() / dec!(100);
    let principal = loan.principal();

    let monthly = match loan.mortgage_type() {
        MortgageType::Repayment => {
            let monthly_rate = annual_rate / MONTHS_PER_YEAR;
            annuity_payment(monthly_rate, loan.term_months(), principal)?
        }
        MortgageType::InterestOnly => interest_payment(annual_rate, principal)? / MONTHS_PER_YEAR,
    };
    log::debug!(
        "{} monthly repayment before rounding: {monthly}",
        loan.mortgage_type()
    );
    Ok(monthly)
}

/// [`calculate`] wrapped in the standard output envelope.
pub fn analyze_repayment(
    loan: &ValidatedLoan,
) -> MortgageCalcResult<ComputationOutput<RepaymentResult>> {
    let start = Instant::now();

    let result = calculate(loan)?;
    let warnings = collect_warnings(loan);
    let methodology = match loan.mortgage_type() {
        MortgageType::Repayment if loan.annual_rate_percent().is_zero() => {
            "Straight-line repayment (zero interest)"
        }
        MortgageType::Repayment => "Level-payment amortization",
        MortgageType::InterestOnly => "Interest-only (principal due at term end)",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, loan, warnings, elapsed, result))
}

/// Validate raw form input, then run [`analyze_repayment`].
pub fn calculate_from_input(
    input: &LoanInput,
) -> MortgageCalcResult<ComputationOutput<RepaymentResult>> {
    let loan = validate(input)?;
    analyze_repayment(&loan)
}

fn collect_warnings(loan: &ValidatedLoan) -> Vec<String> {
    let mut warnings = Vec::new();

    if loan.principal().is_zero() {
        warnings.push("Principal is zero; repayments are zero".to_string());
    }
    if loan.mortgage_type() == MortgageType::Repayment && loan.annual_rate_percent().is_zero() {
        warnings.push("Interest rate is zero; straight-line repayment used".to_string());
    }
    if loan.annual_rate_percent() > HIGH_RATE_PERCENT {
        warnings.push(format!(
            "Interest rate of {}% is unusually high",
            loan.annual_rate_percent()
        ));
    }
    if loan.term_years() > LONG_TERM_YEARS {
        warnings.push(format!(
            "Term of {} years is unusually long",
            loan.term_years()
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
