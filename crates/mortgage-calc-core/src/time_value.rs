use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::MortgageCalcError;
use crate::types::{Money, Rate};
use crate::MortgageCalcResult;

/// Level payment per period that fully amortizes `principal` over `nper`
/// periods at `rate` per period.
///
/// A zero rate falls back to straight-line repayment (`principal / nper`).
pub fn annuity_payment(rate: Rate, nper: u32, principal: Money) -> MortgageCalcResult<Money> {
    if nper == 0 {
        return Err(MortgageCalcError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if rate < Decimal::ZERO {
        return Err(MortgageCalcError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate cannot be negative".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    // Past the range of Decimal, (1+r)^-n is indistinguishable from zero and
    // the payment converges to the interest on the principal.
    let Some(factor) = (Decimal::ONE + rate).checked_powi(i64::from(nper)) else {
        log::trace!("annuity factor overflowed for rate {rate} over {nper} periods");
        return interest_payment(rate, principal);
    };
    let discount = Decimal::ONE - Decimal::ONE / factor;
    log::trace!("annuity factor (1+r)^n = {factor}, 1 - (1+r)^-n = {discount}");

    // Rates tiny enough to round the discount to zero behave as zero-rate loans.
    if discount.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(discount))
        .ok_or_else(|| overflow("annuity payment"))
}

/// Per-period interest on an outstanding balance.
pub fn interest_payment(rate: Rate, principal: Money) -> MortgageCalcResult<Money> {
    principal
        .checked_mul(rate)
        .ok_or_else(|| overflow("interest payment"))
}

fn overflow(context: &str) -> MortgageCalcError {
    MortgageCalcError::Overflow {
        context: context.into(),
    }
}
