//! Form validation: raw field text in, [`ValidatedLoan`] or [`FieldErrors`] out.
//!
//! Every field is checked on every call; errors are collected rather than
//! short-circuiting so the form can flag all problems at once.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Field, FieldError, FieldErrors};
use crate::format::{format_number_with_commas, try_parse_number, ParseNumberError};
use crate::types::{Money, MortgageType, Percent};

/// Raw form values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanInput {
    /// Loan amount, possibly with thousands separators ("150,000").
    pub amount: String,
    /// Term in whole years.
    pub term: String,
    /// Annual interest rate as a percentage ("5.5").
    pub interest_rate: String,
    pub mortgage_type: Option<MortgageType>,
}

impl LoanInput {
    pub fn new(
        amount: impl Into<String>,
        term: impl Into<String>,
        interest_rate: impl Into<String>,
        mortgage_type: Option<MortgageType>,
    ) -> Self {
        Self {
            amount: amount.into(),
            term: term.into(),
            interest_rate: interest_rate.into(),
            mortgage_type,
        }
    }
}

/// Loan terms that passed validation. Only [`validate`] can build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedLoan {
    principal: Money,
    term_years: u32,
    annual_rate_percent: Percent,
    mortgage_type: MortgageType,
}

impl ValidatedLoan {
    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    pub fn annual_rate_percent(&self) -> Percent {
        self.annual_rate_percent
    }

    pub fn mortgage_type(&self) -> MortgageType {
        self.mortgage_type
    }

    pub fn term_months(&self) -> u32 {
        self.term_years * 12
    }
}

/// Longest term accepted; keeps `term_years * 12` inside `u32`.
pub const MAX_TERM_YEARS: u32 = 1_000;

/// Largest loan amount accepted.
pub const MAX_AMOUNT: Money = dec!(1_000_000_000_000_000);

/// Highest annual rate accepted, in percent.
pub const MAX_RATE_PERCENT: Percent = dec!(1_000);

/// Check every field of `input`.
pub fn validate(input: &LoanInput) -> Result<ValidatedLoan, FieldErrors> {
    let mut errors = FieldErrors::new();

    let principal = record(&mut errors, Field::Amount, check_amount(&input.amount));
    let term_years = record(&mut errors, Field::Term, check_term(&input.term));
    let rate = record(
        &mut errors,
        Field::InterestRate,
        check_rate(&input.interest_rate),
    );
    let mortgage_type = record(
        &mut errors,
        Field::MortgageType,
        input.mortgage_type.ok_or(FieldError::Required),
    );

    match (principal, term_years, rate, mortgage_type) {
        (Some(principal), Some(term_years), Some(annual_rate_percent), Some(mortgage_type))
            if errors.is_empty() =>
        {
            log::debug!(
                "validated loan: principal={principal} term={term_years}y rate={annual_rate_percent}% type={mortgage_type}"
            );
            Ok(ValidatedLoan {
                principal,
                term_years,
                annual_rate_percent,
                mortgage_type,
            })
        }
        _ => {
            log::debug!("validation failed: {errors}");
            Err(errors)
        }
    }
}

fn record<T>(errors: &mut FieldErrors, field: Field, outcome: Result<T, FieldError>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(err) => {
            errors.insert(field, err);
            None
        }
    }
}

fn required_number(text: &str, too_large: &str) -> Result<Decimal, FieldError> {
    if text.trim().is_empty() {
        return Err(FieldError::Required);
    }
    try_parse_number(text).map_err(|e| match e {
        ParseNumberError::NotANumber => FieldError::InvalidNumber,
        ParseNumberError::TooLarge => FieldError::out_of_range(too_large),
        ParseNumberError::TooPrecise => FieldError::out_of_range("Too many decimal places"),
    })
}

fn amount_limit_reason() -> String {
    format!(
        "Amount cannot exceed {}",
        format_number_with_commas(&MAX_AMOUNT.to_string())
    )
}

fn check_amount(text: &str) -> Result<Money, FieldError> {
    let amount = required_number(text, &amount_limit_reason())?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FieldError::out_of_range("Amount cannot be negative"));
    }
    if amount > MAX_AMOUNT {
        return Err(FieldError::out_of_range(amount_limit_reason()));
    }
    Ok(amount)
}

fn check_term(text: &str) -> Result<u32, FieldError> {
    let too_long = format!("Term cannot exceed {MAX_TERM_YEARS} years");
    let years = required_number(text, &too_long)?;
    if !years.fract().is_zero() {
        return Err(FieldError::out_of_range("Term must be a whole number of years"));
    }
    if years < Decimal::ONE {
        return Err(FieldError::out_of_range("Term must be at least 1 year"));
    }
    match years.to_u32() {
        Some(y) if y <= MAX_TERM_YEARS => Ok(y),
        _ => Err(FieldError::out_of_range(too_long)),
    }
}

fn check_rate(text: &str) -> Result<Percent, FieldError> {
    // The rate field never carries separators; "1,5" is not 15.
    if text.contains(crate::format::SEPARATOR) {
        return Err(FieldError::InvalidNumber);
    }
    let too_high = format!("Interest rate cannot exceed {MAX_RATE_PERCENT}%");
    let rate = required_number(text, &too_high)?;
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(FieldError::out_of_range("Interest rate cannot be negative"));
    }
    if rate > MAX_RATE_PERCENT {
        return Err(FieldError::out_of_range(too_high));
    }
    Ok(rate)
}
