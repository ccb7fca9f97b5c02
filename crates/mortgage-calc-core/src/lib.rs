pub mod error;
pub mod form;
pub mod format;
pub mod repayment;
pub mod time_value;
pub mod types;
pub mod validation;

pub use error::{Field, FieldError, FieldErrors, MortgageCalcError};
pub use format::{format_currency, format_number_with_commas, strip_separators};
pub use form::{MortgageForm, SubmitOutcome};
pub use repayment::{
    analyze_repayment, calculate, calculate_from_input, RepaymentDisplay, RepaymentResult,
};
pub use types::*;
pub use validation::{validate, LoanInput, ValidatedLoan};

/// Standard result type for all mortgage-calc operations
pub type MortgageCalcResult<T> = Result<T, MortgageCalcError>;
