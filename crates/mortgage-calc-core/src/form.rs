//! Value/touched/result holder backing a mortgage form.
//!
//! Mirrors the behaviour of the web form: amount and term are reformatted
//! with separators on every change, errors are shown only for touched
//! fields, and a submit touches everything before validating.

use std::collections::BTreeSet;

use crate::error::{Field, FieldErrors};
use crate::format::format_number_with_commas;
use crate::repayment::{calculate, RepaymentResult};
use crate::types::MortgageType;
use crate::validation::{validate, LoanInput};
use crate::MortgageCalcResult;

#[derive(Debug, Clone, Default)]
pub struct MortgageForm {
    input: LoanInput,
    touched: BTreeSet<Field>,
    result: Option<RepaymentResult>,
}

/// What a submit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Calculated(RepaymentResult),
    Rejected(FieldErrors),
}

impl MortgageForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the amount formatted with separators and return that text.
    pub fn set_amount(&mut self, text: &str) -> &str {
        self.input.amount = format_number_with_commas(text);
        &self.input.amount
    }

    /// Store the term formatted with separators and return that text.
    pub fn set_term(&mut self, text: &str) -> &str {
        self.input.term = format_number_with_commas(text);
        &self.input.term
    }

    pub fn set_interest_rate(&mut self, text: &str) {
        self.input.interest_rate = text.to_string();
    }

    pub fn set_mortgage_type(&mut self, mortgage_type: MortgageType) {
        self.input.mortgage_type = Some(mortgage_type);
        self.touched.insert(Field::MortgageType);
    }

    /// Mark a field as visited (blur).
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Validation errors for the fields the user has visited.
    pub fn visible_errors(&self) -> FieldErrors {
        match validate(&self.input) {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors.only(|f| self.touched.contains(&f)),
        }
    }

    /// Touch every field, validate, and compute on success.
    ///
    /// A successful submit replaces the stored result; a rejected one
    /// leaves the previous result in place.
    pub fn submit(&mut self) -> MortgageCalcResult<SubmitOutcome> {
        self.touched.extend(Field::ALL);
        match validate(&self.input) {
            Ok(loan) => {
                let result = calculate(&loan)?;
                self.result = Some(result.clone());
                Ok(SubmitOutcome::Calculated(result))
            }
            Err(errors) => Ok(SubmitOutcome::Rejected(errors)),
        }
    }

    /// Clear values, touched flags, selection and result.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn input(&self) -> &LoanInput {
        &self.input
    }

    pub fn result(&self) -> Option<&RepaymentResult> {
        self.result.as_ref()
    }
}
