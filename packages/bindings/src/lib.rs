use napi::Result as NapiResult;
use napi_derive::napi;

use mortgage_calc_core::{
    form, format, repayment, validation, Field, LoanInput, MortgageType,
};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_field(name: &str) -> NapiResult<Field> {
    Field::ALL
        .into_iter()
        .find(|f| f.as_str() == name)
        .ok_or_else(|| to_napi_error(format!("unknown field '{name}'")))
}

// ---------------------------------------------------------------------------
// Stateless calls
// ---------------------------------------------------------------------------

/// Returns `{ valid, errors, loan }` as JSON.
#[napi]
pub fn validate_loan(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let value = match validation::validate(&input) {
        Ok(loan) => serde_json::json!({ "valid": true, "errors": {}, "loan": loan }),
        Err(errors) => serde_json::json!({ "valid": false, "errors": errors, "loan": null }),
    };
    serde_json::to_string(&value).map_err(to_napi_error)
}

#[napi]
pub fn calculate_repayment(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = repayment::calculate_from_input(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn format_number_with_commas(value: String) -> String {
    format::format_number_with_commas(&value)
}

#[napi]
pub fn format_currency(value: String) -> NapiResult<String> {
    let amount = format::parse_number(&value)
        .ok_or_else(|| to_napi_error(format!("'{value}' is not a valid number")))?;
    Ok(format::format_currency(amount))
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

#[napi]
pub struct MortgageForm {
    inner: form::MortgageForm,
}

impl Default for MortgageForm {
    fn default() -> Self {
        Self::new()
    }
}

// Checked at compile time: this crate's tests cannot link outside Node.
const _: fn() -> MortgageForm = <MortgageForm as Default>::default;

#[napi]
impl MortgageForm {
    #[napi(constructor)]
    pub fn new() -> Self {
        Self {
            inner: form::MortgageForm::new(),
        }
    }

    /// Returns the amount as it should now be displayed.
    #[napi]
    pub fn set_amount(&mut self, value: String) -> String {
        self.inner.set_amount(&value).to_string()
    }

    #[napi]
    pub fn set_term(&mut self, value: String) -> String {
        self.inner.set_term(&value).to_string()
    }

    #[napi]
    pub fn set_interest_rate(&mut self, value: String) {
        self.inner.set_interest_rate(&value);
    }

    #[napi]
    pub fn set_mortgage_type(&mut self, value: String) -> NapiResult<()> {
        let mortgage_type: MortgageType = value.parse().map_err(to_napi_error)?;
        self.inner.set_mortgage_type(mortgage_type);
        Ok(())
    }

    #[napi]
    pub fn touch(&mut self, field: String) -> NapiResult<()> {
        self.inner.touch(parse_field(&field)?);
        Ok(())
    }

    /// Errors for touched fields as a `{ field: message }` JSON object.
    #[napi]
    pub fn visible_errors(&self) -> NapiResult<String> {
        serde_json::to_string(&self.inner.visible_errors()).map_err(to_napi_error)
    }

    /// Returns `{ ok, result, display, errors }` as JSON.
    #[napi]
    pub fn submit(&mut self) -> NapiResult<String> {
        let value = match self.inner.submit().map_err(to_napi_error)? {
            form::SubmitOutcome::Calculated(result) => serde_json::json!({
                "ok": true,
                "display": result.display(),
                "result": result,
                "errors": {},
            }),
            form::SubmitOutcome::Rejected(errors) => serde_json::json!({
                "ok": false,
                "display": null,
                "result": null,
                "errors": errors,
            }),
        };
        serde_json::to_string(&value).map_err(to_napi_error)
    }

    /// The last successful result as JSON, or `null`.
    #[napi]
    pub fn result(&self) -> NapiResult<String> {
        serde_json::to_string(&self.inner.result()).map_err(to_napi_error)
    }

    #[napi]
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
