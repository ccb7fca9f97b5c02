use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use mortgage_calc_core::format::parse_number;
use mortgage_calc_core::repayment;
use mortgage_calc_core::validation::{self, LoanInput};
use mortgage_calc_core::{format_currency, format_number_with_commas, MortgageType};

use crate::input;

/// Mortgage product accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MortgageTypeArg {
    Repayment,
    #[value(alias = "interestOnly")]
    InterestOnly,
}

impl From<MortgageTypeArg> for MortgageType {
    fn from(arg: MortgageTypeArg) -> Self {
        match arg {
            MortgageTypeArg::Repayment => MortgageType::Repayment,
            MortgageTypeArg::InterestOnly => MortgageType::InterestOnly,
        }
    }
}

/// Loan fields shared by `calculate` and `validate`
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Mortgage amount; thousands separators allowed (e.g. 150,000)
    #[arg(long)]
    pub amount: Option<String>,

    /// Mortgage term in whole years
    #[arg(long)]
    pub term: Option<String>,

    /// Annual interest rate as a percentage (e.g. 5.5)
    #[arg(long, alias = "interest-rate")]
    pub rate: Option<String>,

    /// Mortgage type
    #[arg(long, value_enum)]
    pub mortgage_type: Option<MortgageTypeArg>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for separator formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatArgs {
    /// Text to format (e.g. 1234567)
    #[arg(long)]
    pub value: String,

    /// Render as currency with two decimal places
    #[arg(long)]
    pub currency: bool,
}

impl LoanArgs {
    fn has_loan_flags(&self) -> bool {
        self.amount.is_some()
            || self.term.is_some()
            || self.rate.is_some()
            || self.mortgage_type.is_some()
    }

    fn into_loan_input(self) -> LoanInput {
        LoanInput {
            amount: self.amount.unwrap_or_default(),
            term: self.term.unwrap_or_default(),
            interest_rate: self.rate.unwrap_or_default(),
            mortgage_type: self.mortgage_type.map(MortgageType::from),
        }
    }
}

/// Input file first, then loan flags; stdin is only consulted when neither
/// was given.
fn read_loan_input(mut args: LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    let loan_input = match args.input.take() {
        Some(path) => input::file::read_json(&path)?,
        None if args.has_loan_flags() => args.into_loan_input(),
        None => match input::stdin::read_stdin()? {
            Some(data) => serde_json::from_value(data)?,
            None => LoanInput::default(),
        },
    };
    log::debug!("loan input: {loan_input:?}");
    Ok(loan_input)
}

pub fn run_calculate(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    calculation_value(&read_loan_input(args)?)
}

fn calculation_value(loan_input: &LoanInput) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = validation::validate(loan_input)?;
    let output = repayment::analyze_repayment(&loan)?;

    let mut value = serde_json::to_value(&output)?;
    if let Value::Object(ref mut map) = value {
        map.insert(
            "display".to_string(),
            serde_json::to_value(output.result.display())?,
        );
    }
    Ok(value)
}

pub fn run_validate(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(validation_value(&read_loan_input(args)?))
}

fn validation_value(loan_input: &LoanInput) -> Value {
    match validation::validate(loan_input) {
        Ok(loan) => json!({
            "valid": true,
            "errors": {},
            "loan": loan,
        }),
        Err(errors) => json!({
            "valid": false,
            "errors": errors,
            "loan": null,
        }),
    }
}

pub fn run_format(args: FormatArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let formatted = if args.currency {
        let amount = parse_number(&args.value)
            .ok_or_else(|| format!("'{}' is not a valid number", args.value))?;
        format_currency(amount)
    } else {
        format_number_with_commas(&args.value)
    };
    Ok(json!({
        "input": args.value,
        "formatted": formatted,
    }))
}
