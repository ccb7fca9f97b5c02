use mortgage_calc_core::{
    analyze_repayment, calculate, calculate_from_input, format_currency,
    format_number_with_commas, strip_separators, validate, Field, FieldError, LoanInput,
    MortgageCalcError, MortgageForm, MortgageType, SubmitOutcome,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Submit flow: validate -> calculate -> display
// ===========================================================================

fn form_values(amount: &str, term: &str, rate: &str, kind: Option<MortgageType>) -> LoanInput {
    LoanInput::new(amount, term, rate, kind)
}

#[test]
fn test_repayment_mortgage_end_to_end() {
    let input = form_values("150,000", "25", "5.5", Some(MortgageType::Repayment));
    let out = calculate_from_input(&input).unwrap();

    // 150k at 5.5% over 300 months: 921.131238...
    assert_eq!(out.result.monthly_repayment, dec!(921.13));
    // 921.131238... * 300 = 276,339.3715...
    assert_eq!(out.result.total_repayment, dec!(276_339.37));
    assert!(out.warnings.is_empty());

    let display = out.result.display();
    assert_eq!(display.monthly_repayment, "£921.13");
    assert_eq!(display.total_repayment, "£276,339.37");
}

#[test]
fn test_interest_only_mortgage_end_to_end() {
    let input = form_values("150,000", "25", "5.5", Some(MortgageType::InterestOnly));
    let out = calculate_from_input(&input).unwrap();

    // 150,000 * 0.055 / 12 = 687.50
    assert_eq!(out.result.monthly_repayment, dec!(687.50));
    // 687.50 * 12 * 25 = 206,250.00
    assert_eq!(out.result.total_repayment, dec!(206_250.00));
    assert_eq!(out.result.display().total_repayment, "£206,250.00");
}

#[test]
fn test_zero_principal_scenario() {
    let input = form_values("0", "10", "5", Some(MortgageType::Repayment));
    let loan = validate(&input).unwrap();
    let out = analyze_repayment(&loan).unwrap();

    assert_eq!(out.result.monthly_repayment, Decimal::ZERO);
    assert_eq!(out.result.total_repayment, Decimal::ZERO);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_zero_rate_never_divides_by_zero() {
    for years in [1u32, 5, 25, 40] {
        let input = form_values("96,000", &years.to_string(), "0", Some(MortgageType::Repayment));
        let result = calculate(&validate(&input).unwrap()).unwrap();
        let months = Decimal::from(years * 12);
        assert_eq!(
            result.monthly_repayment,
            (dec!(96_000) / months).round_dp(2),
            "{years} years"
        );
        assert_eq!(result.total_repayment, dec!(96_000));
    }
}

#[test]
fn test_total_is_monthly_times_months_for_repayment() {
    let cases = [
        ("250,000", "30", "3.9"),
        ("80,000", "15", "6.25"),
        ("1,000,000", "35", "4.75"),
    ];
    for (amount, term, rate) in cases {
        let loan = validate(&form_values(amount, term, rate, Some(MortgageType::Repayment))).unwrap();
        let result = calculate(&loan).unwrap();
        let months = Decimal::from(loan.term_months());
        // Total comes from the unrounded monthly, so it is within half a
        // penny per month of the rounded figure times the month count.
        let diff = (result.total_repayment - result.monthly_repayment * months).abs();
        assert!(
            diff <= dec!(0.005) * months + dec!(0.01),
            "{amount} {term}y {rate}%: diff {diff}"
        );
    }
}

#[test]
fn test_higher_rate_means_higher_repayment() {
    let low = calculate_from_input(&form_values("200,000", "25", "3", Some(MortgageType::Repayment)))
        .unwrap();
    let high = calculate_from_input(&form_values("200,000", "25", "6", Some(MortgageType::Repayment)))
        .unwrap();
    assert!(high.result.monthly_repayment > low.result.monthly_repayment);
    assert!(high.result.total_repayment > low.result.total_repayment);
}

#[test]
fn test_repayment_exceeds_interest_only_monthly() {
    let repay = calculate_from_input(&form_values("150,000", "25", "5.5", Some(MortgageType::Repayment)))
        .unwrap();
    let io = calculate_from_input(&form_values("150,000", "25", "5.5", Some(MortgageType::InterestOnly)))
        .unwrap();
    assert!(repay.result.monthly_repayment > io.result.monthly_repayment);
}

// ===========================================================================
// Loans at the validator's limits
// ===========================================================================

#[test]
fn test_very_long_term_pays_interest_on_principal() {
    // (1 + 0.15/12)^6000 overflows Decimal; payment is the monthly interest
    let input = form_values("150,000", "500", "15", Some(MortgageType::Repayment));
    let result = calculate(&validate(&input).unwrap()).unwrap();
    assert_eq!(result.monthly_repayment, dec!(1_875.00));
    assert_eq!(result.total_repayment, dec!(11_250_000.00));
}

#[test]
fn test_overflowing_factors_still_calculate() {
    let cases = [
        ("100,000", "1000", "7"),
        ("100,000", "30", "1000"),
        ("100,000", "1000", "50"),
    ];
    for (amount, term, rate) in cases {
        let loan = validate(&form_values(amount, term, rate, Some(MortgageType::Repayment))).unwrap();
        let result = calculate(&loan).unwrap_or_else(|e| panic!("{amount} {term}y {rate}%: {e}"));
        // Monthly interest alone is 100,000 * rate / 1200
        let interest = (dec!(100_000) * loan.annual_rate_percent() / dec!(1200)).round_dp(2);
        assert!(
            result.monthly_repayment >= interest,
            "{amount} {term}y {rate}%: {} < {interest}",
            result.monthly_repayment
        );
    }
}

#[test]
fn test_every_extreme_accepted_loan_calculates() {
    let amounts = ["0", "0.01", "1", "150,000", "1,000,000,000,000,000"];
    let terms = ["1", "2", "30", "999", "1000"];
    let rates = ["0", "0.0001", "5.5", "99.99", "1000"];
    let kinds = [MortgageType::Repayment, MortgageType::InterestOnly];

    for amount in amounts {
        for term in terms {
            for rate in rates {
                for kind in kinds {
                    let input = form_values(amount, term, rate, Some(kind));
                    let loan = validate(&input)
                        .unwrap_or_else(|e| panic!("{amount} {term}y {rate}% {kind}: {e}"));
                    let result = calculate(&loan)
                        .unwrap_or_else(|e| panic!("{amount} {term}y {rate}% {kind}: {e}"));
                    assert!(result.monthly_repayment >= Decimal::ZERO);
                    assert!(result.total_repayment >= result.monthly_repayment);
                }
            }
        }
    }
}

#[test]
fn test_largest_loan_at_highest_rate() {
    let input = form_values("1,000,000,000,000,000", "1000", "1000", Some(MortgageType::Repayment));
    let out = calculate_from_input(&input).unwrap();
    // 1e15 * 10 / 12
    assert_eq!(out.result.monthly_repayment, dec!(833_333_333_333_333.33));
    assert_eq!(out.warnings.len(), 2);
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_every_required_field_reported() {
    let err = calculate_from_input(&LoanInput::default()).unwrap_err();
    let MortgageCalcError::Validation(errors) = err else {
        panic!("expected validation failure");
    };
    for field in Field::ALL {
        assert_eq!(errors.get(field), Some(&FieldError::Required), "{field}");
    }
}

#[test]
fn test_mixed_errors_collected_together() {
    let errors = validate(&form_values("abc", "", "x", None)).unwrap_err();
    assert_eq!(errors.get(Field::Amount), Some(&FieldError::InvalidNumber));
    assert_eq!(errors.get(Field::Term), Some(&FieldError::Required));
    assert_eq!(errors.get(Field::InterestRate), Some(&FieldError::InvalidNumber));
    assert_eq!(errors.get(Field::MortgageType), Some(&FieldError::Required));
}

#[test]
fn test_unknown_mortgage_type_rejected_at_deserialization() {
    let parsed = serde_json::from_str::<LoanInput>(
        r#"{"amount": "1", "term": "1", "interest_rate": "1", "mortgage_type": "offset"}"#,
    );
    assert!(parsed.is_err());
}

// ===========================================================================
// Formatting
// ===========================================================================

#[test]
fn test_format_properties() {
    let samples = ["", "7", "42", "999", "1000", "65536", "1234567", "12,34,567", "1234.5678"];
    for x in samples {
        let once = format_number_with_commas(x);
        assert_eq!(format_number_with_commas(&once), once, "idempotent for {x:?}");
        assert_eq!(strip_separators(&once), strip_separators(x), "left inverse for {x:?}");
    }
}

#[test]
fn test_currency_rounding_is_half_up() {
    assert_eq!(format_currency(dec!(0.005)), "£0.01");
    assert_eq!(format_currency(dec!(1234.565)), "£1,234.57");
    assert_eq!(format_currency(dec!(1234.564)), "£1,234.56");
}

// ===========================================================================
// Form holder
// ===========================================================================

#[test]
fn test_form_keystroke_to_result() {
    let mut form = MortgageForm::new();
    assert_eq!(form.set_amount("1"), "1");
    assert_eq!(form.set_amount("15"), "15");
    assert_eq!(form.set_amount("1500"), "1,500");
    assert_eq!(form.set_amount("1,50000"), "150,000");
    form.set_term("25");
    form.set_interest_rate("5.5");
    form.set_mortgage_type(MortgageType::Repayment);

    match form.submit().unwrap() {
        SubmitOutcome::Calculated(result) => {
            assert_eq!(result.monthly_repayment, dec!(921.13));
        }
        SubmitOutcome::Rejected(errors) => panic!("unexpected errors: {errors}"),
    }
}
