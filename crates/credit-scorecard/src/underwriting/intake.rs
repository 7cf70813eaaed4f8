use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicantDetails, ApplicationInput, BusinessProfile, CapitalPosition, CashFlowStatement,
    CharacterReference, CollateralPledge, CollateralType, LoanRequest, MaritalStatus,
    OperatingExpenses, Sector, Sex,
};

const INVALID_NUMBER: &str = "Enter a valid number.";

/// Raised when free text cannot be read as a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Enter a valid number.")]
pub struct ParseNumberError;

/// Parse officer-entered text into an optional number.
///
/// Thousands separators and surrounding whitespace are ignored; blank text is
/// absent rather than zero.
pub fn parse_optional_number(raw: &str) -> Result<Option<f64>, ParseNumberError> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(None);
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ParseNumberError),
    }
}

/// Problem with a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Every field error found while reading a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("invalid application input: {}", field_names(.errors))]
pub struct InputErrors {
    pub errors: Vec<FieldError>,
}

fn field_names(errors: &[FieldError]) -> String {
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    fields.join(", ")
}

/// Raw text form as held by the data-entry screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationForm {
    pub credit_officer_id: String,
    pub credit_officer_name: String,
    pub applicant_name: String,
    pub applicant_id: String,
    pub sex: String,
    pub age_years: String,
    pub marital_status: String,
    pub literacy: String,
    pub repeat_borrower: String,
    pub loan_series: String,
    pub prior_default: String,
    pub branch: String,
    pub application_date: String,
    pub requested_loan_amount: String,
    pub monthly_installment_override: String,
    pub term_months: String,
    pub annual_interest_rate: String,
    pub business_name: String,
    pub ownership: String,
    pub site_visit_assessment: u8,
    pub sector: String,
    pub training_certification: String,
    pub is_business_seasonal: String,
    pub business_type: String,
    pub years_in_business_months: String,
    pub character_references: String,
    pub loan_purpose: String,
    pub stability_months: String,
    pub stated_revenue: String,
    pub verified_revenue: String,
    pub cogs_inventory: String,
    pub other_monthly_income: String,
    pub rent: String,
    pub household_expenses: String,
    pub utilities: String,
    pub owner_withdrawals: String,
    pub wages: String,
    pub transport: String,
    pub other_operating_costs: String,
    pub total_capital: String,
    pub additional_savings_equity: String,
    pub collateral_type: String,
    pub collateral_insured: String,
    pub market_value: String,
}

/// Collects field errors while a form is being read.
struct FieldReader {
    errors: Vec<FieldError>,
}

impl FieldReader {
    fn number(&mut self, field: &str, raw: &str) -> Option<f64> {
        match parse_optional_number(raw) {
            Ok(value) => value,
            Err(_) => {
                self.errors.push(FieldError::new(field, INVALID_NUMBER));
                None
            }
        }
    }

    fn date(&mut self, field: &str, raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors
                    .push(FieldError::new(field, "Enter a date as YYYY-MM-DD."));
                None
            }
        }
    }
}

/// Yes/No answer; anything else counts as unanswered.
fn parse_yes_no(raw: &str) -> Option<bool> {
    match raw.trim() {
        "Yes" => Some(true),
        "No" => Some(false),
        _ => None,
    }
}

/// Loan series ordinal; "5+" is recorded as 5 and unreadable entries as unknown.
fn parse_loan_series(raw: &str) -> Option<u32> {
    match raw.trim() {
        "5+" => Some(5),
        other => other.parse().ok(),
    }
}

impl ApplicationForm {
    /// Convert the text form into a typed application, reporting every bad
    /// field at once.
    pub fn parse(&self) -> Result<ApplicationInput, InputErrors> {
        let mut reader = FieldReader { errors: Vec::new() };

        let applicant = ApplicantDetails {
            credit_officer_id: self.credit_officer_id.trim().to_string(),
            credit_officer_name: self.credit_officer_name.trim().to_string(),
            applicant_id: self.applicant_id.trim().to_string(),
            applicant_name: self.applicant_name.trim().to_string(),
            branch: self.branch.trim().to_string(),
            application_date: reader.date("application_date", &self.application_date),
            sex: Sex::from_label(&self.sex),
            age_years: reader.number("age_years", &self.age_years),
            marital_status: MaritalStatus::from_label(&self.marital_status),
            literacy: self.literacy.trim().to_string(),
            repeat_borrower: parse_yes_no(&self.repeat_borrower),
            loan_series: parse_loan_series(&self.loan_series),
            prior_default: parse_yes_no(&self.prior_default),
        };

        let requested_amount =
            reader.number("requested_loan_amount", &self.requested_loan_amount);
        if requested_amount.is_none() && self.requested_loan_amount.trim().is_empty() {
            reader
                .errors
                .push(FieldError::new("requested_loan_amount", "is required"));
        }

        let loan = LoanRequest {
            requested_amount: requested_amount.unwrap_or_default(),
            installment_override: reader.number(
                "monthly_installment_override",
                &self.monthly_installment_override,
            ),
            term_months: reader.number("term_months", &self.term_months),
            annual_interest_rate: reader.number("annual_interest_rate", &self.annual_interest_rate),
            purpose: self.loan_purpose.trim().to_string(),
        };

        if self.site_visit_assessment > 5 {
            reader.errors.push(FieldError::new(
                "site_visit_assessment",
                "must be between 0 and 5",
            ));
        }

        let business = BusinessProfile {
            business_name: self.business_name.trim().to_string(),
            business_type: self.business_type.trim().to_string(),
            ownership: self.ownership.trim().to_string(),
            sector: Sector::from_label(&self.sector),
            months_in_business: reader
                .number("years_in_business_months", &self.years_in_business_months),
            seasonal: parse_yes_no(&self.is_business_seasonal),
            training_certification: parse_yes_no(&self.training_certification),
            character_references: CharacterReference::from_label(&self.character_references),
            site_visit_score: self.site_visit_assessment,
            location_stability_months: reader.number("stability_months", &self.stability_months),
        };

        let cash_flow = CashFlowStatement {
            stated_revenue: reader.number("stated_revenue", &self.stated_revenue),
            verified_revenue: reader.number("verified_revenue", &self.verified_revenue),
            cost_of_goods: reader.number("cogs_inventory", &self.cogs_inventory),
            operating_expenses: OperatingExpenses {
                rent: reader.number("rent", &self.rent),
                utilities: reader.number("utilities", &self.utilities),
                wages: reader.number("wages", &self.wages),
                transport: reader.number("transport", &self.transport),
                other: reader.number("other_operating_costs", &self.other_operating_costs),
            },
            other_income: reader.number("other_monthly_income", &self.other_monthly_income),
            household_expenses: reader.number("household_expenses", &self.household_expenses),
            owner_withdrawals: reader.number("owner_withdrawals", &self.owner_withdrawals),
        };

        let capital = CapitalPosition {
            total_capital: reader.number("total_capital", &self.total_capital),
            additional_equity: reader
                .number("additional_savings_equity", &self.additional_savings_equity),
        };

        let collateral = CollateralPledge {
            collateral_type: CollateralType::from_label(&self.collateral_type),
            insured: parse_yes_no(&self.collateral_insured),
            market_value: reader.number("market_value", &self.market_value),
        };

        if !reader.errors.is_empty() {
            return Err(InputErrors {
                errors: reader.errors,
            });
        }

        Ok(ApplicationInput {
            applicant,
            loan,
            business,
            cash_flow,
            capital,
            collateral,
        })
    }

    /// Sample applicant used to prefill new forms.
    pub fn sample() -> Self {
        Self {
            credit_officer_id: "CO-001".to_string(),
            credit_officer_name: "Sample Officer".to_string(),
            applicant_name: "Sample Applicant".to_string(),
            applicant_id: "APP-0001".to_string(),
            sex: "M".to_string(),
            age_years: "35".to_string(),
            marital_status: "Married".to_string(),
            literacy: "Secondary/High School".to_string(),
            repeat_borrower: "No".to_string(),
            loan_series: "2".to_string(),
            prior_default: "No".to_string(),
            branch: "Head Office".to_string(),
            application_date: String::new(),
            requested_loan_amount: "50000".to_string(),
            monthly_installment_override: "4584".to_string(),
            term_months: "12".to_string(),
            annual_interest_rate: "18".to_string(),
            business_name: "Sample Business".to_string(),
            ownership: "Sole Proprietor".to_string(),
            site_visit_assessment: 3,
            sector: "Trade".to_string(),
            training_certification: "Yes".to_string(),
            is_business_seasonal: "No".to_string(),
            business_type: "Retail / Trading".to_string(),
            years_in_business_months: "24".to_string(),
            character_references: "Good".to_string(),
            loan_purpose: "Working Capital".to_string(),
            stability_months: "24".to_string(),
            stated_revenue: "30000".to_string(),
            verified_revenue: "28000".to_string(),
            cogs_inventory: "12000".to_string(),
            other_monthly_income: "2000".to_string(),
            rent: "3000".to_string(),
            household_expenses: "5000".to_string(),
            utilities: "800".to_string(),
            owner_withdrawals: "1500".to_string(),
            wages: "2500".to_string(),
            transport: "700".to_string(),
            other_operating_costs: "1000".to_string(),
            total_capital: "20000".to_string(),
            additional_savings_equity: "10000".to_string(),
            collateral_type: "Movable".to_string(),
            collateral_insured: "Yes".to_string(),
            market_value: "150000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_separators_and_whitespace() {
        assert_eq!(parse_optional_number(" 1,250,000.50 "), Ok(Some(1_250_000.5)));
        assert_eq!(parse_optional_number("-42"), Ok(Some(-42.0)));
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(parse_optional_number(""), Ok(None));
        assert_eq!(parse_optional_number("  ,  "), Ok(None));
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert_eq!(parse_optional_number("12k"), Err(ParseNumberError));
        assert_eq!(parse_optional_number("NaN"), Err(ParseNumberError));
        assert_eq!(ParseNumberError.to_string(), "Enter a valid number.");
    }

    #[test]
    fn sample_form_parses() {
        let input = ApplicationForm::sample().parse().expect("sample parses");
        assert_eq!(input.loan.requested_amount, 50_000.0);
        assert_eq!(input.loan.installment_override, Some(4_584.0));
        assert_eq!(input.business.sector, Some(Sector::Trade));
        assert_eq!(input.applicant.sex, Some(Sex::Male));
        assert_eq!(input.applicant.loan_series, Some(2));
        assert_eq!(input.collateral.insured, Some(true));
        assert_eq!(input.cash_flow.operating_expenses.total(), Some(8_000.0));
    }

    #[test]
    fn reports_every_bad_field() {
        let mut form = ApplicationForm::sample();
        form.rent = "three thousand".to_string();
        form.market_value = "1.5m".to_string();
        form.requested_loan_amount = String::new();

        let errors = form.parse().expect_err("form is invalid").errors;
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["requested_loan_amount", "rent", "market_value"]);
        assert_eq!(errors[1].message, "Enter a valid number.");
        assert_eq!(errors[0].message, "is required");
    }

    #[test]
    fn blank_optional_fields_stay_absent() {
        let mut form = ApplicationForm::sample();
        form.verified_revenue = String::new();
        form.sex = String::new();

        let input = form.parse().expect("blank fields are allowed");
        assert_eq!(input.cash_flow.verified_revenue, None);
        assert_eq!(input.applicant.sex, None);
    }

    #[test]
    fn loan_series_accepts_open_ended_bucket() {
        let mut form = ApplicationForm::sample();
        form.loan_series = "5+".to_string();
        let input = form.parse().expect("parses");
        assert_eq!(input.applicant.loan_series, Some(5));
    }

    #[test]
    fn unknown_sector_is_not_an_error() {
        let mut form = ApplicationForm::sample();
        form.sector = "Mining".to_string();
        let input = form.parse().expect("parses");
        assert_eq!(input.business.sector, Some(Sector::Unlisted));
    }

    #[test]
    fn unrecognized_answers_are_not_errors() {
        let mut form = ApplicationForm::sample();
        form.sex = "X".to_string();
        form.marital_status = "Divorced".to_string();
        form.training_certification = "Unknown".to_string();
        form.character_references = "Excellent".to_string();
        form.collateral_insured = "Maybe".to_string();
        form.loan_series = "first".to_string();

        let input = form.parse().expect("unrecognized answers are accepted");
        assert_eq!(input.applicant.sex, Some(Sex::Unspecified));
        assert_eq!(
            input.applicant.marital_status,
            Some(MaritalStatus::Unspecified)
        );
        assert_eq!(input.applicant.loan_series, None);
        assert_eq!(input.business.training_certification, None);
        assert_eq!(
            input.business.character_references,
            Some(CharacterReference::Unspecified)
        );
        assert_eq!(input.collateral.insured, None);
    }

    #[test]
    fn site_visit_score_is_bounded() {
        let mut form = ApplicationForm::sample();
        form.site_visit_assessment = 6;
        let errors = form.parse().expect_err("out of range").errors;
        assert_eq!(errors[0].field, "site_visit_assessment");
    }

    #[test]
    fn application_date_is_parsed() {
        let mut form = ApplicationForm::sample();
        form.application_date = "2026-03-14".to_string();
        let input = form.parse().expect("parses");
        assert_eq!(
            input.applicant.application_date,
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );

        form.application_date = "14/03/2026".to_string();
        let errors = form.parse().expect_err("bad date").errors;
        assert_eq!(errors[0].field, "application_date");
    }
}
