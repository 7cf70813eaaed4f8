use serde::{Deserialize, Serialize};

use super::domain::CollateralType;
use super::intake::{parse_optional_number, ApplicationForm};

/// Data-entry screens in the order an officer completes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    ApplicantAndLoan,
    BusinessDetails,
    CashFlow,
    Capital,
    Collateral,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::ApplicantAndLoan,
        WizardStep::BusinessDetails,
        WizardStep::CashFlow,
        WizardStep::Capital,
        WizardStep::Collateral,
        WizardStep::Review,
    ];

    pub const COUNT: u8 = 6;

    pub fn from_number(number: u8) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(usize::from(index)))
            .copied()
    }

    pub const fn number(self) -> u8 {
        match self {
            WizardStep::ApplicantAndLoan => 1,
            WizardStep::BusinessDetails => 2,
            WizardStep::CashFlow => 3,
            WizardStep::Capital => 4,
            WizardStep::Collateral => 5,
            WizardStep::Review => 6,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            WizardStep::ApplicantAndLoan => "Applicant & Loan Request",
            WizardStep::BusinessDetails => "Business Details",
            WizardStep::CashFlow => "Affordability / Cash Flow",
            WizardStep::Capital => "Equity / Capital",
            WizardStep::Collateral => "Collateral",
            WizardStep::Review => "Review & Output",
        }
    }

    fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }
}

fn has_text(raw: &str) -> bool {
    !raw.trim().is_empty()
}

fn has_number(raw: &str) -> bool {
    matches!(parse_optional_number(raw), Ok(Some(_)))
}

/// Labels of the fields a step still needs: text answers first, then figures.
pub fn missing_fields(form: &ApplicationForm, step: WizardStep) -> Vec<&'static str> {
    let mut missing = Vec::new();
    fn text(label: &'static str, raw: &str, missing: &mut Vec<&'static str>) {
        if !has_text(raw) {
            missing.push(label);
        }
    }
    fn number(label: &'static str, raw: &str, missing: &mut Vec<&'static str>) {
        if !has_number(raw) {
            missing.push(label);
        }
    }

    match step {
        WizardStep::ApplicantAndLoan => {
            text("Credit Officer ID", &form.credit_officer_id, &mut missing);
            text("Credit Officer Name", &form.credit_officer_name, &mut missing);
            text("Applicant Name", &form.applicant_name, &mut missing);
            text("Applicant ID", &form.applicant_id, &mut missing);
            text("Sex", &form.sex, &mut missing);
            text("Branch", &form.branch, &mut missing);
            text("Repeat Borrower", &form.repeat_borrower, &mut missing);
            text("Prior Default", &form.prior_default, &mut missing);
            number("Age (years)", &form.age_years, &mut missing);
            number(
                "Requested Loan Amount",
                &form.requested_loan_amount,
                &mut missing,
            );
            let has_override = has_number(&form.monthly_installment_override);
            let has_terms =
                has_number(&form.term_months) && has_number(&form.annual_interest_rate);
            if !has_override && !has_terms {
                missing.push(
                    "Monthly Installment override OR both Term (months) and Annual Interest Rate",
                );
            }
        }
        WizardStep::BusinessDetails => {
            text("Business Name", &form.business_name, &mut missing);
            text("Sector", &form.sector, &mut missing);
            text(
                "Training/Certification",
                &form.training_certification,
                &mut missing,
            );
            text("Is Business Seasonal", &form.is_business_seasonal, &mut missing);
            text(
                "Character References",
                &form.character_references,
                &mut missing,
            );
            number(
                "Years in Business",
                &form.years_in_business_months,
                &mut missing,
            );
            number(
                "Stability of Business Location",
                &form.stability_months,
                &mut missing,
            );
        }
        WizardStep::CashFlow => {
            let fields: [(&'static str, &str); 11] = [
                ("Stated Revenue", &form.stated_revenue),
                ("Verified Revenue", &form.verified_revenue),
                ("COGS / Inventory", &form.cogs_inventory),
                ("Rent", &form.rent),
                ("Utilities", &form.utilities),
                ("Wages", &form.wages),
                ("Transport", &form.transport),
                ("Other Operating Costs", &form.other_operating_costs),
                ("Other Monthly Income", &form.other_monthly_income),
                ("Household Expenses", &form.household_expenses),
                ("Owner Withdrawals", &form.owner_withdrawals),
            ];
            for (label, raw) in fields {
                number(label, raw, &mut missing);
            }
        }
        WizardStep::Capital => {
            number("Total Capital", &form.total_capital, &mut missing);
            number(
                "Cash at Bank / Additional Savings / Equity",
                &form.additional_savings_equity,
                &mut missing,
            );
        }
        WizardStep::Collateral => {
            text("Collateral Type", &form.collateral_type, &mut missing);
            text("Collateral Insured", &form.collateral_insured, &mut missing);
            let needs_value = matches!(
                CollateralType::from_label(&form.collateral_type),
                Some(CollateralType::Movable | CollateralType::Immovable)
            );
            if needs_value {
                number("Market Value", &form.market_value, &mut missing);
            }
        }
        WizardStep::Review => {}
    }

    missing
}

/// Raised when the officer tries to leave a step that still has gaps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("step {step} is incomplete: {}", .missing.join(", "))]
pub struct IncompleteStep {
    pub step: u8,
    pub missing: Vec<&'static str>,
}

/// Navigation state for the data-entry screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wizard {
    current: WizardStep,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            current: WizardStep::ApplicantAndLoan,
        }
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Move to the next step once the current one is complete. Staying on the
    /// final step is not an error.
    pub fn advance(&mut self, form: &ApplicationForm) -> Result<WizardStep, IncompleteStep> {
        let missing = missing_fields(form, self.current);
        if !missing.is_empty() {
            return Err(IncompleteStep {
                step: self.current.number(),
                missing,
            });
        }
        if let Some(next) = self.current.next() {
            self.current = next;
        }
        Ok(self.current)
    }

    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.current.previous() {
            self.current = previous;
        }
        self.current
    }

    pub fn reset(&mut self) {
        self.current = WizardStep::ApplicantAndLoan;
    }

    /// Fraction of the wizard reached, from 1/6 to 1.
    pub fn progress(&self) -> f64 {
        f64::from(self.current.number()) / f64::from(WizardStep::COUNT)
    }
}
