use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fully typed loan application snapshot handed to the scoring engine.
///
/// Optional numeric fields stay `None` when the officer left them blank so
/// that every derived metric depending on them is reported as unknown rather
/// than computed from a zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationInput {
    pub applicant: ApplicantDetails,
    pub loan: LoanRequest,
    pub business: BusinessProfile,
    pub cash_flow: CashFlowStatement,
    pub capital: CapitalPosition,
    pub collateral: CollateralPledge,
}

/// Identity and behavioral attributes of the borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantDetails {
    pub credit_officer_id: String,
    pub credit_officer_name: String,
    pub applicant_id: String,
    pub applicant_name: String,
    pub branch: String,
    pub application_date: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub age_years: Option<f64>,
    pub marital_status: Option<MaritalStatus>,
    pub literacy: String,
    pub repeat_borrower: Option<bool>,
    /// Ordinal of this loan in the borrower's series; "5+" is recorded as 5.
    pub loan_series: Option<u32>,
    pub prior_default: Option<bool>,
}

/// Requested facility and repayment terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub requested_amount: f64,
    pub installment_override: Option<f64>,
    pub term_months: Option<f64>,
    pub annual_interest_rate: Option<f64>,
    pub purpose: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub business_name: String,
    pub business_type: String,
    pub ownership: String,
    pub sector: Option<Sector>,
    pub months_in_business: Option<f64>,
    pub seasonal: Option<bool>,
    pub training_certification: Option<bool>,
    pub character_references: Option<CharacterReference>,
    /// Site-visit assessment on a 0-5 scale.
    pub site_visit_score: u8,
    pub location_stability_months: Option<f64>,
}

/// Monthly cash-flow figures collected from the applicant and bank statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    pub stated_revenue: Option<f64>,
    pub verified_revenue: Option<f64>,
    pub cost_of_goods: Option<f64>,
    pub operating_expenses: OperatingExpenses,
    pub other_income: Option<f64>,
    pub household_expenses: Option<f64>,
    pub owner_withdrawals: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingExpenses {
    pub rent: Option<f64>,
    pub utilities: Option<f64>,
    pub wages: Option<f64>,
    pub transport: Option<f64>,
    pub other: Option<f64>,
}

impl OperatingExpenses {
    /// Sum of all five lines, or `None` when any line is unknown.
    pub fn total(&self) -> Option<f64> {
        Some(self.rent? + self.utilities? + self.wages? + self.transport? + self.other?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalPosition {
    pub total_capital: Option<f64>,
    pub additional_equity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollateralPledge {
    pub collateral_type: Option<CollateralType>,
    pub insured: Option<bool>,
    pub market_value: Option<f64>,
}

/// Applicant sex as recorded on the form. `Unspecified` absorbs any other
/// entry and earns no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(other)]
    Unspecified,
}

impl Sex {
    pub fn from_label(raw: &str) -> Option<Self> {
        let sex = match raw.trim() {
            "" => return None,
            "M" => Sex::Male,
            "F" => Sex::Female,
            _ => Sex::Unspecified,
        };
        Some(sex)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Married,
    Single,
    Widowed,
    #[serde(other)]
    Unspecified,
}

impl MaritalStatus {
    pub fn from_label(raw: &str) -> Option<Self> {
        let status = match raw.trim() {
            "" => return None,
            "Married" => MaritalStatus::Married,
            "Single" => MaritalStatus::Single,
            "Widowed" => MaritalStatus::Widowed,
            _ => MaritalStatus::Unspecified,
        };
        Some(status)
    }
}

/// Business sector. `Unlisted` absorbs any value outside the closed set and
/// never matches a stress factor or sector bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    Trade,
    Service,
    Manufacturing,
    Agriculture,
    Other,
    #[serde(other)]
    Unlisted,
}

impl Sector {
    pub const LISTED: [Sector; 5] = [
        Sector::Trade,
        Sector::Service,
        Sector::Manufacturing,
        Sector::Agriculture,
        Sector::Other,
    ];

    pub fn from_label(raw: &str) -> Option<Self> {
        let sector = match raw.trim() {
            "" => return None,
            "Trade" => Sector::Trade,
            "Service" => Sector::Service,
            "Manufacturing" => Sector::Manufacturing,
            "Agriculture" => Sector::Agriculture,
            "Other" => Sector::Other,
            _ => Sector::Unlisted,
        };
        Some(sector)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Sector::Trade => "Trade",
            Sector::Service => "Service",
            Sector::Manufacturing => "Manufacturing",
            Sector::Agriculture => "Agriculture",
            Sector::Other => "Other",
            Sector::Unlisted => "Unlisted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterReference {
    Good,
    Average,
    Poor,
    #[serde(other)]
    Unspecified,
}

impl CharacterReference {
    pub fn from_label(raw: &str) -> Option<Self> {
        let reference = match raw.trim() {
            "" => return None,
            "Good" => CharacterReference::Good,
            "Average" => CharacterReference::Average,
            "Poor" => CharacterReference::Poor,
            _ => CharacterReference::Unspecified,
        };
        Some(reference)
    }
}

/// Pledged collateral kind. `Unsecured` is the explicit "None" selection;
/// `Unlisted` absorbs unrecognized values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollateralType {
    Movable,
    Immovable,
    #[serde(rename = "None")]
    Unsecured,
    #[serde(other)]
    Unlisted,
}

impl CollateralType {
    pub fn from_label(raw: &str) -> Option<Self> {
        let kind = match raw.trim() {
            "" => return None,
            "Movable" => CollateralType::Movable,
            "Immovable" => CollateralType::Immovable,
            "None" => CollateralType::Unsecured,
            _ => CollateralType::Unlisted,
        };
        Some(kind)
    }

    /// Fraction of market value discounted before computing loan-to-value.
    pub const fn haircut(self) -> f64 {
        match self {
            CollateralType::Movable => 0.5,
            CollateralType::Immovable => 0.3,
            CollateralType::Unsecured | CollateralType::Unlisted => 0.0,
        }
    }
}
