//! Small-business loan underwriting: application intake, the data-entry
//! wizard, policy snapshots, and the scorecard engine.
//!
//! Evaluation is a pure function of an [`ApplicationInput`] and a
//! [`PolicyConfig`] snapshot. Everything else in this module exists to get
//! well-typed values into that function and the result back out over HTTP.

pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod policy;
pub mod router;
pub mod service;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantDetails, ApplicationInput, BusinessProfile, CapitalPosition, CashFlowStatement,
    CharacterReference, CollateralPledge, CollateralType, LoanRequest, MaritalStatus,
    OperatingExpenses, Sector, Sex,
};
pub use evaluation::{
    amortized_installment, evaluate, CategoryScores, DerivedMetrics, PolicyFlag, PolicyFlags,
    Recommendation, RiskBand, ScorecardEngine, ScorecardResult, NO_COLLATERAL_LTV,
};
pub use intake::{parse_optional_number, ApplicationForm, FieldError, InputErrors, ParseNumberError};
pub use policy::{
    default_sector_stress, validate_policy, CategoryWeights, PolicyConfig, PolicyStore,
    PolicyThresholds,
};
pub use router::scorecard_router;
pub use service::{ScorecardService, ScorecardServiceError, StepStatus};
pub use wizard::{missing_fields, IncompleteStep, Wizard, WizardStep};
