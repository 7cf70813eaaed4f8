use serde::{Deserialize, Serialize};

use super::super::domain::CollateralType;
use super::flags::PolicyFlags;

/// Named risk bucket derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBand {
    #[serde(rename = "Very High Risk")]
    VeryHigh,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Very Low Risk")]
    VeryLow,
}

/// Score floors scanned from the highest down; the first floor at or below
/// the score wins.
const RISK_BANDS: [(u32, RiskBand); 5] = [
    (85, RiskBand::VeryLow),
    (70, RiskBand::Low),
    (55, RiskBand::Moderate),
    (40, RiskBand::High),
    (1, RiskBand::VeryHigh),
];

impl RiskBand {
    pub fn for_score(score: u32) -> Self {
        RISK_BANDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, band)| *band)
            .unwrap_or(RiskBand::VeryHigh)
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskBand::VeryLow => "Very Low Risk",
            RiskBand::Low => "Low Risk",
            RiskBand::Moderate => "Moderate Risk",
            RiskBand::High => "High Risk",
            RiskBand::VeryHigh => "Very High Risk",
        }
    }
}

/// Final lending recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "REJECT")]
    Reject,
    #[serde(rename = "REFER – HEAD OFFICE")]
    ReferHeadOffice,
    #[serde(rename = "APPROVE WITH CONDITIONS – BRANCH MANAGER")]
    ApproveWithConditions,
    #[serde(rename = "APPROVE")]
    Approve,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Reject => "REJECT",
            Recommendation::ReferHeadOffice => "REFER – HEAD OFFICE",
            Recommendation::ApproveWithConditions => "APPROVE WITH CONDITIONS – BRANCH MANAGER",
            Recommendation::Approve => "APPROVE",
        }
    }
}

const REJECT_AT_OR_BELOW: u32 = 54;
const CONDITIONAL_AT_OR_BELOW: u32 = 69;

/// Waterfall from hard stops to clean approval; the first matching rule wins.
pub(crate) fn decide(
    total_score: u32,
    flags: &PolicyFlags,
    collateral_type: Option<CollateralType>,
) -> Recommendation {
    let hard_stop = flags.business_age
        || flags.cash_flow_deficit
        || flags.income_variance
        || flags.prior_default
        || flags.loan_hard_max
        || collateral_type == Some(CollateralType::Unsecured);
    if hard_stop || total_score <= REJECT_AT_OR_BELOW {
        return Recommendation::Reject;
    }

    if flags.branch_limit || flags.ltv_exceeded || flags.collateral_uninsured {
        return Recommendation::ReferHeadOffice;
    }

    if total_score <= CONDITIONAL_AT_OR_BELOW || flags.equity_shortfall || flags.no_training {
        return Recommendation::ApproveWithConditions;
    }

    Recommendation::Approve
}
