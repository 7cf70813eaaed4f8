use serde::{Deserialize, Serialize};

use super::super::domain::{
    ApplicationInput, CharacterReference, CollateralType, MaritalStatus, Sector, Sex,
};
use super::super::policy::PolicyConfig;
use super::metrics::DerivedMetrics;

/// The five capped sub-scores making up the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub character: u32,
    pub capacity: u32,
    pub capital: u32,
    pub collateral: u32,
    pub conditions: u32,
}

impl CategoryScores {
    /// Sum of the category scores clamped to the 1-99 scale.
    pub fn total(&self) -> u32 {
        let sum: u64 = [
            self.character,
            self.capacity,
            self.capital,
            self.collateral,
            self.conditions,
        ]
        .into_iter()
        .map(u64::from)
        .sum();
        sum.clamp(1, 99) as u32
    }
}

fn capped(points: i32, cap: u32) -> u32 {
    points.clamp(0, cap.min(i32::MAX as u32) as i32) as u32
}

fn character_points(input: &ApplicationInput) -> i32 {
    let applicant = &input.applicant;
    let business = &input.business;
    let mut points = 0;

    if business.training_certification == Some(true) {
        points += 5;
    }
    if applicant.sex == Some(Sex::Female) {
        points += 3;
    }
    points += match business.months_in_business {
        Some(months) if months >= 36.0 => 12,
        Some(months) if months >= 24.0 => 10,
        Some(months) if months >= 12.0 => 6,
        _ => 0,
    };
    points += match business.character_references {
        Some(CharacterReference::Good) => 5,
        Some(CharacterReference::Average) => 2,
        _ => 0,
    };
    if applicant.age_years.is_some_and(|age| age >= 40.0) {
        points += 2;
    }
    if applicant.marital_status == Some(MaritalStatus::Married) {
        points += 1;
    }
    if applicant.repeat_borrower == Some(true) {
        points += 3;
        if applicant.loan_series.is_some_and(|series| series >= 3) {
            points += 5;
        }
    }
    points
}

fn capacity_points(metrics: &DerivedMetrics, policy: &PolicyConfig) -> i32 {
    match metrics.stressed_dscr {
        Some(dscr) if dscr >= 1.5 => 34,
        Some(dscr) if dscr >= policy.thresholds.dscr_target => 28,
        Some(dscr) if dscr >= 1.1 => 18,
        Some(dscr) if dscr >= 0.9 => 8,
        _ => 0,
    }
}

fn capital_points(metrics: &DerivedMetrics, policy: &PolicyConfig) -> i32 {
    match metrics.equity_ratio {
        Some(ratio) if ratio >= 0.2 => 15,
        Some(ratio) if ratio >= 0.15 => 12,
        Some(ratio) if ratio >= policy.thresholds.equity_min_ratio => 8,
        Some(ratio) if ratio >= 0.05 => 3,
        _ => 0,
    }
}

/// Loan-to-value ceiling for a collateral kind; `None` for kinds without one.
pub(crate) fn ltv_ceiling(
    collateral_type: Option<CollateralType>,
    policy: &PolicyConfig,
) -> Option<f64> {
    match collateral_type {
        Some(CollateralType::Movable) => Some(policy.thresholds.ltv_max_movable),
        Some(CollateralType::Immovable) => Some(policy.thresholds.ltv_max_immovable),
        _ => None,
    }
}

fn collateral_points(
    input: &ApplicationInput,
    metrics: &DerivedMetrics,
    policy: &PolicyConfig,
) -> i32 {
    let collateral = &input.collateral;
    if collateral.collateral_type == Some(CollateralType::Unsecured) {
        return 0;
    }

    let ceiling = ltv_ceiling(collateral.collateral_type, policy);
    let mut points = match (metrics.ltv, ceiling) {
        (Some(ltv), Some(_)) if ltv <= 1.0 => 10,
        (Some(ltv), Some(max)) if ltv <= max => 6,
        _ => 0,
    };
    if collateral.insured == Some(false) {
        points -= 2;
    }
    points
}

fn sector_bonus(sector: Option<Sector>) -> i32 {
    match sector {
        Some(Sector::Trade) => 3,
        Some(Sector::Service) => 2,
        Some(Sector::Agriculture) | Some(Sector::Manufacturing) => 1,
        _ => 0,
    }
}

fn conditions_points(input: &ApplicationInput) -> i32 {
    let business = &input.business;
    let mut points = match business.site_visit_score {
        score if score >= 4 => 5,
        3 => 3,
        _ => 0,
    };
    if business.seasonal == Some(false) {
        points += 2;
    }
    if let (Some(tenure), Some(stability)) =
        (business.months_in_business, business.location_stability_months)
    {
        if stability == tenure && tenure >= 6.0 {
            points += 2;
        }
    }
    points + sector_bonus(business.sector)
}

pub(crate) fn score_categories(
    input: &ApplicationInput,
    metrics: &DerivedMetrics,
    policy: &PolicyConfig,
) -> CategoryScores {
    let weights = policy.weights;
    CategoryScores {
        character: capped(character_points(input), weights.character),
        capacity: capped(capacity_points(metrics, policy), weights.capacity),
        capital: capped(capital_points(metrics, policy), weights.capital),
        collateral: capped(collateral_points(input, metrics, policy), weights.collateral),
        conditions: capped(conditions_points(input), weights.conditions),
    }
}
