use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::domain::Sector;

/// Immutable policy snapshot consumed by the scoring engine.
///
/// Defaults reproduce the lending workbook. An administrator replaces the
/// whole snapshot through [`PolicyStore`]; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub thresholds: PolicyThresholds,
    pub weights: CategoryWeights,
    pub sector_stress: BTreeMap<Sector, f64>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            thresholds: PolicyThresholds::default(),
            weights: CategoryWeights::default(),
            sector_stress: default_sector_stress(),
        }
    }
}

impl PolicyConfig {
    /// Stress multiplier for a sector; `None` for absent or unmapped sectors.
    pub fn stress_factor_for(&self, sector: Option<Sector>) -> Option<f64> {
        match sector {
            Some(Sector::Unlisted) | None => None,
            Some(sector) => self.sector_stress.get(&sector).copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyThresholds {
    /// Generic stress factor carried from the workbook; sector factors are used instead.
    pub stress_factor: f64,
    pub dscr_target: f64,
    pub cashflow_deficit_repay_share_max: f64,
    pub ltv_max_movable: f64,
    pub ltv_max_immovable: f64,
    pub equity_min_ratio: f64,
    pub data_variance_max: f64,
    pub business_age_min_months: f64,
    /// Declared by the workbook but not referenced by any rule.
    pub applicant_age_max: f64,
    pub branch_approval_limit: f64,
    pub business_loan_hard_max: f64,
}

impl Default for PolicyThresholds {
    fn default() -> Self {
        Self {
            stress_factor: 0.85,
            dscr_target: 1.3,
            cashflow_deficit_repay_share_max: 0.5,
            ltv_max_movable: 1.25,
            ltv_max_immovable: 1.1,
            equity_min_ratio: 0.1,
            data_variance_max: 0.2,
            business_age_min_months: 6.0,
            applicant_age_max: 99.0,
            branch_approval_limit: 50_000.0,
            business_loan_hard_max: 3_000_000.0,
        }
    }
}

/// Upper bound, in points, for each category score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub character: u32,
    pub capacity: u32,
    pub capital: u32,
    pub collateral: u32,
    pub conditions: u32,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            character: 30,
            capacity: 39,
            capital: 10,
            collateral: 10,
            conditions: 10,
        }
    }
}

pub fn default_sector_stress() -> BTreeMap<Sector, f64> {
    BTreeMap::from([
        (Sector::Trade, 0.85),
        (Sector::Service, 0.8),
        (Sector::Manufacturing, 0.7),
        (Sector::Agriculture, 0.6),
        (Sector::Other, 0.55),
    ])
}

/// Validate a policy before it replaces the live snapshot.
/// Returns all problems at once (not just the first).
pub fn validate_policy(policy: &PolicyConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let t = &policy.thresholds;

    let thresholds = [
        ("stress_factor", t.stress_factor),
        ("dscr_target", t.dscr_target),
        (
            "cashflow_deficit_repay_share_max",
            t.cashflow_deficit_repay_share_max,
        ),
        ("ltv_max_movable", t.ltv_max_movable),
        ("ltv_max_immovable", t.ltv_max_immovable),
        ("equity_min_ratio", t.equity_min_ratio),
        ("data_variance_max", t.data_variance_max),
        ("business_age_min_months", t.business_age_min_months),
        ("applicant_age_max", t.applicant_age_max),
        ("branch_approval_limit", t.branch_approval_limit),
        ("business_loan_hard_max", t.business_loan_hard_max),
    ];
    for (name, value) in thresholds {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!(
                "thresholds.{name}: must be a non-negative number, found {value}"
            ));
        }
    }

    let w = policy.weights;
    let weights = [
        ("character", w.character),
        ("capacity", w.capacity),
        ("capital", w.capital),
        ("collateral", w.collateral),
        ("conditions", w.conditions),
    ];
    for (name, value) in weights {
        if value == 0 {
            errors.push(format!("weights.{name}: must be positive"));
        }
    }

    for (sector, factor) in &policy.sector_stress {
        if *sector == Sector::Unlisted {
            let listed: Vec<&str> = Sector::LISTED.iter().map(|s| s.label()).collect();
            errors.push(format!(
                "sector_stress: unrecognized sector key, expected one of {}",
                listed.join(", ")
            ));
            continue;
        }
        if !factor.is_finite() || *factor <= 0.0 || *factor > 1.0 {
            errors.push(format!(
                "sector_stress.{}: must be within (0, 1], found {factor}",
                sector.label()
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Shared handle to the live policy snapshot.
///
/// Readers clone the inner `Arc`, so a replacement never touches a snapshot an
/// evaluation is still reading.
#[derive(Debug, Clone)]
pub struct PolicyStore {
    current: Arc<RwLock<Arc<PolicyConfig>>>,
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

impl PolicyStore {
    pub fn new(policy: PolicyConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(policy))),
        }
    }

    pub fn snapshot(&self) -> Arc<PolicyConfig> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, policy: PolicyConfig) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(policy);
    }

    pub fn reset(&self) {
        self.replace(PolicyConfig::default());
    }
}
