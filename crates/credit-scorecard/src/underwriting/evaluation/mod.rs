mod decision;
mod flags;
mod metrics;
mod rules;

pub use decision::{Recommendation, RiskBand};
pub use flags::{PolicyFlag, PolicyFlags};
pub use metrics::{amortized_installment, DerivedMetrics, NO_COLLATERAL_LTV};
pub use rules::CategoryScores;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::ApplicationInput;
use super::policy::PolicyConfig;

/// Stateless evaluator bound to one policy snapshot.
#[derive(Debug, Clone)]
pub struct ScorecardEngine {
    policy: Arc<PolicyConfig>,
}

impl ScorecardEngine {
    pub fn new(policy: Arc<PolicyConfig>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn score(&self, input: &ApplicationInput) -> ScorecardResult {
        evaluate(input, &self.policy)
    }
}

/// Score an application against a policy snapshot.
///
/// Pure and infallible: unknown inputs surface as `None` metrics and the
/// result is identical for identical arguments.
pub fn evaluate(input: &ApplicationInput, policy: &PolicyConfig) -> ScorecardResult {
    let metrics = metrics::derive_metrics(input, policy);
    debug!(?metrics, "derived application metrics");

    let category_scores = rules::score_categories(input, &metrics, policy);
    let total_score = category_scores.total();
    let flags = flags::evaluate_flags(input, &metrics, policy);

    let collateral_type = input.collateral.collateral_type;
    let triggered_flags = flags
        .triggered(collateral_type)
        .into_iter()
        .map(|flag| flag.message().to_string())
        .collect();

    ScorecardResult {
        metrics,
        category_scores,
        total_score,
        risk_band: RiskBand::for_score(total_score),
        flags,
        triggered_flags,
        recommendation: decision::decide(total_score, &flags, collateral_type),
    }
}

/// Evaluation output returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardResult {
    pub metrics: DerivedMetrics,
    pub category_scores: CategoryScores,
    pub total_score: u32,
    pub risk_band: RiskBand,
    pub flags: PolicyFlags,
    pub triggered_flags: Vec<String>,
    pub recommendation: Recommendation,
}
