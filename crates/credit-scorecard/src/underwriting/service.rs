use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::domain::ApplicationInput;
use super::evaluation::{ScorecardEngine, ScorecardResult};
use super::intake::{ApplicationForm, InputErrors};
use super::policy::{validate_policy, PolicyConfig, PolicyStore};
use super::wizard::{missing_fields, WizardStep};

/// Service composing the policy store with the scoring engine.
#[derive(Debug, Clone, Default)]
pub struct ScorecardService {
    policies: PolicyStore,
}

/// Completion status of one wizard step for a given form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatus {
    pub step: u8,
    pub title: String,
    pub missing: Vec<String>,
    pub complete: bool,
}

impl ScorecardService {
    pub fn new(policies: PolicyStore) -> Self {
        Self { policies }
    }

    /// Score a typed application against the current policy snapshot.
    pub fn evaluate(&self, input: &ApplicationInput) -> ScorecardResult {
        let engine = ScorecardEngine::new(self.policies.snapshot());
        let result = engine.score(input);
        info!(
            applicant_id = %input.applicant.applicant_id,
            total_score = result.total_score,
            risk_band = result.risk_band.label(),
            recommendation = result.recommendation.label(),
            triggered = result.triggered_flags.len(),
            "scorecard evaluated"
        );
        result
    }

    /// Parse a raw form and score it.
    pub fn evaluate_form(
        &self,
        form: &ApplicationForm,
    ) -> Result<ScorecardResult, ScorecardServiceError> {
        let input = form.parse().map_err(|errors| {
            warn!(
                invalid_fields = errors.errors.len(),
                "application form rejected"
            );
            ScorecardServiceError::InvalidInput(errors)
        })?;
        Ok(self.evaluate(&input))
    }

    pub fn policy(&self) -> Arc<PolicyConfig> {
        self.policies.snapshot()
    }

    /// Validate and install a new policy. Evaluations already holding the
    /// previous snapshot are unaffected.
    pub fn replace_policy(&self, policy: PolicyConfig) -> Result<(), ScorecardServiceError> {
        if let Err(errors) = validate_policy(&policy) {
            warn!(errors = ?errors, "policy update rejected");
            return Err(ScorecardServiceError::InvalidPolicy(errors));
        }
        self.policies.replace(policy);
        info!("policy updated");
        Ok(())
    }

    pub fn reset_policy(&self) -> Arc<PolicyConfig> {
        self.policies.reset();
        info!("policy reset to defaults");
        self.policies.snapshot()
    }

    pub fn step_status(&self, form: &ApplicationForm, step: WizardStep) -> StepStatus {
        let missing: Vec<String> = missing_fields(form, step)
            .into_iter()
            .map(str::to_string)
            .collect();
        StepStatus {
            step: step.number(),
            title: step.title().to_string(),
            complete: missing.is_empty(),
            missing,
        }
    }
}

/// Error raised by the scorecard service.
#[derive(Debug, thiserror::Error)]
pub enum ScorecardServiceError {
    #[error(transparent)]
    InvalidInput(#[from] InputErrors),
    #[error("invalid policy: {}", .0.join("; "))]
    InvalidPolicy(Vec<String>),
}
