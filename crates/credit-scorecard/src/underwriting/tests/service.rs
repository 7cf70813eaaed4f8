use super::common::*;
use crate::underwriting::evaluation::Recommendation;
use crate::underwriting::intake::ApplicationForm;
use crate::underwriting::policy::{PolicyConfig, PolicyStore};
use crate::underwriting::service::{ScorecardService, ScorecardServiceError};
use crate::underwriting::wizard::WizardStep;

#[test]
fn evaluate_form_scores_sample_application() {
    let service = ScorecardService::default();

    let result = service
        .evaluate_form(&ApplicationForm::sample())
        .expect("sample form is valid");

    assert_eq!(result.total_score, 51);
    assert_eq!(result.recommendation, Recommendation::Reject);
}

#[test]
fn unrecognized_answers_score_as_no_match() {
    let service = ScorecardService::default();
    let mut form = ApplicationForm::sample();
    form.sex = "X".to_string();
    form.character_references = "Excellent".to_string();
    form.training_certification = "Unknown".to_string();

    let result = service
        .evaluate_form(&form)
        .expect("unrecognized answers are accepted");

    // Baseline 21 less the reference (5) and training (5) points.
    assert_eq!(result.category_scores.character, 11);
    assert!(!result.flags.no_training);
}

#[test]
fn evaluate_form_propagates_input_errors() {
    let service = ScorecardService::default();
    let mut form = ApplicationForm::sample();
    form.wages = "n/a".to_string();

    match service.evaluate_form(&form) {
        Err(ScorecardServiceError::InvalidInput(errors)) => {
            assert_eq!(errors.errors.len(), 1);
            assert_eq!(errors.errors[0].field, "wages");
        }
        other => panic!("expected input errors, got {other:?}"),
    }
}

#[test]
fn replace_policy_rejects_invalid_snapshot() {
    let service = ScorecardService::default();
    let mut policy = PolicyConfig::default();
    policy.weights.capital = 0;

    match service.replace_policy(policy) {
        Err(ScorecardServiceError::InvalidPolicy(errors)) => {
            assert_eq!(errors, vec!["weights.capital: must be positive".to_string()]);
        }
        other => panic!("expected invalid policy, got {other:?}"),
    }
    assert_eq!(*service.policy(), PolicyConfig::default());
}

#[test]
fn replaced_policy_applies_to_later_evaluations() {
    let store = PolicyStore::default();
    let service = ScorecardService::new(store.clone());
    let held = service.policy();

    let mut policy = PolicyConfig::default();
    policy.weights.capacity = 20;
    service.replace_policy(policy).expect("policy is valid");

    let result = service.evaluate(&affordable_application());
    assert_eq!(result.category_scores.capacity, 20);
    assert_eq!(held.weights.capacity, 39);
    assert_eq!(store.snapshot().weights.capacity, 20);

    let reset = service.reset_policy();
    assert_eq!(*reset, PolicyConfig::default());
}

#[test]
fn step_status_reports_missing_labels() {
    let service = ScorecardService::default();
    let mut form = ApplicationForm::sample();
    form.total_capital = String::new();

    let status = service.step_status(&form, WizardStep::Capital);
    assert_eq!(status.step, 4);
    assert_eq!(status.title, "Equity / Capital");
    assert_eq!(status.missing, vec!["Total Capital".to_string()]);
    assert!(!status.complete);
}
