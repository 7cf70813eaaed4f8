use std::sync::Arc;

use credit_scorecard::underwriting::{
    evaluate, ApplicationForm, PolicyConfig, PolicyStore, Recommendation, RiskBand,
    ScorecardService, Wizard, WizardStep, NO_COLLATERAL_LTV,
};

fn walk_wizard(form: &ApplicationForm) -> Wizard {
    let mut wizard = Wizard::new();
    while wizard.current() != WizardStep::Review {
        wizard.advance(form).expect("every step is complete");
    }
    wizard
}

#[test]
fn sample_application_walks_wizard_and_is_rejected_on_cash_flow() {
    let form = ApplicationForm::sample();
    let wizard = walk_wizard(&form);
    assert_eq!(wizard.progress(), 1.0);

    let service = ScorecardService::default();
    let result = service.evaluate_form(&form).expect("sample form is valid");

    assert_eq!(result.total_score, 51);
    assert_eq!(result.risk_band, RiskBand::High);
    assert_eq!(result.risk_band.label(), "High Risk");
    assert!(result.flags.cash_flow_deficit);
    assert_eq!(
        result.triggered_flags,
        vec!["REJECT: Cash flow deficit (repayment >50% of surplus)"]
    );
    assert_eq!(result.recommendation.label(), "REJECT");
}

#[test]
fn no_collateral_pledge_is_rejected_with_notice() {
    let mut form = ApplicationForm::sample();
    form.collateral_type = "None".to_string();
    form.market_value = String::new();
    form.monthly_installment_override = "1000".to_string();
    walk_wizard(&form);

    let result = ScorecardService::default()
        .evaluate_form(&form)
        .expect("form is valid");

    assert_eq!(result.metrics.ltv, Some(NO_COLLATERAL_LTV));
    assert_eq!(result.category_scores.collateral, 0);
    assert!(result
        .triggered_flags
        .iter()
        .any(|message| message == "REJECT: No Collateral"));
    assert_eq!(result.recommendation, Recommendation::Reject);
}

#[test]
fn missing_verified_revenue_degrades_to_unknown_metrics() {
    let mut form = ApplicationForm::sample();
    form.verified_revenue = String::new();

    let result = ScorecardService::default()
        .evaluate_form(&form)
        .expect("blank revenue is allowed");

    assert_eq!(result.metrics.business_surplus_unstressed, None);
    assert_eq!(result.metrics.total_surplus_stressed, None);
    assert_eq!(result.metrics.stressed_dscr, None);
    assert!(!result.flags.cash_flow_deficit);
    assert_eq!(result.recommendation, Recommendation::Reject);
}

#[test]
fn evaluations_share_policy_snapshots_across_threads() {
    let store = PolicyStore::default();
    let service = Arc::new(ScorecardService::new(store.clone()));
    let input = ApplicationForm::sample().parse().expect("sample parses");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            let input = input.clone();
            std::thread::spawn(move || service.evaluate(&input))
        })
        .collect();
    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("evaluation thread"))
        .collect();

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(results[0], evaluate(&input, &PolicyConfig::default()));
    assert_eq!(*store.snapshot(), PolicyConfig::default());
}

#[test]
fn affordable_loan_is_approved_and_policy_changes_apply() {
    let mut form = ApplicationForm::sample();
    form.monthly_installment_override = "1,000".to_string();

    let service = ScorecardService::default();
    let result = service.evaluate_form(&form).expect("form is valid");
    assert_eq!(result.total_score, 85);
    assert_eq!(result.recommendation, Recommendation::Approve);

    let mut policy = PolicyConfig::default();
    policy.thresholds.branch_approval_limit = 40_000.0;
    service.replace_policy(policy).expect("policy is valid");

    let result = service.evaluate_form(&form).expect("form is valid");
    assert!(result.flags.branch_limit);
    assert_eq!(
        result.recommendation.label(),
        "REFER – HEAD OFFICE"
    );
}
