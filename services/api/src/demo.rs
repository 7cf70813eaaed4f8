use crate::infra::{format_figure, load_form};
use clap::Args;
use credit_scorecard::config::load_policy_file;
use credit_scorecard::error::AppError;
use credit_scorecard::underwriting::{
    evaluate, validate_policy, ApplicationForm, PolicyConfig, ScorecardResult,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the full result as JSON instead of the readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding the application form fields
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Optional JSON policy file (defaults to the built-in policy)
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Print the full result as JSON instead of the readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        input,
        policy,
        json,
    } = args;

    let policy = match policy {
        Some(path) => load_policy_file(&path)?,
        None => PolicyConfig::default(),
    };
    validate_policy(&policy).map_err(AppError::Policy)?;

    let form = load_form(&input)?;
    let application = form.parse()?;
    let result = evaluate(&application, &policy);
    print_result(&result, json)
}

pub(crate) fn run_policy_defaults() -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(&PolicyConfig::default())?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let form = ApplicationForm::sample();
    let application = form.parse()?;
    let result = evaluate(&application, &PolicyConfig::default());

    if !args.json {
        println!("Credit scorecard demo");
        println!(
            "Applicant: {} ({}), requesting {} for {}",
            form.applicant_name, form.business_name, form.requested_loan_amount, form.loan_purpose
        );
    }
    print_result(&result, args.json)
}

fn print_result(result: &ScorecardResult, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        for line in summary_lines(result) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn summary_lines(result: &ScorecardResult) -> Vec<String> {
    let metrics = &result.metrics;
    let scores = &result.category_scores;
    let mut lines = vec![
        "\nKey metrics".to_string(),
        format!(
            "  Monthly installment: {}",
            format_figure(metrics.monthly_installment)
        ),
        format!(
            "  Business surplus (unstressed / stressed): {} / {}",
            format_figure(metrics.business_surplus_unstressed),
            format_figure(metrics.business_surplus_stressed)
        ),
        format!(
            "  Total surplus (unstressed / stressed): {} / {}",
            format_figure(metrics.total_surplus_unstressed),
            format_figure(metrics.total_surplus_stressed)
        ),
        format!(
            "  DSCR (unstressed / stressed): {} / {}",
            format_figure(metrics.dscr),
            format_figure(metrics.stressed_dscr)
        ),
        format!(
            "  Equity ratio: {}",
            format_figure(metrics.equity_ratio)
        ),
        format!("  LTV: {}", format_figure(metrics.ltv)),
        "\nCategory scores".to_string(),
        format!("  Character: {}", scores.character),
        format!("  Capacity: {}", scores.capacity),
        format!("  Capital: {}", scores.capital),
        format!("  Collateral: {}", scores.collateral),
        format!("  Conditions: {}", scores.conditions),
        format!(
            "\nTotal score: {} ({})",
            result.total_score,
            result.risk_band.label()
        ),
    ];

    if result.triggered_flags.is_empty() {
        lines.push("Policy flags: none".to_string());
    } else {
        lines.push("Policy flags:".to_string());
        lines.extend(
            result
                .triggered_flags
                .iter()
                .map(|message| format!("  - {message}")),
        );
    }
    lines.push(format!(
        "Recommendation: {}",
        result.recommendation.label()
    ));
    lines
}
