use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicationInput, CollateralType};
use super::super::policy::PolicyConfig;

/// Loan-to-value reported when the applicant pledges no collateral at all.
pub const NO_COLLATERAL_LTV: f64 = 99.0;

/// Financial ratios derived from an application. Every field is `None` when
/// one of its inputs is unknown or its denominator is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub stress_factor: Option<f64>,
    pub monthly_installment: Option<f64>,
    pub total_operating_expenses: Option<f64>,
    pub business_surplus_unstressed: Option<f64>,
    pub business_surplus_stressed: Option<f64>,
    pub total_surplus_unstressed: Option<f64>,
    pub total_surplus_stressed: Option<f64>,
    pub dscr: Option<f64>,
    pub stressed_dscr: Option<f64>,
    pub repayment_share: Option<f64>,
    pub income_variance: Option<f64>,
    pub equity_ratio: Option<f64>,
    pub liquidity_coverage: Option<f64>,
    pub haircut: f64,
    pub ltv: Option<f64>,
    pub collateral_coverage: Option<f64>,
}

/// Standard amortizing payment. `None` when the term is zero.
pub fn amortized_installment(principal: f64, monthly_rate: f64, term_months: f64) -> Option<f64> {
    if term_months == 0.0 {
        return None;
    }
    if monthly_rate == 0.0 {
        return Some(principal / term_months);
    }
    Some(principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-term_months)))
}

pub(crate) fn safe_divide(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

fn monthly_installment(input: &ApplicationInput) -> Option<f64> {
    let loan = &input.loan;
    if let Some(installment) = loan.installment_override {
        return Some(installment);
    }
    let term = loan.term_months?;
    let annual_rate = loan.annual_interest_rate?;
    amortized_installment(loan.requested_amount, annual_rate / 100.0 / 12.0, term)
}

fn household_adjusted(input: &ApplicationInput, business_surplus: Option<f64>) -> Option<f64> {
    let cash_flow = &input.cash_flow;
    Some(
        business_surplus? + cash_flow.other_income?
            - cash_flow.household_expenses?
            - cash_flow.owner_withdrawals?,
    )
}

fn business_surplus(input: &ApplicationInput, operating_expenses: Option<f64>) -> Option<f64> {
    let cash_flow = &input.cash_flow;
    Some(cash_flow.verified_revenue? - cash_flow.cost_of_goods? - operating_expenses?)
}

fn equity_ratio(input: &ApplicationInput) -> Option<f64> {
    let requested_amount = input.loan.requested_amount;
    if requested_amount == 0.0 {
        return None;
    }
    let capital = &input.capital;
    Some((capital.total_capital? + capital.additional_equity?) / requested_amount)
}

fn liquidity_coverage(
    input: &ApplicationInput,
    operating_expenses: Option<f64>,
    installment: Option<f64>,
) -> Option<f64> {
    let cash_flow = &input.cash_flow;
    let outflows =
        cash_flow.cost_of_goods? + operating_expenses? + installment? + cash_flow.owner_withdrawals?;
    safe_divide(input.capital.additional_equity, Some(outflows))
}

pub(crate) fn derive_metrics(input: &ApplicationInput, policy: &PolicyConfig) -> DerivedMetrics {
    let cash_flow = &input.cash_flow;
    let stress_factor = policy.stress_factor_for(input.business.sector);
    let monthly_installment = monthly_installment(input);
    let total_operating_expenses = cash_flow.operating_expenses.total();

    let business_surplus_unstressed = business_surplus(input, total_operating_expenses);
    let business_surplus_stressed = business_surplus_unstressed
        .zip(stress_factor)
        .map(|(surplus, factor)| surplus * factor);

    let total_surplus_unstressed = household_adjusted(input, business_surplus_unstressed);
    let total_surplus_stressed = household_adjusted(input, business_surplus_stressed);

    let dscr = safe_divide(business_surplus_unstressed, monthly_installment);
    let stressed_dscr = safe_divide(total_surplus_stressed, monthly_installment);

    let repayment_share = match (monthly_installment, total_surplus_unstressed) {
        (Some(_), Some(surplus)) if surplus <= 0.0 => Some(1.0),
        (Some(installment), Some(surplus)) => Some(installment / surplus),
        _ => None,
    };

    let income_variance = match (cash_flow.stated_revenue, cash_flow.verified_revenue) {
        (Some(stated), Some(verified)) if verified != 0.0 => {
            Some((stated - verified).abs() / verified)
        }
        _ => None,
    };

    let equity_ratio = equity_ratio(input);
    let liquidity_coverage =
        liquidity_coverage(input, total_operating_expenses, monthly_installment);

    let collateral = &input.collateral;
    let haircut = collateral
        .collateral_type
        .map(CollateralType::haircut)
        .unwrap_or(0.0);
    let ltv = match (collateral.collateral_type, collateral.market_value) {
        (Some(CollateralType::Unsecured), _) => Some(NO_COLLATERAL_LTV),
        (Some(_), Some(market_value)) => {
            safe_divide(
                Some(input.loan.requested_amount),
                Some(market_value * (1.0 - haircut)),
            )
        }
        _ => None,
    };
    let collateral_coverage = safe_divide(Some(1.0), ltv);

    DerivedMetrics {
        stress_factor,
        monthly_installment,
        total_operating_expenses,
        business_surplus_unstressed,
        business_surplus_stressed,
        total_surplus_unstressed,
        total_surplus_stressed,
        dscr,
        stressed_dscr,
        repayment_share,
        income_variance,
        equity_ratio,
        liquidity_coverage,
        haircut,
        ltv,
        collateral_coverage,
    }
}
