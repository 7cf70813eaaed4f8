use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicationInput, CollateralType};
use super::super::policy::PolicyConfig;
use super::metrics::DerivedMetrics;
use super::rules::ltv_ceiling;

/// Outcome of every policy check, one named field per check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFlags {
    pub business_age: bool,
    pub cash_flow_deficit: bool,
    pub income_variance: bool,
    pub equity_shortfall: bool,
    pub no_training: bool,
    pub ltv_exceeded: bool,
    pub collateral_uninsured: bool,
    pub branch_limit: bool,
    pub loan_hard_max: bool,
    pub prior_default: bool,
}

/// Named notice raised by a policy check. Declaration order is the order in
/// which notices are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyFlag {
    BusinessAge,
    CashFlowDeficit,
    IncomeVariance,
    PriorDefault,
    LoanHardMax,
    EquityShortfall,
    NoTraining,
    LtvExceeded,
    CollateralUninsured,
    BranchLimit,
    NoCollateral,
}

impl PolicyFlag {
    pub const fn message(self) -> &'static str {
        match self {
            PolicyFlag::BusinessAge => "REJECT: Business less than 6 months",
            PolicyFlag::CashFlowDeficit => "REJECT: Cash flow deficit (repayment >50% of surplus)",
            PolicyFlag::IncomeVariance => "REJECT: Data inconsistency (>20% variance)",
            PolicyFlag::PriorDefault => "REJECT: Prior default with HMFI",
            PolicyFlag::LoanHardMax => "REJECT: Above hard max loan amount",
            PolicyFlag::EquityShortfall => "REFER: Equity <10% of loan",
            PolicyFlag::NoTraining => "REFER: No training/certification",
            PolicyFlag::LtvExceeded => "REFER: Collateral shortfall (LTV too high)",
            PolicyFlag::CollateralUninsured => "REFER: Collateral not insured",
            PolicyFlag::BranchLimit => "REFER: Above branch approval limit",
            PolicyFlag::NoCollateral => "REJECT: No Collateral",
        }
    }
}

impl PolicyFlags {
    fn is_set(&self, flag: PolicyFlag) -> bool {
        match flag {
            PolicyFlag::BusinessAge => self.business_age,
            PolicyFlag::CashFlowDeficit => self.cash_flow_deficit,
            PolicyFlag::IncomeVariance => self.income_variance,
            PolicyFlag::PriorDefault => self.prior_default,
            PolicyFlag::LoanHardMax => self.loan_hard_max,
            PolicyFlag::EquityShortfall => self.equity_shortfall,
            PolicyFlag::NoTraining => self.no_training,
            PolicyFlag::LtvExceeded => self.ltv_exceeded,
            PolicyFlag::CollateralUninsured => self.collateral_uninsured,
            PolicyFlag::BranchLimit => self.branch_limit,
            PolicyFlag::NoCollateral => false,
        }
    }

    /// Raised notices in reporting order. The no-collateral notice is appended
    /// whenever the pledge is explicitly "None", independent of the other checks.
    pub fn triggered(&self, collateral_type: Option<CollateralType>) -> Vec<PolicyFlag> {
        let mut raised: Vec<PolicyFlag> = [
            PolicyFlag::BusinessAge,
            PolicyFlag::CashFlowDeficit,
            PolicyFlag::IncomeVariance,
            PolicyFlag::PriorDefault,
            PolicyFlag::LoanHardMax,
            PolicyFlag::EquityShortfall,
            PolicyFlag::NoTraining,
            PolicyFlag::LtvExceeded,
            PolicyFlag::CollateralUninsured,
            PolicyFlag::BranchLimit,
        ]
        .into_iter()
        .filter(|flag| self.is_set(*flag))
        .collect();

        if collateral_type == Some(CollateralType::Unsecured) {
            raised.push(PolicyFlag::NoCollateral);
        }
        raised
    }
}

pub(crate) fn evaluate_flags(
    input: &ApplicationInput,
    metrics: &DerivedMetrics,
    policy: &PolicyConfig,
) -> PolicyFlags {
    let t = &policy.thresholds;
    let collateral = &input.collateral;
    let requested_amount = input.loan.requested_amount;

    let business_age = input
        .business
        .months_in_business
        .map_or(true, |months| months < t.business_age_min_months);

    let cash_flow_deficit = match (metrics.total_surplus_unstressed, metrics.monthly_installment) {
        (Some(surplus), Some(_)) => {
            surplus <= 0.0
                || metrics
                    .repayment_share
                    .is_some_and(|share| share > t.cashflow_deficit_repay_share_max)
        }
        _ => false,
    };

    let ltv_exceeded = match (metrics.ltv, ltv_ceiling(collateral.collateral_type, policy)) {
        (Some(ltv), Some(max)) => ltv > max,
        _ => false,
    };

    let collateral_uninsured = match (collateral.collateral_type, collateral.insured) {
        (Some(kind), Some(insured)) => !insured || kind == CollateralType::Unsecured,
        _ => false,
    };

    PolicyFlags {
        business_age,
        cash_flow_deficit,
        income_variance: metrics
            .income_variance
            .is_some_and(|variance| variance > t.data_variance_max),
        equity_shortfall: metrics
            .equity_ratio
            .is_some_and(|ratio| ratio < t.equity_min_ratio),
        no_training: input.business.training_certification == Some(false),
        ltv_exceeded,
        collateral_uninsured,
        branch_limit: requested_amount > t.branch_approval_limit,
        loan_hard_max: requested_amount > t.business_loan_hard_max,
        prior_default: input.applicant.prior_default == Some(true),
    }
}
