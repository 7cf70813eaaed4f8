use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde::Serialize;
use serde_json::Value;

use crate::underwriting::domain::{
    ApplicantDetails, ApplicationInput, BusinessProfile, CapitalPosition, CashFlowStatement,
    CharacterReference, CollateralPledge, CollateralType, LoanRequest, MaritalStatus,
    OperatingExpenses, Sector, Sex,
};

/// Baseline trading business used across the engine tests.
pub(super) fn baseline_application() -> ApplicationInput {
    ApplicationInput {
        applicant: ApplicantDetails {
            credit_officer_id: "CO-014".to_string(),
            credit_officer_name: "Ruth Mekonnen".to_string(),
            applicant_id: "APP-2291".to_string(),
            applicant_name: "Dawit Alemu".to_string(),
            branch: "Bole".to_string(),
            application_date: None,
            sex: Some(Sex::Male),
            age_years: Some(35.0),
            marital_status: Some(MaritalStatus::Married),
            literacy: "Secondary/High School".to_string(),
            repeat_borrower: Some(false),
            loan_series: Some(1),
            prior_default: Some(false),
        },
        loan: LoanRequest {
            requested_amount: 50_000.0,
            installment_override: Some(4_584.0),
            term_months: Some(12.0),
            annual_interest_rate: Some(18.0),
            purpose: "Working Capital".to_string(),
        },
        business: BusinessProfile {
            business_name: "Alemu General Store".to_string(),
            business_type: "Retail / Trading".to_string(),
            ownership: "Sole Proprietor".to_string(),
            sector: Some(Sector::Trade),
            months_in_business: Some(24.0),
            seasonal: Some(false),
            training_certification: Some(true),
            character_references: Some(CharacterReference::Good),
            site_visit_score: 3,
            location_stability_months: Some(24.0),
        },
        cash_flow: CashFlowStatement {
            stated_revenue: Some(30_000.0),
            verified_revenue: Some(28_000.0),
            cost_of_goods: Some(12_000.0),
            operating_expenses: OperatingExpenses {
                rent: Some(3_000.0),
                utilities: Some(800.0),
                wages: Some(2_500.0),
                transport: Some(700.0),
                other: Some(1_000.0),
            },
            other_income: Some(2_000.0),
            household_expenses: Some(5_000.0),
            owner_withdrawals: Some(1_500.0),
        },
        capital: CapitalPosition {
            total_capital: Some(20_000.0),
            additional_equity: Some(10_000.0),
        },
        collateral: CollateralPledge {
            collateral_type: Some(CollateralType::Movable),
            insured: Some(true),
            market_value: Some(150_000.0),
        },
    }
}

/// Baseline with an affordable installment; scores 85 with no flags raised.
pub(super) fn affordable_application() -> ApplicationInput {
    let mut input = baseline_application();
    input.loan.installment_override = Some(1_000.0);
    input
}

pub(super) fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("metric is known");
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn json_request<T: Serialize>(method: Method, uri: &str, body: &T) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("build request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
