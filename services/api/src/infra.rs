use credit_scorecard::error::AppError;
use credit_scorecard::underwriting::ApplicationForm;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read an application form saved as JSON.
pub(crate) fn load_form(path: &Path) -> Result<ApplicationForm, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let form = serde_json::from_str(&raw)?;
    Ok(form)
}

/// Render an optional figure with two decimals, or a dash when unknown.
pub(crate) fn format_figure(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_figures_render_as_dash() {
        assert_eq!(format_figure(None), "-");
        assert_eq!(format_figure(Some(0.50174)), "0.50");
    }

    #[test]
    fn missing_form_file_is_an_io_error() {
        let path = std::env::temp_dir().join("credit-scorecard-missing-form.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(load_form(&path), Err(AppError::Io(_))));
    }

    #[test]
    fn partial_form_file_uses_blank_defaults() {
        let path = std::env::temp_dir().join(format!(
            "credit-scorecard-partial-form-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"applicant_name":"Hana","site_visit_assessment":4}"#)
            .expect("write form");

        let form = load_form(&path).expect("form loads");
        let _ = std::fs::remove_file(&path);

        assert_eq!(form.applicant_name, "Hana");
        assert_eq!(form.site_visit_assessment, 4);
        assert!(form.rent.is_empty());
    }
}
