use employee_pairs::workflows::collaboration::DateFormat;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date_format(raw: &str) -> Result<DateFormat, String> {
    raw.parse::<DateFormat>().map_err(|err| {
        let supported: Vec<&str> = DateFormat::supported()
            .into_iter()
            .map(DateFormat::tag)
            .collect();
        format!("{err}; expected one of {}", supported.join(", "))
    })
}
