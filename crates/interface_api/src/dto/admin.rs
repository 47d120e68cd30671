//! Administrative DTOs

use serde::Serialize;

use domain_motor::expiration::ExpirationSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationCheckResponse {
    pub checked: usize,
    pub reported: usize,
}

impl From<ExpirationSummary> for ExpirationCheckResponse {
    fn from(summary: ExpirationSummary) -> Self {
        ExpirationCheckResponse {
            checked: summary.checked,
            reported: summary.reported,
        }
    }
}
