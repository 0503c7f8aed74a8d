//! Shared query parameter types for API handlers.

use clientdesk_core::error::CoreError;
use clientdesk_core::filter::ClientFilter;
use serde::Deserialize;

/// Dashboard filter selections, each a comma-separated list of labels or
/// tokens. An absent parameter selects everything.
///
/// `?client_type=new&service_status=in_progress,completed&invoice=done`
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub client_type: Option<String>,
    pub service_status: Option<String>,
    pub invoice: Option<String>,
}

impl FilterParams {
    pub fn to_filter(&self) -> Result<ClientFilter, CoreError> {
        ClientFilter::parse(
            self.client_type.as_deref(),
            self.service_status.as_deref(),
            self.invoice.as_deref(),
        )
    }
}
