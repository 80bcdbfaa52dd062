use serde::{Deserialize, Serialize};

use perfo_rs::io::ext_repr::{ExtLayout, ExtLayoutRequest};
use perfo_rs::io::export::{export_layout, export_request};

use crate::config::PerfoConfig;
use crate::job::JobOutcome;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Ok,
    /// Not a single shape fits, the sheet is left unperforated
    SheetTooSmall,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LayoutOutput {
    pub customer: String,
    pub pattern: String,
    pub status: JobStatus,
    pub request: ExtLayoutRequest,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub layout: Option<ExtLayout>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub failure: Option<String>,
    pub config: PerfoConfig,
}

impl LayoutOutput {
    pub fn new(outcome: &JobOutcome, config: PerfoConfig) -> Self {
        let (status, layout, failure) = match &outcome.layout {
            Ok(layout) => (
                JobStatus::Ok,
                Some(export_layout(layout, config.export_centers)),
                None,
            ),
            Err(err) => (JobStatus::SheetTooSmall, None, Some(err.to_string())),
        };
        Self {
            customer: outcome.job.customer.clone(),
            pattern: outcome.job.pattern_name().to_string(),
            status,
            request: export_request(&outcome.request),
            layout,
            failure,
            config,
        }
    }
}
