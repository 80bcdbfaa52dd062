use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use perfo_rs::LayoutError;
use perfo_rs::entities::{LayoutRequest, LayoutResult};
use perfo_rs::io::ext_repr::ExtLayoutRequest;
use perfo_rs::io::import::{import_pattern, import_request};
use perfo_rs::solver::LayoutEngine;

use crate::presets::{DEFAULT_PRESET, PresetRegistry};

const DEFAULT_CUSTOMER: &str = "unknown";
const DEFAULT_LENGTH: f64 = 500.0;
const DEFAULT_WIDTH: f64 = 300.0;

/// A single sheet to perforate.
///
/// Either names a preset together with the sheet `length` (along X) and `width` (along Y),
/// or carries a complete inline `request`, in which case the other fields are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Job {
    #[serde(default = "default_customer")]
    pub customer: String,
    /// Name of the preset, [`DEFAULT_PRESET`] if not specified
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub request: Option<ExtLayoutRequest>,
}

fn default_customer() -> String {
    DEFAULT_CUSTOMER.to_string()
}

/// Contents of a job file: one job or a batch of them
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum JobFile {
    Batch(Vec<Job>),
    Single(Job),
}

impl JobFile {
    pub fn into_jobs(self) -> Vec<Job> {
        match self {
            JobFile::Batch(jobs) => jobs,
            JobFile::Single(job) => vec![job],
        }
    }
}

impl Job {
    pub fn from_preset(customer: &str, pattern: &str, length: f64, width: f64) -> Self {
        Self {
            customer: customer.to_string(),
            pattern: Some(pattern.to_string()),
            length: Some(length),
            width: Some(width),
            request: None,
        }
    }

    pub fn pattern_name(&self) -> &str {
        match &self.request {
            Some(_) => "inline",
            None => self.pattern.as_deref().unwrap_or(DEFAULT_PRESET),
        }
    }

    /// Turns the job into a request for the engine. Unknown presets are an error.
    pub fn resolve(&self, presets: &PresetRegistry) -> Result<LayoutRequest> {
        if let Some(ext_request) = &self.request {
            return import_request(ext_request)
                .with_context(|| format!("invalid inline request for {:?}", self.customer));
        }
        let name = self.pattern_name();
        let pattern = import_pattern(presets.get(name)?)
            .with_context(|| format!("invalid preset {name:?}"))?;
        Ok(pattern.on_sheet(
            self.length.unwrap_or(DEFAULT_LENGTH),
            self.width.unwrap_or(DEFAULT_WIDTH),
        ))
    }

    /// Name for the files written for this job, the customer name restricted to file-safe characters
    pub fn file_stem(&self, index: Option<usize>) -> String {
        let customer: String = self
            .customer
            .chars()
            .map(|c| match c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                true => c,
                false => '_',
            })
            .collect();
        match index {
            Some(i) => format!("{i:03}_{customer}"),
            None => customer,
        }
    }
}

/// Result of running a [`Job`]: a layout, or a sheet too small to hold a single shape.
#[derive(Clone, Debug)]
pub struct JobOutcome {
    pub job: Job,
    pub request: LayoutRequest,
    pub layout: Result<LayoutResult, LayoutError>,
}

/// Resolves and solves a job.
/// A sheet too small for the pattern is kept as outcome, every other error aborts the job.
pub fn run_job(job: Job, presets: &PresetRegistry, engine: &LayoutEngine) -> Result<JobOutcome> {
    let request = job.resolve(presets)?;
    let layout = match engine.compute(&request) {
        Ok(layout) => {
            info!(
                "[JOB] {}: {} shapes of {:?}",
                job.customer,
                layout.n_shapes(),
                job.pattern_name()
            );
            Ok(layout)
        }
        Err(err @ LayoutError::SheetTooSmall { .. }) => {
            warn!("[JOB] {}: {err}, no perforation", job.customer);
            Err(err)
        }
        Err(err) => {
            return Err(err).with_context(|| format!("could not lay out {:?}", job.customer));
        }
    };
    Ok(JobOutcome {
        job,
        request,
        layout,
    })
}
