use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of a provisioning run or plan.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub steps: Vec<StepRecord>,
}

impl ProvisionReport {
    pub fn start(dry_run: bool) -> Self {
        Self { dry_run, started_at: Utc::now(), finished_at: None, steps: Vec::new() }
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn completed(&self) -> usize {
        self.steps.iter().filter(|s| matches!(s.status, StepStatus::Completed)).count()
    }

    pub fn skipped(&self) -> usize {
        self.steps.iter().filter(|s| matches!(s.status, StepStatus::Skipped { .. })).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub name: String,
    pub description: String,
    pub commands: Vec<String>,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum StepStatus {
    Planned,
    Completed,
    Skipped { reason: String },
}
