//! Configuration patches applied after the service config is generated.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::config_document::{ConfigDocument, UpsertOutcome};

/// One `key = value` setting targeted at one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigPatch {
    pub section: String,
    pub key: String,
    pub value: String,
}

impl ConfigPatch {
    pub fn new(section: &str, key: &str, value: &str) -> Self {
        Self { section: section.to_string(), key: key.to_string(), value: value.to_string() }
    }

    /// The line this patch writes into the file.
    pub fn line(&self) -> String {
        format!("{} = {}", self.key, self.value)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.section.trim().is_empty() {
            return Err(AppError::invalid_config("patch section must not be empty"));
        }
        if self.section.contains(['[', ']']) {
            return Err(AppError::invalid_config(format!(
                "patch section '{}' must be given without brackets",
                self.section
            )));
        }
        if self.key.trim().is_empty() || self.key.contains('=') {
            return Err(AppError::invalid_config(format!(
                "patch key '{}' for section '{}' must be non-empty and contain no '='",
                self.key, self.section
            )));
        }
        Ok(())
    }

    /// Apply this patch to a parsed document according to `policy`.
    pub fn apply(
        &self,
        doc: &mut ConfigDocument,
        policy: MissingSectionPolicy,
    ) -> Result<PatchOutcome, AppError> {
        if let Some(outcome) = doc.upsert(&self.section, &self.key, &self.value) {
            return Ok(outcome.into());
        }

        match policy {
            MissingSectionPolicy::Error => {
                Err(AppError::SectionNotFound { section: self.section.clone() })
            }
            MissingSectionPolicy::Skip => Ok(PatchOutcome::SectionMissing),
            MissingSectionPolicy::Append => {
                doc.append_section(&self.section);
                doc.upsert(&self.section, &self.key, &self.value);
                Ok(PatchOutcome::SectionAppended)
            }
        }
    }
}

/// What to do when a patch targets a section the file lacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingSectionPolicy {
    /// Abort with [`AppError::SectionNotFound`].
    #[default]
    Error,
    /// Leave the file untouched and carry on.
    Skip,
    /// Create the section at the end of the file.
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchOutcome {
    Inserted,
    Updated,
    Unchanged,
    SectionMissing,
    SectionAppended,
}

impl PatchOutcome {
    pub fn changed_file(self) -> bool {
        matches!(self, Self::Inserted | Self::Updated | Self::SectionAppended)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::Updated => "updated",
            Self::Unchanged => "already set",
            Self::SectionMissing => "section missing, skipped",
            Self::SectionAppended => "section appended",
        }
    }
}

impl From<UpsertOutcome> for PatchOutcome {
    fn from(value: UpsertOutcome) -> Self {
        match value {
            UpsertOutcome::Inserted => Self::Inserted,
            UpsertOutcome::Updated => Self::Updated,
            UpsertOutcome::Unchanged => Self::Unchanged,
        }
    }
}

/// Patches written into a freshly generated Mistral configuration.
pub fn default_patches() -> Vec<ConfigPatch> {
    vec![
        ConfigPatch::new("database", "connection", "sqlite:////home/mistral/mistral.sqlite"),
        ConfigPatch::new("oslo_messaging_rabbit", "rabbit_host", "rabbitmq"),
        ConfigPatch::new("pecan", "auth_enable", "false"),
    ]
}
