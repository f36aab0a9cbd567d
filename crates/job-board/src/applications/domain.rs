use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::jobs::domain::JobId;
use crate::store::strip_reserved;

const RESERVED_FIELDS: &[&str] = &["_id", "applicant", "applyJobId"];

/// Identifier wrapper for recorded applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Person applying. Only the email takes part in duplicate detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Application payload as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub applicant: Applicant,
    #[serde(rename = "applyJobId", default = "blank_job_id")]
    pub job_id: JobId,
    /// Everything else the applicant sent (resume link, price offer, ...).
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

fn blank_job_id() -> JobId {
    JobId(String::new())
}

impl ApplicationSubmission {
    /// Name of the first required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.applicant.email.trim().is_empty() {
            Some("applicant.email")
        } else if self.job_id.0.trim().is_empty() {
            Some("applyJobId")
        } else {
            None
        }
    }

    pub fn into_application(self, id: ApplicationId) -> Application {
        let ApplicationSubmission {
            applicant,
            job_id,
            mut details,
        } = self;
        strip_reserved(&mut details, RESERVED_FIELDS);

        Application {
            id,
            applicant,
            job_id,
            details,
        }
    }
}

/// Stored application document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: ApplicationId,
    pub applicant: Applicant,
    #[serde(rename = "applyJobId")]
    pub job_id: JobId,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
