use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::store::strip_reserved;

/// Document keys the job collection manages itself.
const RESERVED_FIELDS: &[&str] = &[
    "_id",
    "job_title",
    "job_category",
    "application_deadline",
    "job_applicants_number",
    "buyer",
];

/// Store-assigned identifier for a posted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner of a posting. Only the email is interpreted; the rest is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poster {
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A posted position as stored in the `jobs` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: JobId,
    #[serde(rename = "job_title")]
    pub title: String,
    #[serde(rename = "job_category")]
    pub category: String,
    pub application_deadline: DateTime<Utc>,
    #[serde(rename = "job_applicants_number", default)]
    pub applicant_count: u64,
    #[serde(rename = "buyer")]
    pub poster: Poster,
    /// Free-form posting fields (description, price range, ...).
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Job payload accepted from clients before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    #[serde(rename = "job_title", default)]
    pub title: String,
    #[serde(rename = "job_category", default)]
    pub category: String,
    pub application_deadline: DateTime<Utc>,
    #[serde(rename = "buyer")]
    pub poster: Poster,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl NewJob {
    /// Name of the first required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("job_title")
        } else if self.category.trim().is_empty() {
            Some("job_category")
        } else if self.poster.email.trim().is_empty() {
            Some("buyer.email")
        } else {
            None
        }
    }

    /// Materialize the stored document. The applicant counter always starts at zero.
    pub fn into_job(self, id: JobId) -> Job {
        let NewJob {
            title,
            category,
            application_deadline,
            poster,
            mut details,
        } = self;
        strip_reserved(&mut details, RESERVED_FIELDS);

        Job {
            id,
            title,
            category,
            application_deadline,
            applicant_count: 0,
            poster,
            details,
        }
    }
}
