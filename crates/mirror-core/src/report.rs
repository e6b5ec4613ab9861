//! Run reports
//!
//! A [`RunReport`] is the immutable result record of one job execution,
//! assembled from the live pass's classification and the run's wall-clock
//! boundaries. It serializes to the JSON artifact shape consumed by
//! operators and the batch summary.

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::ClassifiedOutput;

/// A wall-clock sample: human-readable date plus epoch seconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp {
    /// RFC 3339 local date-time
    pub date: String,
    /// Seconds since the Unix epoch
    pub epoch: i64,
}

impl RunStamp {
    /// Sample the current wall clock
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            date: now.to_rfc3339_opts(SecondsFormat::Secs, false),
            epoch: now.timestamp(),
        }
    }
}

/// Structured result of one job execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub job_name: String,
    /// The live command that was executed
    pub command: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: i64,
    pub end_time: i64,
    /// Wall-clock duration in seconds
    pub duration: i64,
    /// True iff the error sequence is non-empty
    pub has_error: bool,
    pub count_errors: usize,
    pub errors: Vec<String>,
    pub count_messages: usize,
    pub messages: Vec<String>,
    pub count_sends: usize,
    pub sends: Vec<String>,
    pub count_deletes: usize,
    pub deletes: Vec<String>,
    pub count_receives: usize,
    pub receives: Vec<String>,
}

impl RunReport {
    /// Assemble a report from the run boundaries and the live pass's
    /// classified output.
    ///
    /// Counts are plain sequence lengths; `duration` is `end - start` in
    /// seconds, non-negative by construction since `end` is sampled after
    /// `start`.
    pub fn aggregate(
        job_name: &str,
        command: &str,
        start: &RunStamp,
        end: &RunStamp,
        output: ClassifiedOutput,
    ) -> Self {
        Self {
            job_name: job_name.to_string(),
            command: command.to_string(),
            start_date: start.date.clone(),
            end_date: end.date.clone(),
            start_time: start.epoch,
            end_time: end.epoch,
            duration: end.epoch - start.epoch,
            has_error: output.has_error(),
            count_errors: output.errors.len(),
            count_messages: output.messages.len(),
            count_sends: output.sends.len(),
            count_deletes: output.deletes.len(),
            count_receives: output.receives.len(),
            errors: output.errors,
            messages: output.messages,
            sends: output.sends,
            deletes: output.deletes,
            receives: output.receives,
        }
    }

    /// Summary form of this report: the full object minus the `sends` and
    /// `receives` sequences (their counts remain).
    pub fn redacted(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.remove("sends");
            map.remove("receives");
        }
        Ok(value)
    }
}
