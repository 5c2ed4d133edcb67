use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::validator::FormRecord;
use super::FormType;
use crate::config::SiteConfig;

/// Outbound webhook message wrapping a validated submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEnvelope {
    pub form_type: FormType,
    pub timestamp: String,
    pub source: String,
    pub data: BTreeMap<String, String>,
}

/// Time source for envelope timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Split a full name on whitespace: first token, then the rest joined by one space.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let mut tokens = full_name.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_string();
    let last = tokens.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Maps validated records into envelopes. Timestamps it issues are strictly
/// increasing at millisecond precision.
#[derive(Debug)]
pub struct PayloadBuilder<C = SystemClock> {
    source_tag: String,
    channel_tag: String,
    clock: C,
    last_issued_millis: AtomicI64,
}

impl PayloadBuilder<SystemClock> {
    pub fn new(site: &SiteConfig) -> Self {
        Self::with_clock(site, SystemClock)
    }
}

impl<C: Clock> PayloadBuilder<C> {
    pub fn with_clock(site: &SiteConfig, clock: C) -> Self {
        Self {
            source_tag: site.source_tag.clone(),
            channel_tag: site.channel_tag.clone(),
            clock,
            last_issued_millis: AtomicI64::new(i64::MIN),
        }
    }

    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        let now_millis = now.timestamp_millis();
        let mut issued = self.last_issued_millis.load(Ordering::Acquire);
        loop {
            let next = if now_millis > issued { now_millis } else { issued + 1 };
            match self.last_issued_millis.compare_exchange_weak(
                issued,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return DateTime::from_timestamp_millis(next).unwrap_or(now),
                Err(current) => issued = current,
            }
        }
    }

    pub fn build(&self, record: &FormRecord) -> SubmissionEnvelope {
        let name_field = record.name_field();
        let mut data = BTreeMap::new();

        for (field, value) in record.iter() {
            if Some(field) == name_field {
                let (first, last) = split_full_name(value);
                data.insert("name".to_string(), value.to_string());
                data.insert("firstName".to_string(), first);
                data.insert("lastName".to_string(), last);
            } else {
                data.insert(field.to_string(), value.to_string());
            }
        }
        data.insert("source".to_string(), self.channel_tag.clone());

        SubmissionEnvelope {
            form_type: record.form_type(),
            timestamp: self
                .next_timestamp()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            source: self.source_tag.clone(),
            data,
        }
    }
}
