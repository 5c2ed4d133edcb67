//! Lead-capture pipeline for the contact and partner forms.
//!
//! A submit action flows through the validator, the payload builder, and the
//! webhook dispatcher before the feedback presenter resets the form session.
//! Transport failures never reach the submitter; they are reported through the
//! dispatcher's side channel only.

pub mod dispatch;
pub mod feedback;
pub mod payload;
pub mod router;
pub mod schema;
pub mod service;
pub mod validator;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two lead forms served by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    Contact,
    Partner,
}

impl FormType {
    pub fn label(&self) -> &'static str {
        match self {
            FormType::Contact => "Contact",
            FormType::Partner => "Partner",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub use dispatch::{
    DispatchError, DispatchReporter, ReqwestTransport, SubmissionDispatcher, SubmissionOutcome,
    TracingReporter, WebhookTransport,
};
pub use feedback::{
    FeedbackPresenter, FormSession, Notice, NotificationSurface, SubmissionFeedback,
    SubmissionPhase, TracingNotifier,
};
pub use payload::{split_full_name, Clock, PayloadBuilder, SubmissionEnvelope, SystemClock};
pub use router::lead_router;
pub use schema::{FieldKind, FieldRule, FormSchema, SchemaError};
pub use service::{DispatchMode, LeadCaptureService};
pub use validator::{validate, FieldErrors, FormRecord, RawInput, ValidationResult};
