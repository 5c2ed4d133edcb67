use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::info;

use super::validator::{FieldErrors, RawInput};
use super::FormType;

/// Where a form instance sits in its submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Invalid,
    Submitting,
}

/// Transient message shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Generic "show a transient message" capability supplied by the host.
pub trait NotificationSurface: Send + Sync {
    fn show(&self, notice: &Notice);
}

/// Emits notices as `tracing` events; used where no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSurface for TracingNotifier {
    fn show(&self, notice: &Notice) {
        info!(
            title = %notice.title,
            description = notice.description.as_deref().unwrap_or(""),
            "lead notice shown"
        );
    }
}

/// User-visible result of one submit action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionFeedback {
    /// Fields cleared; shown whether or not the webhook accepted the lead.
    Accepted {
        notice: Notice,
        values: BTreeMap<String, String>,
    },
    /// Entered values kept alongside one message per offending field.
    Invalid {
        errors: FieldErrors,
        values: BTreeMap<String, String>,
    },
    /// A submission from this form instance is still in flight.
    Busy,
}

#[derive(Debug)]
struct SessionState {
    phase: SubmissionPhase,
    values: BTreeMap<String, String>,
    errors: FieldErrors,
}

/// Per-instance form state: entered values, last errors, and the in-flight lock.
#[derive(Debug)]
pub struct FormSession {
    form_type: FormType,
    state: Mutex<SessionState>,
}

impl FormSession {
    pub fn new(form_type: FormType) -> Self {
        Self {
            form_type,
            state: Mutex::new(SessionState {
                phase: SubmissionPhase::Idle,
                values: BTreeMap::new(),
                errors: FieldErrors::default(),
            }),
        }
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.lock().phase
    }

    /// Submit control is disabled while a submission is validating or in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase(),
            SubmissionPhase::Validating | SubmissionPhase::Submitting
        )
    }

    pub fn values(&self) -> BTreeMap<String, String> {
        self.lock().values.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.lock().errors.clone()
    }

    /// Record edits made between submissions. Editing a rejected form returns
    /// it to `Idle`; the last errors stay visible until the next submit.
    pub fn set_value(&self, field: impl Into<String>, value: impl Into<String>) {
        let mut state = self.lock();
        state.values.insert(field.into(), value.into());
        if state.phase == SubmissionPhase::Invalid {
            state.phase = SubmissionPhase::Idle;
        }
    }

    /// Claim the instance for one submit action. `None` while another is in flight.
    pub(crate) fn begin(&self, input: RawInput) -> Option<SubmitGuard<'_>> {
        let mut state = self.lock();
        if matches!(
            state.phase,
            SubmissionPhase::Validating | SubmissionPhase::Submitting
        ) {
            return None;
        }

        state.phase = SubmissionPhase::Validating;
        state.values = input;
        state.errors = FieldErrors::default();

        Some(SubmitGuard {
            session: self,
            settled: false,
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the in-flight lock for one submit action. Dropping it unsettled
/// (an abandoned submission) returns the session to `Idle` with values kept.
#[derive(Debug)]
pub(crate) struct SubmitGuard<'a> {
    session: &'a FormSession,
    settled: bool,
}

impl SubmitGuard<'_> {
    pub(crate) fn values(&self) -> BTreeMap<String, String> {
        self.session.values()
    }

    /// Validating → Invalid, errors shown and values kept. The session leaves
    /// `Invalid` on the next edit or submit.
    pub(crate) fn reject(mut self, errors: FieldErrors) -> SubmissionFeedback {
        let mut state = self.session.lock();
        state.errors = errors.clone();
        state.phase = SubmissionPhase::Invalid;
        let values = state.values.clone();
        drop(state);
        self.settled = true;

        SubmissionFeedback::Invalid { errors, values }
    }

    /// Validating → Submitting.
    pub(crate) fn submitting(&self) {
        self.session.lock().phase = SubmissionPhase::Submitting;
    }

    /// Submitting → Idle with every field cleared.
    pub(crate) fn complete(mut self, notice: Notice, fields: &[&str]) -> SubmissionFeedback {
        let cleared: BTreeMap<String, String> = fields
            .iter()
            .map(|field| (field.to_string(), String::new()))
            .collect();

        let mut state = self.session.lock();
        state.values = cleared.clone();
        state.errors = FieldErrors::default();
        state.phase = SubmissionPhase::Idle;
        drop(state);
        self.settled = true;

        SubmissionFeedback::Accepted {
            notice,
            values: cleared,
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.session.lock().phase = SubmissionPhase::Idle;
        }
    }
}

/// Fixed success copy per form, shown through the notification surface.
#[derive(Debug, Clone)]
pub struct FeedbackPresenter<N = TracingNotifier> {
    surface: N,
}

impl<N: NotificationSurface> FeedbackPresenter<N> {
    pub fn new(surface: N) -> Self {
        Self { surface }
    }

    pub fn notice_for(form_type: FormType) -> Notice {
        match form_type {
            FormType::Contact => Notice {
                title: "Thank you! We'll get back to you within 24 hours.".to_string(),
                description: Some("Check your email for confirmation.".to_string()),
            },
            FormType::Partner => Notice {
                title: "Thank you for your interest!".to_string(),
                description: Some(
                    "Our partnership team will contact you within 2 business days.".to_string(),
                ),
            },
        }
    }

    /// Show the success notice and hand it back for the caller's response.
    pub fn success(&self, form_type: FormType) -> Notice {
        let notice = Self::notice_for(form_type);
        self.surface.show(&notice);
        notice
    }
}
