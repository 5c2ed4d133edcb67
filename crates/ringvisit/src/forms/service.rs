use std::time::Duration;

use tracing::debug;

use super::dispatch::{DispatchReporter, SubmissionDispatcher, WebhookTransport};
use super::feedback::{FeedbackPresenter, FormSession, NotificationSurface, SubmissionFeedback};
use super::payload::{Clock, PayloadBuilder, SystemClock};
use super::schema::{FormSchema, SchemaError};
use super::validator::{validate, RawInput};
use super::FormType;
use crate::config::SiteConfig;

/// How a form's valid submissions leave the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Webhook,
    /// Skip the network and hold the session busy for a fixed delay.
    Simulated(Duration),
}

/// Composes validator, payload builder, dispatcher, and presenter for both forms.
pub struct LeadCaptureService<T, R, N, C = SystemClock> {
    contact: FormSchema,
    partner: FormSchema,
    builder: PayloadBuilder<C>,
    dispatcher: SubmissionDispatcher<T, R>,
    presenter: FeedbackPresenter<N>,
    partner_mode: DispatchMode,
}

impl<T, R, N> LeadCaptureService<T, R, N, SystemClock>
where
    T: WebhookTransport,
    R: DispatchReporter,
    N: NotificationSurface,
{
    pub fn new(
        site: &SiteConfig,
        transport: T,
        reporter: R,
        surface: N,
    ) -> Result<Self, SchemaError> {
        Self::with_clock(site, transport, reporter, surface, SystemClock)
    }
}

impl<T, R, N, C> LeadCaptureService<T, R, N, C>
where
    T: WebhookTransport,
    R: DispatchReporter,
    N: NotificationSurface,
    C: Clock,
{
    pub fn with_clock(
        site: &SiteConfig,
        transport: T,
        reporter: R,
        surface: N,
        clock: C,
    ) -> Result<Self, SchemaError> {
        let partner_mode = match site.partner_simulated_delay {
            Some(delay) => DispatchMode::Simulated(delay),
            None => DispatchMode::Webhook,
        };

        Ok(Self {
            contact: FormSchema::contact()?,
            partner: FormSchema::partner()?,
            builder: PayloadBuilder::with_clock(site, clock),
            dispatcher: SubmissionDispatcher::new(transport, reporter, site.webhooks.clone()),
            presenter: FeedbackPresenter::new(surface),
            partner_mode,
        })
    }

    pub fn schema(&self, form_type: FormType) -> &FormSchema {
        match form_type {
            FormType::Contact => &self.contact,
            FormType::Partner => &self.partner,
        }
    }

    pub fn dispatch_mode(&self, form_type: FormType) -> DispatchMode {
        match form_type {
            FormType::Contact => DispatchMode::Webhook,
            FormType::Partner => self.partner_mode,
        }
    }

    /// Run one submit action against `session`.
    ///
    /// Returns `Busy` without side effects while the session already has a
    /// submission in flight. Transport failures are reported by the dispatcher
    /// and never change the outcome seen here.
    pub async fn submit(&self, session: &FormSession, input: RawInput) -> SubmissionFeedback {
        let form_type = session.form_type();
        let Some(guard) = session.begin(input) else {
            debug!(form = %form_type, "submission ignored while another is in flight");
            return SubmissionFeedback::Busy;
        };

        let schema = self.schema(form_type);
        let record = match validate(schema, &guard.values()) {
            Ok(record) => record,
            Err(errors) => {
                debug!(form = %form_type, invalid = errors.len(), "lead form rejected");
                return guard.reject(errors);
            }
        };

        guard.submitting();
        let envelope = self.builder.build(&record);

        match self.dispatch_mode(form_type) {
            DispatchMode::Webhook => self.dispatcher.dispatch(&envelope).await,
            DispatchMode::Simulated(delay) => {
                debug!(form = %form_type, ?delay, "simulating lead delivery");
                tokio::time::sleep(delay).await;
            }
        }

        let notice = self.presenter.success(form_type);
        let fields: Vec<&str> = schema.fields().iter().map(|field| field.name()).collect();
        guard.complete(notice, &fields)
    }
}
