//! Payload assembly, client-side validation and result banners.

use std::time::{Duration, Instant};

use crate::model::{RequestAction, RequestPayload};

use super::FormError;

/// Values the form contributes to a submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionFields<'a> {
    pub details: &'a str,
    pub request_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub department_id: Option<i64>,
    pub mis_id: Option<i64>,
}

/// Validates the fields and builds the JSON payload for `action`.
///
/// Nothing here touches the network: a validation error means no request
/// is sent.
pub fn build_payload(
    action: RequestAction,
    fields: &SubmissionFields<'_>,
) -> Result<RequestPayload, FormError> {
    if fields.details.trim().is_empty() {
        return Err(FormError::MissingDetails);
    }
    if action == RequestAction::Update && fields.request_id.is_none() {
        return Err(FormError::MissingRequestId);
    }

    Ok(RequestPayload {
        details: Some(fields.details.to_string()),
        action: Some(action),
        id: fields.request_id,
        branch_id: fields.branch_id,
        department_id: fields.department_id,
        mis_id: fields.mis_id,
    })
}

pub fn success_message(action: RequestAction) -> &'static str {
    match action {
        RequestAction::Save => "Request saved successfully!",
        RequestAction::Update => "Request updated successfully!",
        RequestAction::Print => "Request sent to the printer.",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// A status banner above the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    shown_at: Instant,
    dismiss_after: Option<Duration>,
}

impl Banner {
    /// A success banner that clears itself after `after`.
    pub fn success(message: impl Into<String>, after: Duration) -> Self {
        Self::new(BannerKind::Success, message.into(), Some(after))
    }

    /// Error banners stay until dismissed.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(BannerKind::Error, message.into(), None)
    }

    fn new(kind: BannerKind, message: String, dismiss_after: Option<Duration>) -> Self {
        Self {
            kind,
            message,
            shown_at: Instant::now(),
            dismiss_after,
        }
    }

    pub fn auto_dismisses(&self) -> bool {
        self.dismiss_after.is_some()
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        match self.dismiss_after {
            Some(after) => now.saturating_duration_since(self.shown_at) >= after,
            None => false,
        }
    }
}

/// What happened when the user pressed a submit button.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved,
    Updated,
    /// Accepted by the store; the print dialog should open.
    PrintRequested,
    /// Rejected before any request was sent.
    Invalid(FormError),
    /// The store or the network failed; carries the banner text.
    Failed(String),
    /// A previous submission is still in flight.
    Busy,
}

impl SubmitOutcome {
    pub fn for_action(action: RequestAction) -> Self {
        match action {
            RequestAction::Save => SubmitOutcome::Saved,
            RequestAction::Update => SubmitOutcome::Updated,
            RequestAction::Print => SubmitOutcome::PrintRequested,
        }
    }
}
