//! The request form view model.
//!
//! [`RequestForm`] owns everything the form shows: the three lookup
//! selectors, the header fields, the line-item grid, the signatories and
//! the submission banner. A renderer drives it through method calls and
//! reads its state back; it never touches the network except through a
//! [`RequestStoreClient`].

mod connectivity;
mod line_items;
mod lookups;
mod signatories;
mod submission;

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::{ClientError, RequestStoreClient};
use crate::config::FormConfig;
use crate::model::{LookupKind, RequestAction, RequestPayload};

pub use connectivity::{Connectivity, ConnectivityMonitor, OFFLINE_MESSAGE};
pub use line_items::{coerce_quantity, LineItem, LineItemField, LineItemGrid, LineItemValue};
pub use lookups::{
    fetch_lookups, load_lookups, LookupField, LookupSet, LookupState, LOOKUPS_UNAVAILABLE_MESSAGE,
};
pub use signatories::{Signatories, SignatoryRole};
pub use submission::{
    build_payload, success_message, Banner, BannerKind, SubmissionFields, SubmitOutcome,
};

/// Errors raised by the form before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter request details!")]
    MissingDetails,

    #[error("Please enter the request ID to update!")]
    MissingRequestId,

    #[error("Row {index} does not exist (grid has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("{person} is not available for {role}")]
    UnknownSignatory { role: SignatoryRole, person: String },

    #[error("{kind} options are not available")]
    LookupUnavailable { kind: LookupKind },

    #[error("Unknown {kind} id {id}")]
    UnknownLookup { kind: LookupKind, id: i64 },
}

/// State of one visit to the request form.
#[derive(Debug, Clone)]
pub struct RequestForm {
    lookups: LookupState,
    series_no: String,
    date: Option<NaiveDate>,
    po_number: String,
    details: String,
    request_id: Option<i64>,
    branch_id: Option<i64>,
    department_id: Option<i64>,
    mis_id: Option<i64>,
    items: LineItemGrid,
    signatories: Signatories,
    field_error: Option<FormError>,
    banner: Option<Banner>,
    print_requested: bool,
    pending: bool,
    offline: bool,
    banner_dismiss: Duration,
}

impl RequestForm {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            lookups: LookupState::Loading,
            series_no: String::new(),
            date: None,
            po_number: String::new(),
            details: config.default_details.clone(),
            request_id: None,
            branch_id: None,
            department_id: None,
            mis_id: None,
            items: LineItemGrid::new(),
            signatories: Signatories::new(config.signatory_people.clone()),
            field_error: None,
            banner: None,
            print_requested: false,
            pending: false,
            offline: false,
            banner_dismiss: Duration::from_secs(config.banner_dismiss_secs),
        }
    }

    /// Loads the three selectors concurrently. The form is in
    /// [`LookupState::Loading`] until all of them settle.
    pub async fn mount(&mut self, client: &dyn RequestStoreClient) {
        self.lookups = LookupState::Loading;
        self.lookups = load_lookups(client).await;
        if let LookupState::Ready(set) = &self.lookups {
            let failed = set.failed_kinds();
            if !failed.is_empty() {
                debug!(failed = ?failed, "Form mounted with partial lookups");
            }
        }
    }

    /// Re-issues all three lookup fetches after a page-level failure.
    pub async fn retry_lookups(&mut self, client: &dyn RequestStoreClient) {
        info!("Retrying lookup fetches");
        self.mount(client).await;
    }

    pub fn lookups(&self) -> &LookupState {
        &self.lookups
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lookups, LookupState::Loading)
    }

    // Header fields

    pub fn series_no(&self) -> &str {
        &self.series_no
    }

    pub fn set_series_no(&mut self, value: impl Into<String>) {
        self.series_no = value.into();
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    pub fn po_number(&self) -> &str {
        &self.po_number
    }

    pub fn set_po_number(&mut self, value: impl Into<String>) {
        self.po_number = value.into();
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn set_details(&mut self, value: impl Into<String>) {
        self.details = value.into();
        if self.field_error == Some(FormError::MissingDetails) {
            self.field_error = None;
        }
    }

    pub fn request_id(&self) -> Option<i64> {
        self.request_id
    }

    pub fn set_request_id(&mut self, id: Option<i64>) {
        self.request_id = id;
        if self.field_error == Some(FormError::MissingRequestId) {
            self.field_error = None;
        }
    }

    /// Selects an entry in one of the lookup selectors, or clears it with
    /// `None`. Only ids offered by a loaded selector are accepted.
    pub fn select_lookup(&mut self, kind: LookupKind, id: Option<i64>) -> Result<(), FormError> {
        if let Some(id) = id {
            let field = match &self.lookups {
                LookupState::Ready(set) => set.get(kind),
                _ => return Err(FormError::LookupUnavailable { kind }),
            };
            if field.is_failed() {
                return Err(FormError::LookupUnavailable { kind });
            }
            if field.find(id).is_none() {
                return Err(FormError::UnknownLookup { kind, id });
            }
        }

        match kind {
            LookupKind::Branch => self.branch_id = id,
            LookupKind::Department => self.department_id = id,
            LookupKind::MisName => self.mis_id = id,
        }
        Ok(())
    }

    pub fn selected_lookup(&self, kind: LookupKind) -> Option<i64> {
        match kind {
            LookupKind::Branch => self.branch_id,
            LookupKind::Department => self.department_id,
            LookupKind::MisName => self.mis_id,
        }
    }

    // Line items and signatories

    pub fn items(&self) -> &LineItemGrid {
        &self.items
    }

    pub fn edit_item(&mut self, index: usize, value: LineItemValue) -> Result<(), FormError> {
        self.items = self.items.edit(index, value)?;
        Ok(())
    }

    pub fn edit_item_raw(
        &mut self,
        index: usize,
        field: LineItemField,
        raw: &str,
    ) -> Result<(), FormError> {
        self.items = self.items.edit_raw(index, field, raw)?;
        Ok(())
    }

    pub fn signatories(&self) -> &Signatories {
        &self.signatories
    }

    pub fn select_signatory(&mut self, role: SignatoryRole, person: &str) -> Result<(), FormError> {
        self.signatories.select(role, person)
    }

    pub fn clear_signatory(&mut self, role: SignatoryRole) {
        self.signatories.clear(role);
    }

    // Submission

    /// The validation error currently shown next to its field.
    pub fn field_error(&self) -> Option<&FormError> {
        self.field_error.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether the submit controls accept a press.
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.is_loading() && !self.lookups_unavailable()
    }

    fn lookups_unavailable(&self) -> bool {
        matches!(self.lookups, LookupState::Unavailable { .. })
    }

    /// Validates the form for `action` without sending anything.
    pub fn prepare_submission(&self, action: RequestAction) -> Result<RequestPayload, FormError> {
        build_payload(
            action,
            &SubmissionFields {
                details: &self.details,
                request_id: self.request_id,
                branch_id: self.branch_id,
                department_id: self.department_id,
                mis_id: self.mis_id,
            },
        )
    }

    /// Starts a submission. On success the form is pending and the returned
    /// payload should be sent; otherwise the outcome is final.
    pub fn begin_submit(&mut self, action: RequestAction) -> Result<RequestPayload, SubmitOutcome> {
        if self.pending {
            return Err(SubmitOutcome::Busy);
        }
        match self.prepare_submission(action) {
            Ok(payload) => {
                self.field_error = None;
                self.pending = true;
                Ok(payload)
            }
            Err(e) => {
                debug!(action = %action, error = %e, "Submission rejected by validation");
                self.field_error = Some(e.clone());
                Err(SubmitOutcome::Invalid(e))
            }
        }
    }

    /// Settles a submission started with [`RequestForm::begin_submit`].
    pub fn finish_submit(
        &mut self,
        action: RequestAction,
        result: Result<(), ClientError>,
    ) -> SubmitOutcome {
        self.pending = false;
        match result {
            Ok(()) => {
                info!(action = %action, "Request submitted");
                if action == RequestAction::Print {
                    self.banner = None;
                    self.print_requested = true;
                } else {
                    self.banner = Some(Banner::success(success_message(action), self.banner_dismiss));
                }
                SubmitOutcome::for_action(action)
            }
            Err(e) => {
                warn!(action = %action, error = %e, "Request submission failed");
                let message = e.user_message();
                self.banner = Some(Banner::error(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Validates, sends and settles a submission in one call.
    pub async fn submit(
        &mut self,
        client: &dyn RequestStoreClient,
        action: RequestAction,
    ) -> SubmitOutcome {
        let payload = match self.begin_submit(action) {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };
        let result = client.submit_request(&payload).await;
        self.finish_submit(action, result)
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Clears a success banner whose display time has passed.
    pub fn expire_banner(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|b| b.is_expired(now)) {
            self.banner = None;
        }
    }

    /// Returns true once after a successful print submission; the caller
    /// then opens the platform print dialog.
    pub fn take_print_request(&mut self) -> bool {
        std::mem::take(&mut self.print_requested)
    }

    // Connectivity

    pub fn on_connectivity(&mut self, status: Connectivity) {
        self.offline = status == Connectivity::Offline;
    }

    /// Applies the latest status published by a [`ConnectivityMonitor`].
    pub fn sync_connectivity(&mut self, rx: &mut watch::Receiver<Connectivity>) {
        let status = *rx.borrow_and_update();
        self.on_connectivity(status);
    }

    /// Waits for the next connectivity change and applies it. Returns false
    /// once the monitor is gone.
    pub async fn next_connectivity(&mut self, rx: &mut watch::Receiver<Connectivity>) -> bool {
        if rx.changed().await.is_err() {
            return false;
        }
        self.sync_connectivity(rx);
        debug!(offline = self.offline, "Connectivity changed");
        true
    }

    pub fn offline_banner(&self) -> Option<&'static str> {
        self.offline.then_some(OFFLINE_MESSAGE)
    }
}
