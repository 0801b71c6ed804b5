//! Four-step sell wizard: device info, specs, condition, contact details,
//! then a terminal success screen.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};

use super::estimator::estimate;
use super::listing::{DeviceListing, ImagePreview, ListingField, MAX_IMAGE_PREVIEWS};
use super::session::CurrentUser;
use crate::infra::api::{ApiError, SubmissionGateway};
use crate::infra::offline::{record_offline_submission, OfflineSubmission};
use crate::util::persistence::{
    LocalStore, PersistSaveError, PENDING_FORM_KEY, PENDING_IMAGES_KEY, PENDING_STEP_KEY,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    #[default]
    DeviceInfo,
    Specifications,
    Condition,
    ContactDetails,
    Success,
}

impl WizardStep {
    pub const FORM_STEPS: [WizardStep; 4] = [
        WizardStep::DeviceInfo,
        WizardStep::Specifications,
        WizardStep::Condition,
        WizardStep::ContactDetails,
    ];

    /// 1-based position, as shown to the user and stored while signing in.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::DeviceInfo => 1,
            WizardStep::Specifications => 2,
            WizardStep::Condition => 3,
            WizardStep::ContactDetails => 4,
            WizardStep::Success => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::DeviceInfo),
            2 => Some(WizardStep::Specifications),
            3 => Some(WizardStep::Condition),
            4 => Some(WizardStep::ContactDetails),
            5 => Some(WizardStep::Success),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::DeviceInfo => "Device Info",
            WizardStep::Specifications => "Specifications",
            WizardStep::Condition => "Condition",
            WizardStep::ContactDetails => "Contact Details",
            WizardStep::Success => "Done",
        }
    }

    pub fn required_fields(self) -> &'static [ListingField] {
        match self {
            WizardStep::DeviceInfo => &[
                ListingField::Brand,
                ListingField::Model,
                ListingField::Year,
                ListingField::Condition,
            ],
            WizardStep::Specifications => &[
                ListingField::Processor,
                ListingField::Ram,
                ListingField::Storage,
                ListingField::ScreenSize,
            ],
            WizardStep::Condition => &[
                ListingField::Scratches,
                ListingField::Dents,
                ListingField::ScreenCondition,
                ListingField::BatteryHealth,
            ],
            WizardStep::ContactDetails => &[
                ListingField::Name,
                ListingField::Email,
                ListingField::Phone,
                ListingField::Pincode,
                ListingField::City,
                ListingField::Address,
            ],
            WizardStep::Success => &[],
        }
    }

    fn following(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    fn preceding(self) -> Option<Self> {
        Self::from_number(self.number().saturating_sub(1))
    }
}

/// What the backend receives: the listing plus the estimate shown to the
/// customer and the account it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellPayload {
    #[serde(flatten)]
    pub listing: DeviceListing,
    pub estimated_price: i64,
    pub user_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionOrigin {
    Backend,
    /// The backend call failed and the request was only recorded locally.
    LocalFallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub reference_id: String,
    pub estimated_price: i64,
    pub origin: SubmissionOrigin,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BlockReason {
    NotOnContactStep,
    InFlight,
    Incomplete(Vec<ListingField>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitDecision {
    /// Marked in flight; send this payload to the gateway.
    Ready(SellPayload),
    /// Progress was saved; the customer must sign in first.
    LoginRequired,
    Blocked(BlockReason),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitAttempt {
    Completed(SubmissionReceipt),
    LoginRequired,
    Blocked(BlockReason),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SellWizard {
    listing: DeviceListing,
    images: Vec<ImagePreview>,
    step: WizardStep,
    submitting: bool,
    receipt: Option<SubmissionReceipt>,
}

impl SellWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn listing(&self) -> &DeviceListing {
        &self.listing
    }

    pub fn images(&self) -> &[ImagePreview] {
        &self.images
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn update(&mut self, field: ListingField, value: impl Into<String>) {
        self.listing.set(field, value);
    }

    pub fn set_charger_included(&mut self, included: bool) {
        self.listing.charger_included = included;
    }

    pub fn set_original_box(&mut self, included: bool) {
        self.listing.original_box = included;
    }

    pub fn prefill_contact(&mut self, user: &CurrentUser) {
        self.listing
            .prefill_contact(&user.name, &user.email, &user.phone);
    }

    /// Adds a photo preview; refused once the limit is reached.
    pub fn add_image(&mut self, preview: ImagePreview) -> bool {
        if self.images.len() >= MAX_IMAGE_PREVIEWS {
            return false;
        }
        self.images.push(preview);
        true
    }

    pub fn remove_image(&mut self, index: usize) -> Option<ImagePreview> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn estimate(&self, current_year: i32) -> i64 {
        estimate(&self.listing, current_year)
    }

    pub fn missing_fields(&self, step: WizardStep) -> Vec<ListingField> {
        step.required_fields()
            .iter()
            .copied()
            .filter(|field| !self.listing.is_filled(*field))
            .collect()
    }

    pub fn missing_all_fields(&self) -> Vec<ListingField> {
        WizardStep::FORM_STEPS
            .iter()
            .flat_map(|step| self.missing_fields(*step))
            .collect()
    }

    /// Whether the primary button of the current step is live.
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Success => false,
            WizardStep::ContactDetails => {
                !self.submitting && self.missing_all_fields().is_empty()
            }
            step => self.missing_fields(step).is_empty(),
        }
    }

    /// Moves forward from steps one to three when the step is complete.
    pub fn next(&mut self) -> bool {
        if self.step >= WizardStep::ContactDetails || !self.can_advance() {
            return false;
        }
        match self.step.following() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) -> bool {
        if self.step == WizardStep::Success || self.submitting {
            return false;
        }
        match self.step.preceding() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn begin_submission(
        &mut self,
        user: Option<&CurrentUser>,
        store: &LocalStore,
        current_year: i32,
    ) -> SubmitDecision {
        if self.step != WizardStep::ContactDetails {
            return SubmitDecision::Blocked(BlockReason::NotOnContactStep);
        }
        if self.submitting {
            return SubmitDecision::Blocked(BlockReason::InFlight);
        }
        let missing = self.missing_all_fields();
        if !missing.is_empty() {
            return SubmitDecision::Blocked(BlockReason::Incomplete(missing));
        }

        let Some(user) = user else {
            if let Err(err) = self.persist_pending(store) {
                warn!("[wizard] failed to save progress before sign-in: {err}");
            }
            info!("[wizard] sign-in required, progress saved at step {}", self.step.number());
            return SubmitDecision::LoginRequired;
        };

        self.submitting = true;
        SubmitDecision::Ready(SellPayload {
            listing: self.listing.clone(),
            estimated_price: self.estimate(current_year),
            user_id: user.id.clone(),
        })
    }

    /// Settles an in-flight submission. A failed backend call is recorded
    /// locally under a client-side reference and still ends on the success
    /// screen.
    pub fn complete_submission(
        &mut self,
        payload: SellPayload,
        result: Result<String, ApiError>,
        store: &LocalStore,
    ) -> &SubmissionReceipt {
        self.submitting = false;
        let estimated_price = payload.estimated_price;

        let receipt = match result {
            Ok(reference_id) => {
                info!("[wizard] sell request accepted as {reference_id}");
                SubmissionReceipt {
                    reference_id,
                    estimated_price,
                    origin: SubmissionOrigin::Backend,
                }
            }
            Err(err) => {
                warn!("[wizard] sell request failed, keeping it locally: {err}");
                let entry = OfflineSubmission::new(payload, err.to_string(), OffsetDateTime::now_utc());
                if let Err(store_err) = record_offline_submission(store, &entry) {
                    warn!("[wizard] could not record offline submission: {store_err}");
                }
                SubmissionReceipt {
                    reference_id: entry.reference_id,
                    estimated_price,
                    origin: SubmissionOrigin::LocalFallback,
                }
            }
        };

        self.step = WizardStep::Success;
        self.receipt.insert(receipt)
    }

    /// Resets everything and returns to step one. Only valid on the success
    /// screen.
    pub fn start_new_sale(&mut self) -> bool {
        if self.step != WizardStep::Success {
            return false;
        }
        *self = Self::default();
        true
    }

    pub fn persist_pending(&self, store: &LocalStore) -> Result<(), PersistSaveError> {
        store.set(PENDING_FORM_KEY, &self.listing)?;
        store.set(PENDING_IMAGES_KEY, &self.images)?;
        store.set(PENDING_STEP_KEY, &self.step.number())?;
        Ok(())
    }

    pub fn has_pending(store: &LocalStore) -> bool {
        store.contains(PENDING_FORM_KEY)
    }

    /// Reloads progress saved before a sign-in detour and clears it from the
    /// store. Returns false when nothing was saved.
    pub fn restore_pending(&mut self, store: &LocalStore) -> bool {
        let Some(listing) = store.get::<DeviceListing>(PENDING_FORM_KEY) else {
            if Self::has_pending(store) {
                warn!("[wizard] discarding unreadable saved progress");
                Self::clear_pending(store);
            }
            return false;
        };
        let images = store
            .get::<Vec<ImagePreview>>(PENDING_IMAGES_KEY)
            .unwrap_or_default();
        let step = store
            .get::<u8>(PENDING_STEP_KEY)
            .and_then(WizardStep::from_number)
            .filter(|step| *step != WizardStep::Success)
            .unwrap_or(WizardStep::ContactDetails);

        *self = Self {
            listing,
            images,
            step,
            submitting: false,
            receipt: None,
        };
        Self::clear_pending(store);
        info!("[wizard] restored saved progress at step {}", step.number());
        true
    }

    pub fn clear_pending(store: &LocalStore) {
        for key in [PENDING_FORM_KEY, PENDING_IMAGES_KEY, PENDING_STEP_KEY] {
            if let Err(err) = store.remove(key) {
                warn!("[wizard] failed to clear {key}: {err}");
            }
        }
    }
}

/// Mutable access to the wizard a submission settles into. Implemented by
/// the plain state and by UI containers that cannot lend `&mut` across an
/// await point.
pub trait WizardHandle {
    fn with_wizard<R>(&mut self, f: impl FnOnce(&mut SellWizard) -> R) -> R;
}

impl WizardHandle for SellWizard {
    fn with_wizard<R>(&mut self, f: impl FnOnce(&mut SellWizard) -> R) -> R {
        f(self)
    }
}

/// Runs a full submit from the contact step through the gateway call.
pub async fn run_submission<W, G>(
    wizard: &mut W,
    gateway: &G,
    user: Option<&CurrentUser>,
    store: &LocalStore,
    current_year: i32,
) -> SubmitAttempt
where
    W: WizardHandle,
    G: SubmissionGateway + ?Sized,
{
    match wizard.with_wizard(|w| w.begin_submission(user, store, current_year)) {
        SubmitDecision::Ready(payload) => {
            let result = gateway.submit_listing(&payload).await;
            let receipt =
                wizard.with_wizard(|w| w.complete_submission(payload, result, store).clone());
            SubmitAttempt::Completed(receipt)
        }
        SubmitDecision::LoginRequired => SubmitAttempt::LoginRequired,
        SubmitDecision::Blocked(reason) => SubmitAttempt::Blocked(reason),
    }
}
