//! Domain logic for the sell-your-device flow lives here.

pub mod catalog;
pub mod estimator;
pub mod listing;
pub mod session;
pub mod wizard;

pub use estimator::{current_year, estimate_breakdown, format_price};
pub use listing::{DeviceListing, ImagePreview, ListingField, MAX_IMAGE_PREVIEWS};
pub use session::{CurrentUser, Session};
pub use wizard::{
    run_submission, SellPayload, SellWizard, SubmissionOrigin, SubmitAttempt, WizardHandle,
    WizardStep,
};
