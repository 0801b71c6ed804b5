pub mod estimate_card;
pub mod form_field;
pub mod photo_picker;
pub mod step_indicator;
pub mod toast;
