//! Shared class names; the rules live in `assets/main.css`.

// ============================================
// BUTTON STYLES
// ============================================

pub const BTN_PRIMARY: &str = "btn btn-primary";
pub const BTN_SECONDARY: &str = "btn btn-secondary";
pub const BTN_DANGER: &str = "btn btn-danger";
pub const BTN_LINK: &str = "btn btn-link";

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "nav-btn nav-btn-active"
    } else {
        "nav-btn"
    }
}

// ============================================
// INPUT STYLES
// ============================================

pub const FIELD: &str = "field";
pub const FIELD_LABEL: &str = "field-label";
pub const FIELD_INPUT: &str = "field-input";
pub const FIELD_HINT: &str = "field-hint";

// ============================================
// PANELS
// ============================================

pub const PANEL: &str = "panel";
pub const PANEL_TITLE: &str = "panel-title";
pub const TEXT_MUTED: &str = "text-muted";

pub fn step_dot(done: bool, current: bool) -> &'static str {
    match (done, current) {
        (_, true) => "step-dot step-dot-current",
        (true, false) => "step-dot step-dot-done",
        (false, false) => "step-dot",
    }
}
