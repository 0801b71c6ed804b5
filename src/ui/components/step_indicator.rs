use dioxus::prelude::*;

use crate::domain::WizardStep;
use crate::ui::theme;

#[component]
pub fn StepIndicator(current: WizardStep) -> Element {
    rsx! {
        ol { class: "steps",
            for step in WizardStep::FORM_STEPS {
                li { key: "{step.number()}", class: "step",
                    span { class: theme::step_dot(step < current, step == current), "{step.number()}" }
                    span { class: "step-title", "{step.title()}" }
                }
            }
        }
    }
}
