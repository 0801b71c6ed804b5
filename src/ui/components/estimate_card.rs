use dioxus::prelude::*;

use crate::domain::{estimate_breakdown, format_price, DeviceListing};

#[component]
pub fn EstimateCard(listing: DeviceListing, current_year: i32) -> Element {
    let Some(breakdown) = estimate_breakdown(&listing, current_year) else {
        return rsx! {
            div { class: "estimate-card estimate-card-empty",
                h3 { class: "panel-title", "Estimated offer" }
                p { class: "text-muted", "Pick a brand and condition to see your estimate." }
            }
        };
    };

    rsx! {
        div { class: "estimate-card",
            h3 { class: "panel-title", "Estimated offer" }
            p { class: "estimate-value", "{format_price(breakdown.total)}" }
            p { class: "estimate-rationale", "{breakdown.rationale()}" }
            p { class: "text-muted", "Final price is confirmed after inspection at pickup." }
        }
    }
}
