use time::OffsetDateTime;

use super::catalog::{
    brand_pricing, condition_multiplier, ram_bonus, storage_size_bonus, storage_type_bonus,
    CHARGER_BONUS, ORIGINAL_BOX_BONUS,
};
use super::listing::DeviceListing;

const DEPRECIATION_PER_YEAR: f64 = 0.12;
const MAX_DEPRECIATION: f64 = 0.8;
const ROUNDING_STEP: f64 = 500.0;

/// Every component of an estimate, kept for the explanation line in the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct EstimateBreakdown {
    pub base: i64,
    pub depreciation: f64,
    pub depreciated: f64,
    pub condition_multiplier: f64,
    pub condition_adjusted: f64,
    pub ram_bonus: i64,
    pub storage_bonus: i64,
    pub accessory_bonus: i64,
    pub clamped: f64,
    pub total: i64,
}

impl EstimateBreakdown {
    pub fn rationale(&self) -> String {
        format!(
            "Base {} less {:.0}% age, x{:.2} condition, +{} RAM, +{} storage, +{} accessories",
            self.base,
            self.depreciation * 100.0,
            self.condition_multiplier,
            self.ram_bonus,
            self.storage_bonus,
            self.accessory_bonus
        )
    }
}

/// Estimated purchase offer in rupees, rounded to the nearest 500.
///
/// Returns 0 while brand or condition is still unset.
pub fn estimate(listing: &DeviceListing, current_year: i32) -> i64 {
    estimate_breakdown(listing, current_year)
        .map(|breakdown| breakdown.total)
        .unwrap_or(0)
}

pub fn estimate_breakdown(listing: &DeviceListing, current_year: i32) -> Option<EstimateBreakdown> {
    if listing.brand.trim().is_empty() || listing.condition.trim().is_empty() {
        return None;
    }

    let pricing = brand_pricing(&listing.brand);

    let age = listing
        .year
        .trim()
        .parse::<i32>()
        .map(|year| (current_year - year).max(0))
        .unwrap_or(0);
    let depreciation = (f64::from(age) * DEPRECIATION_PER_YEAR).min(MAX_DEPRECIATION);
    let depreciated = pricing.base as f64 * (1.0 - depreciation);

    let multiplier = condition_multiplier(&listing.condition).unwrap_or(1.0);
    let condition_adjusted = depreciated * multiplier;

    let ram = ram_bonus(&listing.ram);
    let storage = storage_type_bonus(&listing.storage_type) + storage_size_bonus(&listing.storage);

    let mut accessories = 0;
    if listing.charger_included {
        accessories += CHARGER_BONUS;
    }
    if listing.original_box {
        accessories += ORIGINAL_BOX_BONUS;
    }

    let running = condition_adjusted + (ram + storage + accessories) as f64;
    let clamped = running.clamp(pricing.min as f64, pricing.max as f64);
    let total = ((clamped / ROUNDING_STEP).round() * ROUNDING_STEP) as i64;

    Some(EstimateBreakdown {
        base: pricing.base,
        depreciation,
        depreciated,
        condition_multiplier: multiplier,
        condition_adjusted,
        ram_bonus: ram,
        storage_bonus: storage,
        accessory_bonus: accessories,
        clamped,
        total,
    })
}

pub fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

/// Formats rupees with Indian digit grouping, e.g. `₹1,17,500`.
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, right) = rest.split_at(rest.len() - 2);
            parts.push(right);
            rest = left;
        }
        parts.push(rest);
        parts.reverse();
        format!("{},{tail}", parts.join(","))
    };
    if amount < 0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{brand_options, condition_options, BRAND_PRICING, RAM_OPTIONS};

    const YEAR: i32 = 2026;

    fn dell_listing() -> DeviceListing {
        DeviceListing {
            brand: "Dell".into(),
            year: (YEAR - 3).to_string(),
            condition: "Good - Visible wear but fully functional".into(),
            ram: "16GB".into(),
            storage_type: "ssd".into(),
            storage: "512".into(),
            charger_included: true,
            original_box: false,
            ..DeviceListing::default()
        }
    }

    #[test]
    fn dell_example_rounds_to_17500() {
        let breakdown = estimate_breakdown(&dell_listing(), YEAR).expect("breakdown");
        assert!((breakdown.depreciated - 11_520.0).abs() < 1e-6);
        assert!((breakdown.condition_adjusted - 6_912.0).abs() < 1e-6);
        assert!((breakdown.clamped - 17_412.0).abs() < 1e-6);
        assert_eq!(breakdown.total, 17_500);
        assert_eq!(estimate(&dell_listing(), YEAR), 17_500);
    }

    #[test]
    fn unset_brand_or_condition_is_zero() {
        let mut listing = dell_listing();
        listing.brand = "  ".into();
        assert_eq!(estimate(&listing, YEAR), 0);

        let mut listing = dell_listing();
        listing.condition.clear();
        assert_eq!(estimate(&listing, YEAR), 0);
    }

    #[test]
    fn estimate_is_deterministic() {
        let listing = dell_listing();
        let first = estimate(&listing, YEAR);
        for _ in 0..10 {
            assert_eq!(estimate(&listing, YEAR), first);
        }
    }

    #[test]
    fn estimate_stays_in_brand_band_and_multiple_of_500() {
        for brand in brand_options() {
            let pricing = brand_pricing(brand);
            for condition in condition_options() {
                for ram in RAM_OPTIONS {
                    for (year, storage, storage_type, extras) in [
                        (YEAR, "2000", "nvme", true),
                        (YEAR - 20, "128", "hdd", false),
                        (2000, "", "", false),
                    ] {
                        let listing = DeviceListing {
                            brand: brand.to_string(),
                            condition: condition.to_string(),
                            year: year.to_string(),
                            ram: ram.to_string(),
                            storage: storage.to_string(),
                            storage_type: storage_type.to_string(),
                            charger_included: extras,
                            original_box: extras,
                            ..DeviceListing::default()
                        };
                        let value = estimate(&listing, YEAR);
                        assert!(value >= pricing.min && value <= pricing.max, "{brand} {value}");
                        assert_eq!(value % 500, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn depreciation_caps_at_eighty_percent() {
        let mut listing = dell_listing();
        listing.year = "2001".into();
        let breakdown = estimate_breakdown(&listing, YEAR).expect("breakdown");
        assert!((breakdown.depreciation - 0.8).abs() < 1e-9);
        assert!((breakdown.depreciated - 3_600.0).abs() < 1e-6);
    }

    #[test]
    fn terabyte_drive_earns_both_size_bonuses() {
        let mut listing = dell_listing();
        listing.storage = "1000".into();
        let breakdown = estimate_breakdown(&listing, YEAR).expect("breakdown");
        assert_eq!(breakdown.storage_bonus, 2_000 + 3_000 + 5_000);
    }

    #[test]
    fn low_values_clamp_to_brand_minimum() {
        let listing = DeviceListing {
            brand: "Toshiba".into(),
            year: "2005".into(),
            condition: "For Parts - Not working".into(),
            charger_included: false,
            ..DeviceListing::default()
        };
        let toshiba = BRAND_PRICING
            .iter()
            .find(|(name, _)| *name == "Toshiba")
            .map(|(_, pricing)| *pricing)
            .expect("toshiba band");
        assert_eq!(estimate(&listing, YEAR), toshiba.min);
    }

    #[test]
    fn formats_indian_grouping() {
        assert_eq!(format_price(0), "₹0");
        assert_eq!(format_price(500), "₹500");
        assert_eq!(format_price(17_500), "₹17,500");
        assert_eq!(format_price(117_500), "₹1,17,500");
        assert_eq!(format_price(12_345_678), "₹1,23,45,678");
    }
}
