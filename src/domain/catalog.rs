//! Fixed option tables for the sell form and the per-brand price bands.

/// Base price and clamp band for one brand, in rupees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrandPricing {
    pub base: i64,
    pub min: i64,
    pub max: i64,
}

pub const BRAND_PRICING: &[(&str, BrandPricing)] = &[
    ("Apple", BrandPricing { base: 35_000, min: 8_000, max: 180_000 }),
    ("Dell", BrandPricing { base: 18_000, min: 3_000, max: 120_000 }),
    ("HP", BrandPricing { base: 16_000, min: 3_000, max: 110_000 }),
    ("Lenovo", BrandPricing { base: 17_000, min: 3_000, max: 115_000 }),
    ("Asus", BrandPricing { base: 16_000, min: 3_000, max: 120_000 }),
    ("Acer", BrandPricing { base: 13_000, min: 2_500, max: 90_000 }),
    ("MSI", BrandPricing { base: 22_000, min: 4_000, max: 150_000 }),
    ("Microsoft", BrandPricing { base: 25_000, min: 5_000, max: 130_000 }),
    ("Samsung", BrandPricing { base: 18_000, min: 3_000, max: 100_000 }),
    ("Razer", BrandPricing { base: 28_000, min: 5_000, max: 160_000 }),
    ("LG", BrandPricing { base: 17_000, min: 3_000, max: 95_000 }),
    ("Toshiba", BrandPricing { base: 9_000, min: 2_000, max: 50_000 }),
    ("Sony", BrandPricing { base: 10_000, min: 2_000, max: 60_000 }),
];

/// Band used for brands missing from [`BRAND_PRICING`], including "Other".
pub const FALLBACK_PRICING: BrandPricing = BrandPricing {
    base: 10_000,
    min: 2_000,
    max: 60_000,
};

pub fn brand_pricing(brand: &str) -> BrandPricing {
    let brand = brand.trim();
    BRAND_PRICING
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(brand))
        .map(|(_, pricing)| *pricing)
        .unwrap_or(FALLBACK_PRICING)
}

/// Brand choices offered in step one: every priced brand plus "Other".
pub fn brand_options() -> Vec<&'static str> {
    BRAND_PRICING
        .iter()
        .map(|(name, _)| *name)
        .chain(std::iter::once("Other"))
        .collect()
}

/// Overall condition grades, best first, with their value multipliers.
pub const CONDITIONS: &[(&str, f64)] = &[
    ("Like New - No signs of use", 1.0),
    ("Excellent - Minimal signs of use", 0.85),
    ("Very Good - Light scratches, works perfectly", 0.75),
    ("Good - Visible wear but fully functional", 0.6),
    ("Fair - Heavy wear, minor issues", 0.4),
    ("Poor - Major issues, still powers on", 0.25),
    ("For Parts - Not working", 0.1),
];

pub fn condition_multiplier(condition: &str) -> Option<f64> {
    let condition = condition.trim();
    CONDITIONS
        .iter()
        .find(|(label, _)| *label == condition)
        .map(|(_, multiplier)| *multiplier)
}

pub fn condition_options() -> Vec<&'static str> {
    CONDITIONS.iter().map(|(label, _)| *label).collect()
}

pub const RAM_OPTIONS: &[&str] = &["2GB", "4GB", "8GB", "16GB", "32GB", "64GB"];

/// Flat bonus for installed memory. Anything under 4GB earns nothing.
pub fn ram_bonus(ram: &str) -> i64 {
    match parse_leading_number(ram) {
        Some(gb) if gb >= 64.0 => 15_000,
        Some(gb) if gb >= 32.0 => 9_000,
        Some(gb) if gb >= 16.0 => 5_000,
        Some(gb) if gb >= 8.0 => 2_500,
        Some(gb) if gb >= 4.0 => 1_000,
        _ => 0,
    }
}

pub const STORAGE_TYPES: &[(&str, &str)] = &[
    ("hdd", "HDD"),
    ("ssd", "SSD"),
    ("nvme", "NVMe SSD"),
    ("emmc", "eMMC"),
    ("unknown", "Not sure"),
];

pub fn storage_type_bonus(storage_type: &str) -> i64 {
    match storage_type.trim().to_ascii_lowercase().as_str() {
        "ssd" => 2_000,
        "nvme" => 3_500,
        _ => 0,
    }
}

/// Capacity bonuses stack: a 1TB drive earns both the 512 and 1000 bonus.
pub fn storage_size_bonus(storage: &str) -> i64 {
    let Some(size) = parse_leading_number(storage) else {
        return 0;
    };
    let mut bonus = 0;
    if size >= 512.0 {
        bonus += 3_000;
    }
    if size >= 1000.0 {
        bonus += 5_000;
    }
    bonus
}

pub const CHARGER_BONUS: i64 = 500;
pub const ORIGINAL_BOX_BONUS: i64 = 300;

pub const SCREEN_SIZES: &[&str] = &[
    "11.6\"", "13.3\"", "14\"", "15.6\"", "16\"", "17.3\"", "Other",
];

pub const OPERATING_SYSTEMS: &[&str] = &[
    "Windows 11",
    "Windows 10",
    "macOS",
    "Linux",
    "Chrome OS",
    "No OS",
];

pub const SCRATCH_LEVELS: &[&str] = &["None", "Minor", "Moderate", "Heavy"];

pub const DENT_LEVELS: &[&str] = &["None", "Minor", "Moderate", "Severe"];

pub const SCREEN_CONDITIONS: &[&str] = &[
    "Perfect",
    "Minor scratches",
    "Visible scratches",
    "Dead pixels",
    "Lines on display",
    "Cracked",
    "Not working",
];

pub const BATTERY_HEALTH: &[&str] = &[
    "Excellent (90-100%)",
    "Good (80-89%)",
    "Fair (60-79%)",
    "Poor (below 60%)",
    "Needs replacement",
    "Don't know",
];

pub const MIN_YEAR: i32 = 2000;

/// Manufacturing years offered in step one, newest first.
pub fn year_options(current_year: i32) -> Vec<String> {
    (MIN_YEAR..=current_year.max(MIN_YEAR))
        .rev()
        .map(|year| year.to_string())
        .collect()
}

/// Reads the number at the start of free text such as "16GB" or " 512 ".
fn parse_leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_brand_uses_fallback_band() {
        assert_eq!(brand_pricing("Framework"), FALLBACK_PRICING);
        assert_eq!(brand_pricing("Other"), FALLBACK_PRICING);
        assert_eq!(brand_pricing(" dell ").base, 18_000);
    }

    #[test]
    fn ram_bonus_tiers() {
        assert_eq!(ram_bonus("2GB"), 0);
        assert_eq!(ram_bonus("4GB"), 1_000);
        assert_eq!(ram_bonus("16GB"), 5_000);
        assert_eq!(ram_bonus("64GB"), 15_000);
        assert_eq!(ram_bonus(""), 0);
    }

    #[test]
    fn storage_size_bonuses_stack() {
        assert_eq!(storage_size_bonus("256"), 0);
        assert_eq!(storage_size_bonus("512"), 3_000);
        assert_eq!(storage_size_bonus("1000"), 8_000);
        assert_eq!(storage_size_bonus("2048 GB"), 8_000);
        assert_eq!(storage_size_bonus("lots"), 0);
    }

    #[test]
    fn year_options_are_bounded() {
        let years = year_options(2026);
        assert_eq!(years.first().map(String::as_str), Some("2026"));
        assert_eq!(years.last().map(String::as_str), Some("2000"));
        assert_eq!(years.len(), 27);
    }

    #[test]
    fn price_bands_are_multiples_of_500() {
        for (_, pricing) in BRAND_PRICING.iter().chain([("", FALLBACK_PRICING)].iter()) {
            assert_eq!(pricing.min % 500, 0);
            assert_eq!(pricing.max % 500, 0);
            assert!(pricing.min < pricing.max);
        }
    }
}
