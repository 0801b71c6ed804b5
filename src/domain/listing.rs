use serde::{Deserialize, Serialize};

/// Working data of the sell form. Every text field starts empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceListing {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub condition: String,

    pub processor: String,
    pub ram: String,
    pub storage: String,
    pub storage_type: String,
    pub screen_size: String,
    pub graphics: String,
    pub operating_system: String,

    pub scratches: String,
    pub dents: String,
    pub screen_condition: String,
    pub battery_health: String,
    pub functional_issues: String,

    pub charger_included: bool,
    pub original_box: bool,

    pub name: String,
    pub email: String,
    pub phone: String,
    pub pincode: String,
    pub city: String,
    pub address: String,
}

impl Default for DeviceListing {
    fn default() -> Self {
        Self {
            brand: String::new(),
            model: String::new(),
            year: String::new(),
            condition: String::new(),
            processor: String::new(),
            ram: String::new(),
            storage: String::new(),
            storage_type: String::new(),
            screen_size: String::new(),
            graphics: String::new(),
            operating_system: String::new(),
            scratches: String::new(),
            dents: String::new(),
            screen_condition: String::new(),
            battery_health: String::new(),
            functional_issues: String::new(),
            charger_included: true,
            original_box: false,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            pincode: String::new(),
            city: String::new(),
            address: String::new(),
        }
    }
}

/// Addresses one text field of a [`DeviceListing`] so forms and validation
/// can work over fields generically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListingField {
    Brand,
    Model,
    Year,
    Condition,
    Processor,
    Ram,
    Storage,
    StorageType,
    ScreenSize,
    Graphics,
    OperatingSystem,
    Scratches,
    Dents,
    ScreenCondition,
    BatteryHealth,
    FunctionalIssues,
    Name,
    Email,
    Phone,
    Pincode,
    City,
    Address,
}

impl ListingField {
    pub fn label(&self) -> &'static str {
        match self {
            ListingField::Brand => "Brand",
            ListingField::Model => "Model",
            ListingField::Year => "Year of purchase",
            ListingField::Condition => "Overall condition",
            ListingField::Processor => "Processor",
            ListingField::Ram => "RAM",
            ListingField::Storage => "Storage size (GB)",
            ListingField::StorageType => "Storage type",
            ListingField::ScreenSize => "Screen size",
            ListingField::Graphics => "Graphics card",
            ListingField::OperatingSystem => "Operating system",
            ListingField::Scratches => "Scratches",
            ListingField::Dents => "Dents",
            ListingField::ScreenCondition => "Screen condition",
            ListingField::BatteryHealth => "Battery health",
            ListingField::FunctionalIssues => "Functional issues",
            ListingField::Name => "Full name",
            ListingField::Email => "Email",
            ListingField::Phone => "Phone",
            ListingField::Pincode => "Pincode",
            ListingField::City => "City",
            ListingField::Address => "Pickup address",
        }
    }
}

impl DeviceListing {
    pub fn get(&self, field: ListingField) -> &str {
        match field {
            ListingField::Brand => &self.brand,
            ListingField::Model => &self.model,
            ListingField::Year => &self.year,
            ListingField::Condition => &self.condition,
            ListingField::Processor => &self.processor,
            ListingField::Ram => &self.ram,
            ListingField::Storage => &self.storage,
            ListingField::StorageType => &self.storage_type,
            ListingField::ScreenSize => &self.screen_size,
            ListingField::Graphics => &self.graphics,
            ListingField::OperatingSystem => &self.operating_system,
            ListingField::Scratches => &self.scratches,
            ListingField::Dents => &self.dents,
            ListingField::ScreenCondition => &self.screen_condition,
            ListingField::BatteryHealth => &self.battery_health,
            ListingField::FunctionalIssues => &self.functional_issues,
            ListingField::Name => &self.name,
            ListingField::Email => &self.email,
            ListingField::Phone => &self.phone,
            ListingField::Pincode => &self.pincode,
            ListingField::City => &self.city,
            ListingField::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: ListingField, value: impl Into<String>) {
        let slot = match field {
            ListingField::Brand => &mut self.brand,
            ListingField::Model => &mut self.model,
            ListingField::Year => &mut self.year,
            ListingField::Condition => &mut self.condition,
            ListingField::Processor => &mut self.processor,
            ListingField::Ram => &mut self.ram,
            ListingField::Storage => &mut self.storage,
            ListingField::StorageType => &mut self.storage_type,
            ListingField::ScreenSize => &mut self.screen_size,
            ListingField::Graphics => &mut self.graphics,
            ListingField::OperatingSystem => &mut self.operating_system,
            ListingField::Scratches => &mut self.scratches,
            ListingField::Dents => &mut self.dents,
            ListingField::ScreenCondition => &mut self.screen_condition,
            ListingField::BatteryHealth => &mut self.battery_health,
            ListingField::FunctionalIssues => &mut self.functional_issues,
            ListingField::Name => &mut self.name,
            ListingField::Email => &mut self.email,
            ListingField::Phone => &mut self.phone,
            ListingField::Pincode => &mut self.pincode,
            ListingField::City => &mut self.city,
            ListingField::Address => &mut self.address,
        };
        *slot = value.into();
    }

    /// A field counts as filled once it has non-whitespace content.
    pub fn is_filled(&self, field: ListingField) -> bool {
        !self.get(field).trim().is_empty()
    }

    /// Copies contact fields the user left blank from their account profile.
    pub fn prefill_contact(&mut self, name: &str, email: &str, phone: &str) {
        for (field, value) in [
            (ListingField::Name, name),
            (ListingField::Email, email),
            (ListingField::Phone, phone),
        ] {
            if !self.is_filled(field) && !value.trim().is_empty() {
                self.set(field, value.trim());
            }
        }
    }
}

/// Local photo attached to the listing for preview purposes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePreview {
    pub name: String,
    pub path: String,
    pub data_uri: String,
}

pub const MAX_IMAGE_PREVIEWS: usize = 6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_charger_and_drop_box() {
        let listing = DeviceListing::default();
        assert!(listing.charger_included);
        assert!(!listing.original_box);
        assert!(listing.brand.is_empty());
    }

    #[test]
    fn whitespace_is_not_filled() {
        let mut listing = DeviceListing::default();
        listing.set(ListingField::Model, "   ");
        assert!(!listing.is_filled(ListingField::Model));
        listing.set(ListingField::Model, " XPS 13 ");
        assert!(listing.is_filled(ListingField::Model));
        assert_eq!(listing.get(ListingField::Model), " XPS 13 ");
    }

    #[test]
    fn prefill_keeps_user_input() {
        let mut listing = DeviceListing::default();
        listing.set(ListingField::Name, "Typed Name");
        listing.prefill_contact("Account Name", "a@example.com", "");
        assert_eq!(listing.name, "Typed Name");
        assert_eq!(listing.email, "a@example.com");
        assert!(listing.phone.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let listing = DeviceListing {
            storage_type: "ssd".into(),
            ..DeviceListing::default()
        };
        let json = serde_json::to_value(&listing).expect("serialize listing");
        assert_eq!(json["storageType"], "ssd");
        assert_eq!(json["chargerIncluded"], true);
        assert_eq!(json["originalBox"], false);
    }
}
