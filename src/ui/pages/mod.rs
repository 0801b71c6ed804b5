pub mod sell;
pub mod settings;
pub mod sign_in;

pub use sell::SellPage;
pub use settings::SettingsPage;
pub use sign_in::SignInPage;
