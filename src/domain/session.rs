use serde::{Deserialize, Serialize};

/// Account record of the signed-in customer, as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Who is using the app right now. Handed to the wizard explicitly rather
/// than read from a global.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<CurrentUser>,
}

impl Session {
    pub fn signed_in(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }
}
