use chrono::{DateTime, Local};
use derive_getters::Getters;
use derive_new::new;

/// The signed-in user. Valuation only runs while one is present.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct Identity {
    user_id: String,
    email: Option<String>,
    access_token: Option<String>,
    signed_in_at: DateTime<Local>,
}

impl Identity {
    pub fn same_user(&self, other: &Identity) -> bool {
        self.user_id == other.user_id
    }
}

#[derive(Clone, Getters, new)]
pub struct Credentials {
    login: String,
    password: Option<String>,
}
