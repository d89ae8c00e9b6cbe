use chrono::Local;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::models::Identity;

#[derive(Debug, Serialize)]
pub struct SupabasePasswordGrantDto<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize, Getters)]
pub struct SupabaseSessionDto {
    access_token: String,
    token_type: Option<String>,
    expires_in: Option<i64>,
    user: SupabaseUserDto,
}

#[derive(Debug, Deserialize, Getters)]
pub struct SupabaseUserDto {
    id: String,
    email: Option<String>,
}

impl SupabaseSessionDto {
    pub fn to_identity(&self) -> Identity {
        Identity::new(
            self.user.id.clone(),
            self.user.email.clone(),
            Some(self.access_token.clone()),
            Local::now(),
        )
    }
}
