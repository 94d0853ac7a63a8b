//! User profiles.

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::forms::{FieldErrors, FormData, Validator};

pub const ROLES: &[&str] = &["Teacher", "Student"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

impl Entity for Profile {
    const NAME: &'static str = "profile";
    const PLURAL: &'static str = "profiles";
    const LABEL: &'static str = "profile";
    const FIELDS: &'static [&'static str] = &["role", "first_name", "last_name"];

    fn validate(form: &FormData) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(form);
        let profile = Profile {
            role: v.choice("role", ROLES),
            first_name: v.required_text("first_name"),
            last_name: v.required_text("last_name"),
        };
        v.finish(profile)
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("role", &self.role)
            .with("first_name", &self.first_name)
            .with("last_name", &self.last_name)
    }

    fn defaults() -> FormData {
        FormData::new().with("role", "Student")
    }
}
