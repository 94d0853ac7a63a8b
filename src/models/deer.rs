//! Deer sightings.

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::forms::{FieldErrors, FormData, Validator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deer {
    pub name: String,
    pub description: String,
    pub likes: i64,
}

impl Entity for Deer {
    const NAME: &'static str = "deer";
    const PLURAL: &'static str = "deers";
    const LABEL: &'static str = "Deer";
    const FIELDS: &'static [&'static str] = &["name", "description", "likes"];

    fn validate(form: &FormData) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(form);
        let deer = Deer {
            name: v.required_text("name"),
            description: v.required_text("description"),
            likes: v.integer_in("likes", 0..=i64::MAX, Some("Likes cannot be negative.")),
        };
        v.finish(deer)
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", &self.name)
            .with("description", &self.description)
            .with("likes", self.likes)
    }

    fn defaults() -> FormData {
        FormData::new().with("likes", 0)
    }
}
