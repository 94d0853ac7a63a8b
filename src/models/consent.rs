//! Consent from a parent or teacher to share sleep data.

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::forms::{FieldErrors, FormData, Validator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
    pub adult_first_name: String,
    pub adult_last_name: String,
    pub adult_email: String,
    /// Whether parents or teachers may see the sleep data.
    pub consent: bool,
}

impl Entity for Consent {
    const NAME: &'static str = "consent";
    const PLURAL: &'static str = "consents";
    const LABEL: &'static str = "consent record";
    const FIELDS: &'static [&'static str] = &[
        "adult_first_name",
        "adult_last_name",
        "adult_email",
        "consent",
    ];

    fn validate(form: &FormData) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(form);
        let consent = Consent {
            adult_first_name: v.required_text("adult_first_name"),
            adult_last_name: v.required_text("adult_last_name"),
            adult_email: v.email("adult_email"),
            consent: v.boolean("consent"),
        };
        v.finish(consent)
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("adult_first_name", &self.adult_first_name)
            .with("adult_last_name", &self.adult_last_name)
            .with("adult_email", &self.adult_email)
            .with("consent", self.consent)
    }
}
