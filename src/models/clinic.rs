//! Clinic directory entries.

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::forms::{FieldErrors, FormData, Validator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    pub name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub description: String,
}

impl Entity for Clinic {
    const NAME: &'static str = "clinic";
    const PLURAL: &'static str = "clinics";
    const LABEL: &'static str = "clinic";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "street_address",
        "city",
        "state",
        "zipcode",
        "description",
    ];

    fn validate(form: &FormData) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(form);
        let clinic = Clinic {
            name: v.required_text("name"),
            street_address: v.required_text("street_address"),
            city: v.required_text("city"),
            state: v.required_text("state"),
            zipcode: v.required_text("zipcode"),
            description: v.required_text("description"),
        };
        v.finish(clinic)
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", &self.name)
            .with("street_address", &self.street_address)
            .with("city", &self.city)
            .with("state", &self.state)
            .with("zipcode", &self.zipcode)
            .with("description", &self.description)
    }
}
