//! Meditation sessions.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::{form_time, Entity};
use crate::forms::{FieldErrors, FormData, Validator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meditation {
    pub name: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub takeaway: String,
    pub pride: String,
    /// Link to the recording; uploads are handled elsewhere.
    pub meditation_url: Option<String>,
}

impl Entity for Meditation {
    const NAME: &'static str = "meditation";
    const PLURAL: &'static str = "meditations";
    const LABEL: &'static str = "meditation";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "start_time",
        "end_time",
        "takeaway",
        "pride",
        "meditation_url",
    ];

    fn validate(form: &FormData) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(form);
        let meditation = Meditation {
            name: v.optional_text("name"),
            start_time: v.time("start_time"),
            end_time: v.time("end_time"),
            takeaway: v.required_text("takeaway"),
            pride: v.required_text("pride"),
            meditation_url: v.optional_url("meditation_url"),
        };
        v.finish(meditation)
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("start_time", form_time(self.start_time))
            .with("end_time", form_time(self.end_time))
            .with("takeaway", &self.takeaway)
            .with("pride", &self.pride);
        if let Some(name) = &self.name {
            form.set("name", name);
        }
        if let Some(url) = &self.meditation_url {
            form.set("meditation_url", url);
        }
        form
    }
}
