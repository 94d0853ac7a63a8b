//! Emoji mood logs.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::{form_time, Entity, DAYS_OF_WEEK};
use crate::forms::{FieldErrors, FormData, Validator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    pub emote: String,
    pub location: String,
    pub time: NaiveTime,
    pub day_of_week: String,
}

impl Entity for Emoji {
    const NAME: &'static str = "emoji";
    const PLURAL: &'static str = "emojis";
    const LABEL: &'static str = "emoji";
    const FIELDS: &'static [&'static str] = &["emote", "location", "time", "day_of_week"];

    fn validate(form: &FormData) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(form);
        let emoji = Emoji {
            emote: v.required_text("emote"),
            location: v.required_text("location"),
            time: v.time("time"),
            day_of_week: v.choice("day_of_week", DAYS_OF_WEEK),
        };
        v.finish(emoji)
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("emote", &self.emote)
            .with("location", &self.location)
            .with("time", form_time(self.time))
            .with("day_of_week", &self.day_of_week)
    }
}
