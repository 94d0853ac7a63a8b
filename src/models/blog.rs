//! Blog posts.

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::forms::{FieldErrors, FormData, Validator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub subject: String,
    pub content: String,
    pub tag: String,
    pub rating: i64,
}

impl Entity for Blog {
    const NAME: &'static str = "blog";
    const PLURAL: &'static str = "blogs";
    const LABEL: &'static str = "blog";
    const FIELDS: &'static [&'static str] = &["subject", "content", "tag", "rating"];

    fn validate(form: &FormData) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(form);
        let blog = Blog {
            subject: v.required_text("subject"),
            content: v.required_text("content"),
            tag: v.required_text("tag"),
            rating: v.integer("rating"),
        };
        v.finish(blog)
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("subject", &self.subject)
            .with("content", &self.content)
            .with("tag", &self.tag)
            .with("rating", self.rating)
    }
}
