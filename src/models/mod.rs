//! Data models for Logbook.
//!
//! Every user-managed record type implements [`Entity`]; the stored form
//! of any entity is a [`Record`], which adds the system-assigned fields.

mod blog;
mod clinic;
mod consent;
mod deer;
mod emoji;
mod meditation;
mod profile;
mod sleep;
mod user;

pub use blog::*;
pub use clinic::*;
pub use consent::*;
pub use deer::*;
pub use emoji::*;
pub use meditation::*;
pub use profile::*;
pub use sleep::*;
pub use user::*;

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::forms::{FieldErrors, FormData};

/// Generate a new UUID
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// A user-managed record type.
///
/// The struct holds only the user-editable fields. `id`, `owner` and
/// `modified_at` live on the surrounding [`Record`] and can never be set
/// from a form.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Path segment and collection name, e.g. `deer`.
    const NAME: &'static str;
    /// Plural used for the list route and view, e.g. `deers`.
    const PLURAL: &'static str;
    /// Human label used in notices, e.g. `Deer`.
    const LABEL: &'static str;
    /// Form field names in display order.
    const FIELDS: &'static [&'static str];

    /// Parse and check submitted form values.
    fn validate(form: &FormData) -> Result<Self, FieldErrors>;

    /// Current values as form input, for pre-populating an edit form.
    fn to_form(&self) -> FormData;

    /// Values shown on a blank "new" form.
    fn defaults() -> FormData {
        FormData::new()
    }
}

/// A persisted entity with its system-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<E> {
    pub id: String,
    /// Id of the identity that created the record. Written once, at insert.
    pub owner: String,
    pub modified_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: E,
}

impl<E> Record<E> {
    /// Strict id equality; there is no role-based override.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner == user_id
    }
}

/// Weekday names accepted by day-of-week fields.
pub const DAYS_OF_WEEK: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time as form text: `HH:MM`, or `HH:MM:SS` when seconds were stored.
pub(crate) fn form_time(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}
