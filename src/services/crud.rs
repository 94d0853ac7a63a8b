//! Generic create/read/update/delete flow with owner-only mutation.
//!
//! One [`CrudController`] is instantiated per entity type. Operations take
//! the caller explicitly; the controller never reaches for ambient request
//! state. Ownership is checked before any form is looked at, so a
//! non-owner can never cause a write.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::db::Repository;
use crate::forms::{FieldErrors, FormData};
use crate::models::{CurrentUser, Entity, Record};
use crate::{Error, Result};

/// Values and errors for a form that should be shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormState {
    pub values: FormData,
    pub errors: FieldErrors,
}

impl FormState {
    pub fn blank(values: FormData) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
        }
    }

    pub fn rejected(values: FormData, errors: FieldErrors) -> Self {
        Self { values, errors }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of the new and edit flows.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome<E> {
    /// Show the form: blank, pre-populated, or with field errors.
    Render(FormState),
    /// The input was valid and the record was written.
    Saved(Record<E>),
    /// The caller does not own the record; nothing was written.
    Denied,
}

/// Result of the delete flow. Both branches re-list the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome<E> {
    pub deleted: bool,
    pub notice: String,
    pub remaining: Vec<Record<E>>,
}

/// Fails with [`Error::Forbidden`] unless `user` owns `record`.
pub fn ensure_owner<E>(record: &Record<E>, user: &CurrentUser) -> Result<()> {
    if record.is_owned_by(&user.user_id) {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}

pub fn edit_denied_notice<E: Entity>() -> String {
    format!("You can't edit a {} you don't own.", E::LABEL)
}

pub fn delete_denied_notice<E: Entity>() -> String {
    format!("You can't delete a {} you don't own.", E::LABEL)
}

pub fn deleted_notice<E: Entity>() -> String {
    format!("The {} was deleted.", E::LABEL)
}

pub struct CrudController<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for CrudController<E> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<E: Entity> CrudController<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        Self { repo }
    }

    /// All records, in store order.
    pub async fn list(&self, _user: &CurrentUser) -> Result<Vec<Record<E>>> {
        self.repo.list().await
    }

    pub async fn view(&self, _user: &CurrentUser, id: &str) -> Result<Record<E>> {
        self.fetch(id).await
    }

    /// Blank form without input; otherwise validate and insert.
    pub async fn create(
        &self,
        user: &CurrentUser,
        input: Option<&FormData>,
    ) -> Result<FormOutcome<E>> {
        let Some(input) = input else {
            return Ok(FormOutcome::Render(FormState::blank(E::defaults())));
        };

        match E::validate(input) {
            Ok(fields) => {
                let record = self.repo.insert(&user.user_id, &fields).await?;
                info!(collection = E::NAME, id = %record.id, owner = %record.owner, "Record created");
                Ok(FormOutcome::Saved(record))
            }
            Err(errors) => Ok(FormOutcome::Render(FormState::rejected(
                input.clone(),
                errors,
            ))),
        }
    }

    /// Owner-only. Pre-populated form without input; otherwise validate
    /// and replace the content fields.
    pub async fn edit(
        &self,
        user: &CurrentUser,
        id: &str,
        input: Option<&FormData>,
    ) -> Result<FormOutcome<E>> {
        let record = self.fetch(id).await?;

        if let Err(err) = ensure_owner(&record, user) {
            warn!(collection = E::NAME, id = %id, user = %user.user_id, error = %err, "Edit refused");
            return Ok(FormOutcome::Denied);
        }

        let Some(input) = input else {
            return Ok(FormOutcome::Render(FormState::blank(record.fields.to_form())));
        };

        match E::validate(input) {
            Ok(fields) => {
                let updated = self.repo.update(id, &fields).await?;
                info!(collection = E::NAME, id = %id, "Record updated");
                Ok(FormOutcome::Saved(updated))
            }
            Err(errors) => Ok(FormOutcome::Render(FormState::rejected(
                input.clone(),
                errors,
            ))),
        }
    }

    /// Owner-only delete. Either way the remaining records are returned
    /// with a notice for the caller.
    pub async fn delete(&self, user: &CurrentUser, id: &str) -> Result<DeleteOutcome<E>> {
        let record = self.fetch(id).await?;

        let (deleted, notice) = match ensure_owner(&record, user) {
            Ok(()) => {
                self.repo.delete(id).await?;
                info!(collection = E::NAME, id = %id, "Record deleted");
                (true, deleted_notice::<E>())
            }
            Err(err) => {
                warn!(collection = E::NAME, id = %id, user = %user.user_id, error = %err, "Delete refused");
                (false, delete_denied_notice::<E>())
            }
        };

        Ok(DeleteOutcome {
            deleted,
            notice,
            remaining: self.repo.list().await?,
        })
    }

    async fn fetch(&self, id: &str) -> Result<Record<E>> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("{} {}", E::LABEL, id)))
    }
}
