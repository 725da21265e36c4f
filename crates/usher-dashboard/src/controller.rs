//! The approval dashboard controller.
//!
//! Keeps a `DashboardView` in sync with the pending users of a `UserStore`
//! and runs the three row actions against the selected record:
//!
//! ```text
//! Empty <-> Listed -> RowSelected -> edit (no change here)
//!                                 -> approve -> Empty | Listed
//!                                 -> remove  -> Empty | Listed
//! ```
//!
//! Every operation runs to completion before the next one starts; callers
//! hold the controller behind a mutex.

use crate::edit_form::{EditForm, EditTarget};
use crate::error::DashboardError;
use crate::view::{Alert, DashboardView};
use std::sync::Arc;
use usher_core::{StoreError, UserId, UserRecord, UserStore, ValidationErrors};

/// Result of checking whether a record may be activated.
#[derive(Debug)]
pub enum Activation {
    /// The activated record passes validation and can be saved.
    Valid(UserRecord),
    /// The activated record fails validation.
    Invalid(ValidationErrors),
}

/// Result of an approve action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApproveOutcome {
    /// The user was activated and the list repopulated.
    Approved { id: UserId, username: String },
    /// Validation failed; the alert is also on the view.
    Rejected(Alert),
}

/// Controller behind the approval dashboard.
pub struct Dashboard {
    store: Arc<dyn UserStore>,
    edit_form: Option<Arc<dyn EditForm>>,
    view: DashboardView,
}

impl Dashboard {
    /// Create a controller. The view stays empty until `populate` runs.
    pub fn new(store: Arc<dyn UserStore>, edit_form: Option<Arc<dyn EditForm>>) -> Self {
        Self {
            store,
            edit_form,
            view: DashboardView::default(),
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// The selected row, if any.
    pub fn selected(&self) -> Option<UserId> {
        self.view.list.selected
    }

    pub fn has_edit_form(&self) -> bool {
        self.edit_form.is_some()
    }

    /// Reload the pending list and reset selection.
    pub async fn populate(&mut self) -> Result<(), DashboardError> {
        let pending = self.store.list_pending().await?;
        tracing::debug!(count = pending.len(), "Populated pending users");
        self.view.show_pending(pending);
        Ok(())
    }

    /// Select a row and enable the actions that apply to it.
    ///
    /// A record that would fail validation once active only leaves approve
    /// disabled; nothing is reported.
    pub async fn select(&mut self, id: UserId) -> Result<(), DashboardError> {
        if !self.view.list.contains(id) {
            return Err(DashboardError::NotFound(format!("pending user {id}")));
        }
        let user = self.store.get(id).await?;
        if !user.is_pending() {
            return Err(DashboardError::NotFound(format!("pending user {id}")));
        }
        let approvable = matches!(self.check_activation(&user).await?, Activation::Valid(_));

        self.view.show_selection(id, &user.username);
        self.view.remove.enabled = true;
        self.view.edit.enabled = self.edit_form.is_some();
        self.view.approve.enabled = approvable;

        tracing::debug!(user_id = %id, username = %user.username, approvable, "Selected user");
        Ok(())
    }

    /// Open the edit form for `id`, which must be the selected user.
    pub fn edit(&self, id: UserId) -> Result<EditTarget, DashboardError> {
        self.ensure_selected(id)?;
        let form = self.edit_form.as_ref().ok_or(DashboardError::EditUnavailable)?;
        let target = form.open(id);
        tracing::info!(user_id = %id, url = %target.url, "Opening edit form");
        Ok(target)
    }

    /// Activate `id`, the selected user, if it passes validation.
    pub async fn approve(&mut self, id: UserId) -> Result<ApproveOutcome, DashboardError> {
        self.ensure_selected(id)?;
        let user = self.store.get(id).await?;

        match self.check_activation(&user).await? {
            Activation::Invalid(errors) => {
                tracing::warn!(
                    user_id = %id,
                    username = %user.username,
                    errors = %errors,
                    "Approval rejected by validation"
                );
                let alert = Alert {
                    title: format!("Can not approve user '{}'", user.username),
                    messages: errors.messages(),
                };
                self.view.alert = Some(alert.clone());
                Ok(ApproveOutcome::Rejected(alert))
            }
            Activation::Valid(activated) => {
                self.store.save(&activated).await?;
                tracing::info!(user_id = %id, username = %activated.username, "Approved user");
                self.populate().await?;
                Ok(ApproveOutcome::Approved {
                    id,
                    username: activated.username,
                })
            }
        }
    }

    /// Delete `id`, the selected user.
    pub async fn remove(&mut self, id: UserId) -> Result<(), DashboardError> {
        self.ensure_selected(id)?;
        self.store.delete(id).await?;
        tracing::info!(user_id = %id, "Removed user");
        self.populate().await
    }

    /// Actions carry the id their button was rendered for; it must still be
    /// the selected row.
    fn ensure_selected(&self, id: UserId) -> Result<(), DashboardError> {
        match self.selected() {
            None => Err(DashboardError::NoSelection),
            Some(selected) if selected != id => Err(DashboardError::SelectionChanged(id)),
            Some(_) => Ok(()),
        }
    }

    /// The single validation path used both when selecting (silently) and
    /// when approving (reported).
    pub async fn check_activation(&self, user: &UserRecord) -> Result<Activation, DashboardError> {
        let activated = user.activated();
        match self.store.validate(&activated).await {
            Ok(()) => Ok(Activation::Valid(activated)),
            Err(StoreError::Validation(errors)) => Ok(Activation::Invalid(errors)),
            Err(err) => Err(err.into()),
        }
    }
}
