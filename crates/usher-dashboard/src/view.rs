//! View model for the approval dashboard.
//!
//! The controller only ever mutates these plain structs; `pages` turns them
//! into HTML.

use usher_core::{PendingUser, UserId};

/// Status text shown while users are waiting.
pub const PENDING_MESSAGE: &str = "Users listed below require approval for accessing the database.";

/// Status text shown when nobody is waiting.
pub const NONE_PENDING_MESSAGE: &str = "No users waiting account approval.";

/// Columns of the pending list, as (key, header).
pub const COLUMNS: [(&str, &str); 4] = [
    ("date_joined", "Date joined"),
    ("username", "Username"),
    ("email", "Email"),
    ("email_verified", "Email verified"),
];

/// Visual tone of the status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
}

impl Tone {
    /// Font Awesome icon name.
    pub fn icon(self) -> &'static str {
        match self {
            Tone::Info => "info-circle",
            Tone::Success => "check",
        }
    }

    /// Tailwind colour family.
    pub fn color(self) -> &'static str {
        match self {
            Tone::Info => "blue",
            Tone::Success => "green",
        }
    }
}

/// The status line above the action buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabel {
    pub message: String,
    pub tone: Tone,
}

impl StatusLabel {
    fn pending() -> Self {
        Self {
            message: PENDING_MESSAGE.to_string(),
            tone: Tone::Info,
        }
    }

    fn none_pending() -> Self {
        Self {
            message: NONE_PENDING_MESSAGE.to_string(),
            tone: Tone::Success,
        }
    }
}

/// Button colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Secondary,
    Success,
    Danger,
}

/// The three row actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Approve,
    Remove,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Edit => "edit",
            Action::Approve => "approve",
            Action::Remove => "remove",
        }
    }

    /// Route the button posts to when rendered for `id`.
    pub fn path(self, id: UserId) -> String {
        format!("/users/{id}/{}", self.name())
    }
}

/// One action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub action: Action,
    pub base_label: &'static str,
    pub icon: &'static str,
    pub variant: ButtonVariant,
    /// Current label; carries the selected username when a row is selected.
    pub label: String,
    pub visible: bool,
    pub enabled: bool,
}

impl ActionButton {
    fn new(action: Action, base_label: &'static str, icon: &'static str, variant: ButtonVariant) -> Self {
        Self {
            action,
            base_label,
            icon,
            variant,
            label: base_label.to_string(),
            visible: false,
            enabled: false,
        }
    }

    pub fn edit() -> Self {
        Self::new(Action::Edit, "Edit", "edit", ButtonVariant::Secondary)
    }

    pub fn approve() -> Self {
        Self::new(Action::Approve, "Approve", "check", ButtonVariant::Success)
    }

    pub fn remove() -> Self {
        Self::new(Action::Remove, "Remove", "times", ButtonVariant::Danger)
    }

    /// Suffix the label with the username the action applies to.
    pub(crate) fn tag(&mut self, username: &str) {
        self.label = format!("{} [{}]", self.base_label, username);
    }

    pub(crate) fn reset_label(&mut self) {
        self.label = self.base_label.to_string();
    }
}

/// The pending-user list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub visible: bool,
    pub rows: Vec<PendingUser>,
    /// Currently selected row, if any.
    pub selected: Option<UserId>,
}

impl ListView {
    pub fn contains(&self, id: UserId) -> bool {
        self.rows.iter().any(|row| row.id == id)
    }
}

/// A titled error box shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub messages: Vec<String>,
}

/// Coarse state of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pending users.
    Empty,
    /// Pending users listed, none selected.
    Listed,
    /// A row is selected and actions are enabled per that record.
    RowSelected,
}

/// Everything the page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub status: StatusLabel,
    pub list: ListView,
    pub edit: ActionButton,
    pub approve: ActionButton,
    pub remove: ActionButton,
    pub alert: Option<Alert>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            status: StatusLabel::none_pending(),
            list: ListView::default(),
            edit: ActionButton::edit(),
            approve: ActionButton::approve(),
            remove: ActionButton::remove(),
            alert: None,
        }
    }
}

impl DashboardView {
    pub fn phase(&self) -> Phase {
        if !self.list.visible {
            Phase::Empty
        } else if self.list.selected.is_some() {
            Phase::RowSelected
        } else {
            Phase::Listed
        }
    }

    /// Buttons in layout order.
    pub fn buttons(&self) -> [&ActionButton; 3] {
        [&self.remove, &self.edit, &self.approve]
    }

    fn buttons_mut(&mut self) -> [&mut ActionButton; 3] {
        [&mut self.remove, &mut self.edit, &mut self.approve]
    }

    /// Show `rows`, or the empty state when there are none. Clears the
    /// selection, labels, enablement and any alert.
    pub(crate) fn show_pending(&mut self, rows: Vec<PendingUser>) {
        let any = !rows.is_empty();
        self.status = if any {
            StatusLabel::pending()
        } else {
            StatusLabel::none_pending()
        };
        self.list = ListView {
            visible: any,
            rows,
            selected: None,
        };
        self.alert = None;
        for button in self.buttons_mut() {
            button.reset_label();
            button.visible = any;
            button.enabled = false;
        }
    }

    /// Mark `id` selected and label the buttons with `username`.
    pub(crate) fn show_selection(&mut self, id: UserId, username: &str) {
        self.list.selected = Some(id);
        self.alert = None;
        for button in self.buttons_mut() {
            button.tag(username);
        }
    }
}
