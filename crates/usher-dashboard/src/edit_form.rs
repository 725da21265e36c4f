//! Pluggable edit form for user records.

use usher_core::UserId;

/// Where an opened form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewRegion {
    /// A new browser tab, leaving the dashboard in place.
    #[default]
    NewTab,
    /// Replace the dashboard page.
    Current,
}

/// An opened edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub url: String,
    pub region: ViewRegion,
}

/// An external form able to edit one user record.
pub trait EditForm: Send + Sync {
    /// Open the form for `id`.
    fn open(&self, id: UserId) -> EditTarget;
}

/// Edit form living at a URL; `{id}` in the template is replaced by the user id.
#[derive(Debug, Clone)]
pub struct UrlEditForm {
    template: String,
    region: ViewRegion,
}

impl UrlEditForm {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            region: ViewRegion::default(),
        }
    }

    pub fn with_region(mut self, region: ViewRegion) -> Self {
        self.region = region;
        self
    }
}

impl EditForm for UrlEditForm {
    fn open(&self, id: UserId) -> EditTarget {
        EditTarget {
            url: self.template.replace("{id}", &id.to_string()),
            region: self.region,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_edit_form_substitutes_id() {
        let form = UrlEditForm::new("/admin/auth/user/{id}/change/");
        let target = form.open(UserId(12));
        assert_eq!(target.url, "/admin/auth/user/12/change/");
        assert_eq!(target.region, ViewRegion::NewTab);
    }

    #[test]
    fn test_region_override() {
        let form = UrlEditForm::new("/users/{id}").with_region(ViewRegion::Current);
        assert_eq!(form.open(UserId(3)).region, ViewRegion::Current);
    }
}
