//! Rendering of the dashboard view model.

use crate::edit_form::EditTarget;
use crate::state::WidgetInfo;
use crate::templates::{self, TableRow, badge, html_escape, layout, status_label};
use crate::view::{ActionButton, ButtonVariant, COLUMNS, DashboardView, ListView};
use usher_core::UserId;

/// DOM id of the swappable panel.
pub const PANEL_ID: &str = "dashboard-panel";

/// Full page: chrome plus the panel.
pub fn dashboard_page(view: &DashboardView, widget: &WidgetInfo) -> String {
    let content = format!(
        r##"<div class="mb-6">
            <h1 class="text-2xl font-bold text-gray-900">{title}</h1>
            <p class="text-gray-600">Review accounts waiting for access</p>
        </div>
        {panel}"##,
        title = html_escape(&widget.title),
        panel = dashboard_panel(view),
    );

    layout(widget, &content)
}

/// The fragment HTMX swaps after every interaction: alert, status label,
/// action buttons, then the list.
pub fn dashboard_panel(view: &DashboardView) -> String {
    let alert = view
        .alert
        .as_ref()
        .map(|a| templates::alert(&a.title, &a.messages))
        .unwrap_or_default();

    let status = status_label(&view.status.message, view.status.tone.icon(), view.status.tone.color());

    let buttons: String = view
        .buttons()
        .iter()
        .filter(|b| b.visible)
        .map(|b| format!(r#"<div class="flex-1">{}</div>"#, action_button(b, view.list.selected)))
        .collect();
    let actions = if buttons.is_empty() {
        String::new()
    } else {
        format!(r#"<div id="actions" class="flex gap-2 mb-4">{buttons}</div>"#)
    };

    let list = if view.list.visible {
        templates::card("Pending users", &pending_table(&view.list))
    } else {
        String::new()
    };

    format!(
        r##"<div id="{PANEL_ID}">
            {alert}
            {status}
            {actions}
            {list}
        </div>"##
    )
}

/// Panel plus a script opening the edit form in a new tab.
pub fn edit_opened_fragment(view: &DashboardView, target: &EditTarget) -> String {
    let url = serde_json::to_string(&target.url).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "{}<script>window.open({}, '_blank');</script>",
        dashboard_panel(view),
        url.replace('<', "\\u003c"),
    )
}

/// A button posts to the row it is labelled for; with no selection it has
/// nowhere to post.
fn action_button(button: &ActionButton, selected: Option<UserId>) -> String {
    let variant = match button.variant {
        ButtonVariant::Secondary => "secondary",
        ButtonVariant::Success => "success",
        ButtonVariant::Danger => "danger",
    };
    let name = button.action.name();
    let attrs = match selected {
        Some(id) => format!(
            r##"id="{name}-btn" hx-post="{path}" hx-target="#{PANEL_ID}" hx-swap="outerHTML""##,
            path = button.action.path(id),
        ),
        None => format!(r#"id="{name}-btn""#),
    };
    templates::button(&button.label, button.icon, variant, button.enabled, &attrs)
}

fn pending_table(list: &ListView) -> String {
    let headers: Vec<&str> = COLUMNS.iter().map(|(_, header)| *header).collect();
    let rows: Vec<TableRow> = list
        .rows
        .iter()
        .map(|user| TableRow {
            attrs: format!(
                r##"data-user-id="{id}" hx-post="/users/{id}/select" hx-target="#{PANEL_ID}" hx-swap="outerHTML""##,
                id = user.id,
            ),
            highlighted: list.selected == Some(user.id),
            cells: vec![
                user.date_joined.format("%Y-%m-%d %H:%M").to_string(),
                html_escape(&user.username),
                html_escape(&user.email),
                if user.email_verified {
                    badge("Yes", "green")
                } else {
                    badge("No", "gray")
                },
            ],
        })
        .collect();

    templates::table("pending-users", &headers, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_form::ViewRegion;
    use crate::view::{Alert, NONE_PENDING_MESSAGE, PENDING_MESSAGE};
    use chrono::{TimeZone, Utc};
    use usher_core::PendingUser;

    fn listed_view() -> DashboardView {
        let mut view = DashboardView::default();
        view.show_pending(vec![PendingUser {
            id: UserId(3),
            date_joined: Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 0).unwrap(),
            username: "<alice>".to_string(),
            email: "alice@example.com".to_string(),
            email_verified: true,
        }]);
        view
    }

    #[test]
    fn test_empty_panel_has_no_list_or_buttons() {
        let mut view = DashboardView::default();
        view.show_pending(Vec::new());
        let html = dashboard_panel(&view);
        assert!(html.contains(NONE_PENDING_MESSAGE));
        assert!(!html.contains("pending-users"));
        assert!(!html.contains("<button"));
    }

    #[test]
    fn test_listed_panel() {
        let html = dashboard_panel(&listed_view());
        assert!(html.contains(PENDING_MESSAGE));
        assert!(html.contains("Date joined"));
        assert!(html.contains("Email verified"));
        assert!(html.contains("2024-05-06 07:08"));
        assert!(html.contains("&lt;alice&gt;"));
        assert!(!html.contains("<alice>"));
        assert!(html.contains(r#"hx-post="/users/3/select""#));
        assert_eq!(html.matches(" disabled>").count(), 3);
    }

    #[test]
    fn test_buttons_follow_layout_order() {
        let html = dashboard_panel(&listed_view());
        let remove = html.find("remove-btn").unwrap();
        let edit = html.find("edit-btn").unwrap();
        let approve = html.find("approve-btn").unwrap();
        assert!(remove < edit && edit < approve);
    }

    #[test]
    fn test_buttons_post_to_the_selected_row() {
        let mut view = listed_view();
        let html = dashboard_panel(&view);
        assert!(!html.contains("/users/3/remove"));

        view.show_selection(UserId(3), "alice");
        let html = dashboard_panel(&view);
        assert!(html.contains(r#"hx-post="/users/3/remove""#));
        assert!(html.contains(r#"hx-post="/users/3/approve""#));
        assert!(html.contains(r#"hx-post="/users/3/edit""#));
    }

    #[test]
    fn test_alert_rendered_first() {
        let mut view = listed_view();
        view.alert = Some(Alert {
            title: "Can not approve user 'bob'".to_string(),
            messages: vec!["Email address: enter a valid email address.".to_string()],
        });
        let html = dashboard_panel(&view);
        assert!(html.find("role=\"alert\"").unwrap() < html.find("status-label").unwrap());
        assert!(html.contains("enter a valid email address."));
    }

    #[test]
    fn test_page_wraps_panel() {
        let html = dashboard_page(&listed_view(), &WidgetInfo::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Requests - Usher</title>"));
        assert!(html.contains(r#"id="dashboard-app""#));
        assert!(html.contains(r#"id="dashboard-panel""#));
    }

    #[test]
    fn test_edit_fragment_opens_new_tab() {
        let target = EditTarget {
            url: "/admin/users/3/edit".to_string(),
            region: ViewRegion::NewTab,
        };
        let html = edit_opened_fragment(&listed_view(), &target);
        assert!(html.ends_with(r#"<script>window.open("/admin/users/3/edit", '_blank');</script>"#));
    }
}
