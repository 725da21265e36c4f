//! HTML building blocks for the dashboard.
//!
//! Plain `format!` templates styled with Tailwind CSS; HTMX swaps the panel
//! fragment after each interaction.

use crate::state::WidgetInfo;

/// Base HTML layout wrapper.
pub fn layout(widget: &WidgetInfo, content: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Usher</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
    <style>
        .htmx-indicator {{ display: none; }}
        .htmx-request .htmx-indicator {{ display: inline-block; }}
    </style>
</head>
<body class="bg-gray-50 min-h-screen">
    {NAV}
    <main class="p-6 lg:p-8">
        <div class="max-w-7xl mx-auto" id="{uid}">
            {content}
        </div>
    </main>
</body>
</html>"##,
        title = html_escape(&widget.title),
        uid = widget.uid,
        NAV = nav_template(widget),
    )
}

fn nav_template(widget: &WidgetInfo) -> String {
    format!(
        r##"<nav class="bg-indigo-600 text-white px-4 py-3 sticky top-0 z-50 shadow-lg">
        <div class="flex items-center gap-4">
            <a href="/" class="font-semibold">Usher</a>
            <a href="/" class="flex items-center gap-2 text-sm bg-indigo-500 px-2 py-1 rounded"
               data-menu="{menu}" data-menu-order="{order}">
                <i class="fas fa-{icon}"></i>
                <span>{title}</span>
            </a>
        </div>
    </nav>"##,
        menu = widget.menu,
        order = widget.menu_order,
        icon = widget.menu_icon,
        title = html_escape(&widget.title),
    )
}

/// Card component.
pub fn card(title: &str, content: &str) -> String {
    format!(
        r##"<div class="bg-white rounded-xl shadow-sm border border-gray-200 overflow-hidden">
            <div class="px-6 py-4 border-b border-gray-200">
                <h3 class="text-lg font-semibold text-gray-900">{title}</h3>
            </div>
            <div class="p-6">
                {content}
            </div>
        </div>"##,
        title = html_escape(title),
    )
}

/// Status line with an icon, tinted by `color`.
pub fn status_label(message: &str, icon: &str, color: &str) -> String {
    format!(
        r##"<div id="status-label" class="flex items-center gap-2 p-4 mb-4 rounded-lg bg-{color}-50 text-{color}-800 border border-{color}-200">
            <i class="fas fa-{icon}"></i>
            <span>{message}</span>
        </div>"##,
        message = html_escape(message),
    )
}

/// Button component. `attrs` is inserted verbatim.
pub fn button(text: &str, icon: &str, variant: &str, enabled: bool, attrs: &str) -> String {
    let (bg, hover, text_color) = match variant {
        "secondary" => ("bg-gray-200", "hover:bg-gray-300", "text-gray-700"),
        "danger" => ("bg-red-600", "hover:bg-red-700", "text-white"),
        "success" => ("bg-green-600", "hover:bg-green-700", "text-white"),
        _ => ("bg-indigo-600", "hover:bg-indigo-700", "text-white"),
    };
    let disabled = if enabled { "" } else { " disabled" };

    format!(
        r##"<button class="w-full {bg} {hover} {text_color} px-4 py-2 rounded-lg font-medium transition-colors disabled:opacity-50 disabled:cursor-not-allowed" {attrs}{disabled}><i class="fas fa-{icon} mr-2"></i>{text}</button>"##,
        text = html_escape(text),
    )
}

/// Badge component.
pub fn badge(text: &str, color: &str) -> String {
    format!(
        r##"<span class="inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium bg-{color}-100 text-{color}-800">{text}</span>"##
    )
}

/// A table row: its extra attributes, whether it is highlighted, and its
/// already-rendered cells.
pub struct TableRow {
    pub attrs: String,
    pub highlighted: bool,
    pub cells: Vec<String>,
}

/// Table component with clickable rows.
pub fn table(id: &str, headers: &[&str], rows: &[TableRow]) -> String {
    let headers_html: String = headers
        .iter()
        .map(|h| format!(r#"<th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{h}</th>"#))
        .collect();

    let rows_html: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .cells
                .iter()
                .map(|cell| format!(r#"<td class="px-6 py-4 whitespace-nowrap text-sm text-gray-900">{cell}</td>"#))
                .collect();
            let background = if row.highlighted { "bg-indigo-50" } else { "hover:bg-gray-50" };
            format!(
                r#"<tr class="{background} cursor-pointer" {attrs}>{cells}</tr>"#,
                attrs = row.attrs,
            )
        })
        .collect();

    format!(
        r##"<div class="overflow-x-auto">
            <table id="{id}" class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50">
                    <tr>{headers_html}</tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-200">
                    {rows_html}
                </tbody>
            </table>
        </div>"##
    )
}

/// Titled list of error messages.
pub fn alert(title: &str, messages: &[String]) -> String {
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", html_escape(m)))
        .collect();

    format!(
        r##"<div id="alert" role="alert" class="mb-4 p-4 rounded-lg bg-red-50 border border-red-200 text-red-800">
            <div class="flex items-center gap-2 font-semibold">
                <i class="fas fa-exclamation-triangle"></i>
                <span>{title}</span>
            </div>
            <ul class="mt-2 ml-6 list-disc text-sm">{items}</ul>
        </div>"##,
        title = html_escape(title),
    )
}

/// Escape text for HTML element and attribute content.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_disabled_button() {
        let html = button("Remove", "times", "danger", false, r#"hx-post="/remove""#);
        assert!(html.contains("bg-red-600"));
        assert!(html.contains(r#"hx-post="/remove" disabled>"#));

        let html = button("Remove", "times", "danger", true, r#"hx-post="/remove""#);
        assert!(!html.contains(" disabled>"));
    }

    #[test]
    fn test_card_escapes_title() {
        let html = card("<Pending>", "<table></table>");
        assert!(html.contains("&lt;Pending&gt;"));
        assert!(html.contains("<table></table>"));
    }

    #[test]
    fn test_alert_escapes_messages() {
        let html = alert("Can not approve user 'x'", &["<script>".to_string()]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Can not approve user &#x27;x&#x27;"));
    }
}
