//! HTML projection of the contact table.
//!
//! # Invariants
//! - Every user-supplied string is escaped before interpolation.
//! - The count label reflects the unfiltered total, not the visible rows.

use crate::model::contact::Contact;
use std::borrow::Cow;
use std::fmt::Write;

/// Placeholder body used when nothing is visible.
pub const EMPTY_ROW_HTML: &str = r#"<tr><td class="empty" colspan="4">No contacts found</td></tr>"#;

/// Rendered table body and count label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedTable {
    pub body_html: String,
    pub count_label: String,
    /// Number of contact rows (the placeholder does not count).
    pub row_count: usize,
}

/// Escapes `& < > " '` for safe use in HTML text and attribute values.
pub fn escape_html(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Count label for `total` contacts.
pub fn count_label(total: usize) -> String {
    format!("Contacts: {total}")
}

/// Renders `display` as table rows, labelling the count with `total`.
pub fn render_contacts(display: &[Contact], total: usize) -> RenderedTable {
    if display.is_empty() {
        return RenderedTable {
            body_html: EMPTY_ROW_HTML.to_string(),
            count_label: count_label(total),
            row_count: 0,
        };
    }

    let mut body_html = String::new();
    for contact in display {
        let id = escape_html(&contact.id);
        // Writing into a String cannot fail.
        let _ = write!(
            body_html,
            concat!(
                "<tr>",
                "<td>{name}</td>",
                "<td>{phone}</td>",
                "<td>{email}</td>",
                r#"<td class="contact-actions">"#,
                r#"<button class="edit" data-id="{id}">Edit</button>"#,
                r#"<button class="delete" data-id="{id}">Delete</button>"#,
                "</td>",
                "</tr>"
            ),
            name = escape_html(&contact.name),
            phone = escape_html(&contact.phone),
            email = escape_html(&contact.email),
            id = id,
        );
    }

    RenderedTable {
        body_html,
        count_label: count_label(total),
        row_count: display.len(),
    }
}
