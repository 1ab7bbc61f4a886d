//! Display surface driven by the controller.
//!
//! # Responsibility
//! - Define what the controller can show: table, notice, form, form error.
//! - Provide an HTML-backed view that keeps the latest rendered state.

use crate::model::contact::Contact;
use crate::render::{render_contacts, RenderedTable};

/// Severity of a transient notice. Both share one message area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Form contents and labels as they should be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub title: &'static str,
    pub submit_label: &'static str,
    /// Cached id while editing; empty in add mode.
    pub contact_id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl FormState {
    pub fn add() -> Self {
        Self {
            title: "Add Contact",
            submit_label: "Save",
            contact_id: String::new(),
            name: String::new(),
            phone: String::new(),
            email: String::new(),
        }
    }

    pub fn edit(contact: &Contact) -> Self {
        Self {
            title: "Edit Contact",
            submit_label: "Update",
            contact_id: contact.id.clone(),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::add()
    }
}

/// Sink for everything the controller displays.
pub trait ContactView {
    /// Shows `display` as the visible rows; `total` is the full store size.
    fn render(&mut self, display: &[Contact], total: usize);
    fn notify(&mut self, notice: Notice);
    fn clear_notice(&mut self);
    fn show_form(&mut self, form: &FormState);
    fn show_form_error(&mut self, message: Option<&str>);
}

/// View that keeps the most recent HTML render and UI state in memory.
#[derive(Debug, Clone, Default)]
pub struct HtmlContactView {
    pub table: RenderedTable,
    pub notice: Option<Notice>,
    pub form: FormState,
    pub form_error: Option<String>,
    pub render_count: usize,
}

impl HtmlContactView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContactView for HtmlContactView {
    fn render(&mut self, display: &[Contact], total: usize) {
        self.table = render_contacts(display, total);
        self.render_count += 1;
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn clear_notice(&mut self) {
        self.notice = None;
    }

    fn show_form(&mut self, form: &FormState) {
        self.form = form.clone();
    }

    fn show_form_error(&mut self, message: Option<&str>) {
        self.form_error = message.map(str::to_string);
    }
}
