mod common;

use common::{contact, FailingStorage, RecordingStorage};
use phonebook_core::{
    ConfirmGate, ContactController, ContactStorage, ContactStore, FormInput, FormMode,
    HtmlContactView, NoticeKind, PERSIST_WARNING,
};
use std::cell::Cell;
use std::rc::Rc;

fn controller_with<S: ContactStorage>(
    storage: S,
    answer: Rc<Cell<bool>>,
) -> ContactController<S, HtmlContactView, impl ConfirmGate> {
    let store = ContactStore::new(
        storage,
        vec![
            contact("1", "Alice Johnson", "+91 98765 43210", "alice@example.com"),
            contact("2", "Bob Kumar", "+91 98765 11223", "bob@example.net"),
        ],
    );
    let mut controller = ContactController::new(
        store,
        HtmlContactView::new(),
        move |_: &str| answer.get(),
    );
    controller.start();
    controller
}

fn controller() -> ContactController<RecordingStorage, HtmlContactView, impl ConfirmGate> {
    controller_with(RecordingStorage::default(), Rc::new(Cell::new(true)))
}

#[test]
fn start_renders_all_rows_and_count() {
    let controller = controller();
    let view = controller.view();
    assert_eq!(view.table.row_count, 2);
    assert_eq!(view.table.count_label, "Contacts: 2");
    assert_eq!(view.form.title, "Add Contact");
    assert!(view.notice.is_none());
}

#[test]
fn submit_in_add_mode_adds_and_notifies() {
    let mut controller = controller();

    controller.submit(FormInput::new("  Jo ", "12345", ""));

    assert_eq!(controller.store().len(), 3);
    assert_eq!(controller.store().contacts()[0].name, "Jo");
    let view = controller.view();
    assert_eq!(view.table.count_label, "Contacts: 3");
    assert_eq!(view.notice.as_ref().unwrap().text, "Contact added.");
    assert_eq!(view.notice.as_ref().unwrap().kind, NoticeKind::Info);
    assert_eq!(controller.store().storage().saves.get(), 1);
}

#[test]
fn invalid_submit_shows_inline_error_and_keeps_mode() {
    let mut controller = controller();
    controller.edit_clicked("1");

    controller.submit(FormInput::new("A", "12345", ""));

    assert_eq!(
        controller.view().form_error.as_deref(),
        Some("Name should be at least 2 characters.")
    );
    assert_eq!(
        controller.mode(),
        &FormMode::Edit {
            id: "1".to_string()
        }
    );
    assert_eq!(controller.store().find_by_id("1").unwrap().name, "Alice Johnson");
    assert_eq!(controller.store().storage().saves.get(), 0);
}

#[test]
fn invalid_phone_is_rejected_at_form_boundary() {
    let mut controller = controller();

    controller.submit(FormInput::new("Al", "abc", ""));

    assert_eq!(
        controller.view().form_error.as_deref(),
        Some("Phone number appears invalid.")
    );
    assert_eq!(controller.store().len(), 2);
}

#[test]
fn edit_then_submit_updates_and_returns_to_add_mode() {
    let mut controller = controller();

    controller.edit_clicked("2");
    assert_eq!(controller.view().form.title, "Edit Contact");
    assert_eq!(controller.view().form.submit_label, "Update");
    assert_eq!(controller.view().form.name, "Bob Kumar");

    controller.submit(FormInput::new("Robert Kumar", "+91 98765 11223", ""));

    let updated = controller.store().find_by_id("2").unwrap();
    assert_eq!(updated.name, "Robert Kumar");
    assert_eq!(updated.email, "");
    assert_eq!(controller.store().len(), 2);
    assert_eq!(controller.mode(), &FormMode::Add);
    assert_eq!(controller.view().form.title, "Add Contact");
    assert_eq!(controller.view().form.submit_label, "Save");
    assert_eq!(
        controller.view().notice.as_ref().unwrap().text,
        "Contact updated."
    );
}

#[test]
fn update_of_vanished_contact_reports_error_and_resets() {
    let mut controller = controller();
    controller.edit_clicked("2");
    controller.delete_clicked("2");

    controller.submit(FormInput::new("Robert", "12345", ""));

    let notice = controller.view().notice.clone().unwrap();
    assert!(notice.is_error());
    assert_eq!(notice.text, "Update failed: Contact not found");
    assert_eq!(controller.mode(), &FormMode::Add);
    assert_eq!(controller.store().len(), 1);
}

#[test]
fn edit_click_on_unknown_id_is_error_without_mode_change() {
    let mut controller = controller();

    controller.edit_clicked("ghost");

    let notice = controller.view().notice.clone().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Contact not found");
    assert_eq!(controller.mode(), &FormMode::Add);
}

#[test]
fn cancel_returns_to_add_mode_without_mutation() {
    let mut controller = controller();
    controller.edit_clicked("1");

    controller.cancel();

    assert_eq!(controller.mode(), &FormMode::Add);
    assert_eq!(controller.view().form.contact_id, "");
    assert_eq!(controller.store().storage().saves.get(), 0);
}

#[test]
fn declined_delete_is_a_no_op() {
    let answer = Rc::new(Cell::new(false));
    let mut controller = controller_with(RecordingStorage::default(), answer);
    let renders = controller.view().render_count;

    controller.delete_clicked("1");

    assert_eq!(controller.store().len(), 2);
    assert_eq!(controller.view().render_count, renders);
    assert!(controller.view().notice.is_none());
}

#[test]
fn delete_does_not_change_edit_mode() {
    let mut controller = controller();
    controller.edit_clicked("1");

    controller.delete_clicked("2");

    assert_eq!(
        controller.mode(),
        &FormMode::Edit {
            id: "1".to_string()
        }
    );
    assert_eq!(
        controller.view().notice.as_ref().unwrap().text,
        "Contact deleted."
    );
}

#[test]
fn search_narrows_rows_but_count_stays_total() {
    let mut controller = controller();

    controller.search_input("bob");

    assert_eq!(controller.view().table.row_count, 1);
    assert_eq!(controller.view().table.count_label, "Contacts: 2");

    controller.search_input("nobody");
    assert_eq!(controller.view().table.row_count, 0);
    assert!(controller.view().table.body_html.contains("No contacts found"));

    controller.clear_search();
    assert_eq!(controller.query(), "");
    assert_eq!(controller.view().table.row_count, 2);
}

#[test]
fn mutation_rerender_keeps_active_search() {
    let mut controller = controller();
    controller.search_input("alice");

    controller.submit(FormInput::new("Jo", "12345", ""));

    assert_eq!(controller.view().table.row_count, 1);
    assert_eq!(controller.view().table.count_label, "Contacts: 3");
}

#[test]
fn persistence_failure_warns_but_keeps_change_in_memory() {
    let mut controller = controller_with(FailingStorage::default(), Rc::new(Cell::new(true)));

    controller.submit(FormInput::new("Jo", "12345", ""));

    assert_eq!(controller.store().len(), 3);
    let notice = controller.view().notice.clone().unwrap();
    assert!(notice.is_error());
    assert_eq!(notice.text, PERSIST_WARNING);
    assert_eq!(controller.store().storage().attempts.get(), 1);
}

#[test]
fn rendered_rows_escape_user_supplied_markup() {
    let mut controller = controller();

    controller.submit(FormInput::new("<b>Eve</b>", "12345", "\"quoted\""));

    let html = &controller.view().table.body_html;
    assert!(!html.contains("<b>Eve</b>"));
    assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
    assert!(html.contains("&quot;quoted&quot;"));
}
