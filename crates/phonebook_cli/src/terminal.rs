//! Terminal implementations of the view and confirmation seams.

use phonebook_core::{ConfirmGate, Contact, ContactView, FormState, Notice, NoticeKind};
use std::borrow::Cow;
use std::io::{self, BufRead, Write};

/// Replaces control characters so stored text cannot drive the terminal.
fn printable(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|ch| if ch.is_control() { '\u{FFFD}' } else { ch })
            .collect(),
    )
}

/// Plain-text view writing to stdout.
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    // A broken stdout has nowhere to report to; drop the line.
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write> ContactView for TerminalView<W> {
    fn render(&mut self, display: &[Contact], total: usize) {
        if display.is_empty() {
            self.line("  No contacts found");
        } else {
            for contact in display {
                let line = format!(
                    "  [{}] {} | {} | {}",
                    printable(&contact.id),
                    printable(&contact.name),
                    printable(&contact.phone),
                    printable(&contact.email)
                );
                self.line(&line);
            }
        }
        self.line(&format!("Contacts: {total}"));
    }

    fn notify(&mut self, notice: Notice) {
        let prefix = match notice.kind {
            NoticeKind::Info => "ok",
            NoticeKind::Error => "error",
        };
        self.line(&format!("{prefix}: {}", notice.text));
    }

    fn clear_notice(&mut self) {}

    fn show_form(&mut self, form: &FormState) {
        if form.contact_id.is_empty() {
            return;
        }
        let line = format!(
            "{} [{}]: {} | {} | {}  (use `submit` to {}, `cancel` to abort)",
            form.title,
            printable(&form.contact_id),
            printable(&form.name),
            printable(&form.phone),
            printable(&form.email),
            form.submit_label.to_lowercase()
        );
        self.line(&line);
    }

    fn show_form_error(&mut self, message: Option<&str>) {
        if let Some(message) = message {
            self.line(&format!("invalid: {message}"));
        }
    }
}

/// Reads a y/N answer from stdin.
pub struct StdinConfirm;

impl ConfirmGate for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_yes(&answer),
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
