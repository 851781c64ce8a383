//! Native dialog helpers
//!
//! Blocking confirmation dialogs via the platform's message box. The
//! caller-supplied action runs only on an affirmative answer; declining is
//! a silent no-op.

/// Ask a yes/no question with a native dialog. Returns true on "Yes".
pub fn confirm(title: &str, message: &str) -> bool {
    let answer = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::YesNo)
        .show();
    matches!(answer, rfd::MessageDialogResult::Yes)
}

/// Run `action` only if the user confirms.
pub fn confirm_then<F: FnOnce()>(title: &str, message: &str, action: F) {
    if confirm(title, message) {
        action();
    }
}
