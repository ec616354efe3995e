use log::error;
use rfd::{MessageButtons, MessageDialog, MessageLevel};

/// Blocking error box shown before the process exits.
pub fn show_fatal(title: &str, message: &str) {
    error!("{message}");
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
