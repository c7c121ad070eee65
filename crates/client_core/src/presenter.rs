use tracing::{debug, error};

use crate::surface::{Element, UiSurface};

pub fn error_text(message: &str) -> String {
    format!("Error: {message}")
}

/// Shows `message` in the error panel. Never fails: surface errors are logged and dropped.
pub fn present<S: UiSurface + ?Sized>(surface: &mut S, message: &str) {
    let text = error_text(message);
    let steps = [
        surface.set_text(Element::ErrorPanel, &text),
        surface.mark_error(Element::ErrorPanel),
        surface.set_visible(Element::ErrorPanel, true),
    ];
    for step in steps {
        if let Err(err) = step {
            debug!("error panel unavailable: {err}");
        }
    }
    error!(error = %message, "analysis request failed");
}
