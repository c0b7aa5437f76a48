//! Plain-text rendering of the storefront views.

use std::fmt::Write as _;

use client_core::{
    form::FORM_HINT,
    selector::{STOREFRONT_TAGLINE, STOREFRONT_TITLE},
    DraftOrder,
};
use shared::domain::CakeSize;

const PREVIEW_CHARS: usize = 48;

pub fn banner() -> String {
    format!("{STOREFRONT_TITLE}\n{STOREFRONT_TAGLINE}\n")
}

pub fn size_menu(options: &[CakeSize]) -> String {
    let mut out = String::new();
    for (index, size) in options.iter().enumerate() {
        let _ = writeln!(out, "  {}. {:<16} ({})", index + 1, size.title(), size.key());
    }
    out
}

pub fn order_form(draft: &DraftOrder) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", draft.category.title());
    let _ = writeln!(out, "{FORM_HINT}");

    let photo = match draft.preview() {
        Some(data_uri) if data_uri.chars().count() > PREVIEW_CHARS => {
            let head: String = data_uri.chars().take(PREVIEW_CHARS).collect();
            format!("{head}... ({} chars)", data_uri.chars().count())
        }
        Some(data_uri) => data_uri.to_string(),
        None => "Select or drag a file".to_string(),
    };
    let _ = writeln!(out, "  Photo:       {photo}");
    let _ = writeln!(out, "  Description: {}", draft.description);
    if let Some(name) = &draft.customer_name {
        let _ = writeln!(out, "  Your name:   {name}");
    }
    if let Some(contact) = &draft.contact {
        let _ = writeln!(out, "  Contact:     {contact}");
    }

    let enabled = if draft.can_submit() { "" } else { " (disabled)" };
    let _ = writeln!(out, "[{}]{enabled}", draft.submit_label());
    if let Some(confirmation) = draft.confirmation() {
        let _ = writeln!(out, "{confirmation}");
    }
    out
}
