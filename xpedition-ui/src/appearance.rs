use tracing::debug;
use xpedition_core::theme::{font_size_value, navbar_classes, style_variables, FONT_SIZE_VARIABLE};
use xpedition_shared::{FontSize, Theme};

use crate::dom::Document;

/// Writes the theme's style variables onto the document and swaps the navbar colour class.
pub fn apply_theme(doc: &mut Document, theme: Theme) {
    for (name, value) in style_variables(theme) {
        doc.set_style_var(name, value);
    }

    match doc.first_by_class("navbar") {
        Some(navbar) => {
            let (remove, add) = navbar_classes(theme);
            let navbar = doc.get_mut(navbar);
            navbar.remove_class(remove);
            navbar.add_class(add);
        }
        None => debug!("no navbar on page, skipping navbar theme"),
    }
}

/// Unknown sizes leave the current base font size alone.
pub fn apply_font_size(doc: &mut Document, raw: &str) {
    if let Some(size) = FontSize::from_value(raw) {
        doc.set_style_var(FONT_SIZE_VARIABLE, font_size_value(size));
    }
}

/// Theme named by the body's `data-theme` attribute.
pub fn body_theme(doc: &Document) -> Theme {
    Theme::from_value(doc.get(doc.body()).data("theme").unwrap_or_default())
}
