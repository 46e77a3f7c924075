use xpedition_shared::{FontSize, Theme};

/// CSS variable values for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub text: &'static str,
    pub card: &'static str,
    pub border: &'static str,
    pub input_bg: &'static str,
    pub input_text: &'static str,
    pub muted: &'static str,
}

pub const DARK: Palette = Palette {
    bg: "#121212",
    text: "#e0e0e0",
    card: "#1e1e1e",
    border: "#444",
    input_bg: "#333",
    input_text: "#e0e0e0",
    muted: "#adb5bd",
};

pub const LIGHT: Palette = Palette {
    bg: "#ffffff",
    text: "#333333",
    card: "#f8f9fa",
    border: "#dee2e6",
    input_bg: "#ffffff",
    input_text: "#333333",
    muted: "#6c757d",
};

pub const FONT_SIZE_VARIABLE: &str = "--font-size-base";

impl Palette {
    pub fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }

    /// Document-level style variables, in the order they are applied.
    pub fn css_variables(&self) -> [(&'static str, &'static str); 7] {
        [
            ("--bg-color", self.bg),
            ("--text-color", self.text),
            ("--card-bg", self.card),
            ("--border-color", self.border),
            ("--input-bg", self.input_bg),
            ("--input-color", self.input_text),
            ("--muted-color", self.muted),
        ]
    }
}

pub fn style_variables(theme: Theme) -> [(&'static str, &'static str); 7] {
    Palette::for_theme(theme).css_variables()
}

/// `(class to remove, class to add)` on the navbar.
pub fn navbar_classes(theme: Theme) -> (&'static str, &'static str) {
    match theme {
        Theme::Dark => ("bg-primary", "bg-dark"),
        Theme::Light => ("bg-dark", "bg-primary"),
    }
}

pub fn font_size_value(size: FontSize) -> &'static str {
    match size {
        FontSize::Small => "0.875rem",
        FontSize::Medium => "1rem",
        FontSize::Large => "1.125rem",
    }
}
