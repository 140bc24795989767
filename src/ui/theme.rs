//! Light/dark class helpers for consistent styling across pages.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            ColorScheme::Light => "🌙 Dark",
            ColorScheme::Dark => "☀️ Light",
        }
    }

    pub fn root_class(self) -> &'static str {
        match self {
            ColorScheme::Light => "modern-app light",
            ColorScheme::Dark => "modern-app dark",
        }
    }
}

// ============================================
// BUTTON STYLES
// ============================================

pub fn btn_primary(scheme: ColorScheme) -> &'static str {
    match scheme {
        ColorScheme::Light => "btn btn-primary",
        ColorScheme::Dark => "btn btn-primary btn-primary--dark",
    }
}

pub fn btn_secondary(scheme: ColorScheme) -> &'static str {
    match scheme {
        ColorScheme::Light => "btn btn-secondary",
        ColorScheme::Dark => "btn btn-secondary btn-secondary--dark",
    }
}

// ============================================
// INPUT STYLES
// ============================================

pub fn input_class(scheme: ColorScheme, invalid: bool) -> &'static str {
    match (scheme, invalid) {
        (ColorScheme::Light, false) => "field-input",
        (ColorScheme::Light, true) => "field-input field-input--invalid",
        (ColorScheme::Dark, false) => "field-input field-input--dark",
        (ColorScheme::Dark, true) => "field-input field-input--dark field-input--invalid",
    }
}

// ============================================
// PANEL / CONTAINER STYLES
// ============================================

pub fn panel(scheme: ColorScheme) -> &'static str {
    match scheme {
        ColorScheme::Light => "panel",
        ColorScheme::Dark => "panel panel--dark",
    }
}

pub fn text_muted(scheme: ColorScheme) -> &'static str {
    match scheme {
        ColorScheme::Light => "text-muted",
        ColorScheme::Dark => "text-muted text-muted--dark",
    }
}
