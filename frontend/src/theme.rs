//! Colour palettes applied as CSS custom properties on `<html>`.
//!
//! Light is the default; `?theme=dark` in the page URL switches to dark.

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, UrlSearchParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub card: &'static str,
    pub ink: &'static str,
    pub sub: &'static str,
    pub brand: &'static str,
    pub brand2: &'static str,
    pub line: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
}

const LIGHT: Palette = Palette {
    bg: "#FFFFFF",
    card: "#FFFFFF",
    ink: "#10231D",
    sub: "#52776A",
    brand: "#2E6A4F",
    brand2: "#6FA083",
    line: "#DCE9E2",
    muted: "#F4F8F6",
    accent: "#2E6A4F",
};

const DARK: Palette = Palette {
    bg: "#062426",
    card: "#0E1614",
    ink: "#FDFDFD",
    sub: "#98AAA2",
    brand: "#4B735B",
    brand2: "#98AAA2",
    line: "#34554B",
    muted: "#658972",
    accent: "#B3C5B9",
};

impl Theme {
    /// Maps the `theme` query parameter; anything but `dark` is light.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }
}

impl Palette {
    /// `(custom property, value)` pairs.
    pub fn vars(&self) -> [(&'static str, &'static str); 9] {
        [
            ("--bg", self.bg),
            ("--card", self.card),
            ("--ink", self.ink),
            ("--sub", self.sub),
            ("--brand", self.brand),
            ("--brand2", self.brand2),
            ("--line", self.line),
            ("--muted", self.muted),
            ("--accent", self.accent),
        ]
    }
}

/// Reads `?theme=` from the current location and applies the palette.
pub fn apply_from_query() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let param = window
        .location()
        .search()
        .ok()
        .and_then(|search| UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("theme"));
    let theme = Theme::from_param(param.as_deref());

    let root = window
        .document()
        .and_then(|d| d.document_element())
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    if let Some(root) = root {
        let style = root.style();
        for (name, value) in theme.palette().vars() {
            style.set_property(name, value).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_param() {
        assert_eq!(Theme::from_param(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_param(Some("light")), Theme::Light);
        assert_eq!(Theme::from_param(Some("DARK")), Theme::Light);
        assert_eq!(Theme::from_param(None), Theme::Light);
    }

    #[test]
    fn test_palette_vars_cover_every_property() {
        let names: Vec<&str> = Theme::Dark.palette().vars().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec!["--bg", "--card", "--ink", "--sub", "--brand", "--brand2", "--line", "--muted", "--accent"]
        );
        assert_eq!(Theme::Light.palette().brand, "#2E6A4F");
    }
}
