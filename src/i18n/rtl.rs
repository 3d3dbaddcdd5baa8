//! Right-to-left layout helpers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::models::{Locale, TextDirection};

pub fn text_direction(locale: Locale) -> TextDirection {
    if locale.is_rtl() {
        TextDirection::Rtl
    } else {
        TextDirection::Ltr
    }
}

// A directional prefix starts the class, follows a variant (`md:`) or a
// negative sign (`-ml-2`).
static DIRECTIONAL_PREFIX: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(^|[\s:-])(ml|mr|pl|pr|left|right)-")
        .map_err(|e| log::error!("Directional class pattern is invalid: {}", e))
        .ok()
});

fn mirrored(prefix: &str) -> &str {
    match prefix {
        "ml" => "mr",
        "mr" => "ml",
        "pl" => "pr",
        "pr" => "pl",
        "left" => "right",
        "right" => "left",
        other => other,
    }
}

/// Mirrors horizontal spacing and position classes for RTL locales.
///
/// Every class is swapped at most once, so `ml-2 mr-4` becomes `mr-2 ml-4`.
pub fn spacing_class(locale: Locale, classes: &str) -> String {
    if !locale.is_rtl() {
        return classes.to_string();
    }

    match DIRECTIONAL_PREFIX.as_ref() {
        Some(re) => re
            .replace_all(classes, |caps: &Captures| {
                format!("{}{}-", &caps[1], mirrored(&caps[2]))
            })
            .into_owned(),
        None => classes.to_string(),
    }
}

pub fn flex_direction(locale: Locale, direction: &str) -> String {
    if direction == "row" && locale.is_rtl() {
        "row-reverse".to_string()
    } else {
        direction.to_string()
    }
}

pub fn text_align(locale: Locale, align: &str) -> String {
    match (align, locale.is_rtl()) {
        ("left", true) => "right".to_string(),
        ("right", true) => "left".to_string(),
        _ => align.to_string(),
    }
}

/// Classes a layout root carries for the locale, e.g. `rtl locale-ar`.
pub fn layout_classes(locale: Locale) -> String {
    format!("{} locale-{}", text_direction(locale).as_str(), locale.code())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
}

impl Edge {
    fn leading(locale: Locale) -> Self {
        if locale.is_rtl() { Edge::Right } else { Edge::Left }
    }

    fn trailing(locale: Locale) -> Self {
        if locale.is_rtl() { Edge::Left } else { Edge::Right }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }
}

/// Where chrome elements sit for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPlacement {
    pub navbar_logo: Edge,
    pub navbar_menu_direction: TextDirection,
    pub sidebar: Edge,
    pub sidebar_icons: Edge,
    pub modal_close_button: Edge,
    pub form_labels: Edge,
}

pub fn component_placement(locale: Locale) -> ComponentPlacement {
    ComponentPlacement {
        navbar_logo: Edge::leading(locale),
        navbar_menu_direction: text_direction(locale),
        sidebar: Edge::leading(locale),
        sidebar_icons: Edge::leading(locale),
        modal_close_button: Edge::trailing(locale),
        form_labels: Edge::leading(locale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_direction() {
        assert_eq!(text_direction(Locale::Ar), TextDirection::Rtl);
        assert_eq!(text_direction(Locale::He), TextDirection::Rtl);
        assert_eq!(text_direction(Locale::Pt), TextDirection::Ltr);
    }

    #[test]
    fn test_spacing_class_swaps_in_rtl() {
        assert_eq!(spacing_class(Locale::Ar, "ml-4"), "mr-4");
        assert_eq!(spacing_class(Locale::En, "ml-4"), "ml-4");
    }

    #[test]
    fn test_spacing_class_swaps_each_class_once() {
        assert_eq!(spacing_class(Locale::He, "ml-2 mr-4"), "mr-2 ml-4");
        assert_eq!(spacing_class(Locale::He, "pl-3 pr-1 left-0 right-2"), "pr-3 pl-1 right-0 left-2");
    }

    #[test]
    fn test_spacing_class_handles_variants_and_negatives() {
        assert_eq!(spacing_class(Locale::Ar, "md:ml-4 -mr-2"), "md:mr-4 -ml-2");
        assert_eq!(spacing_class(Locale::Ar, "hover:pl-1"), "hover:pr-1");
    }

    #[test]
    fn test_spacing_class_leaves_lookalikes_alone() {
        assert_eq!(spacing_class(Locale::Ar, "text-left mx-2 html-4"), "text-left mx-2 html-4");
    }

    #[test]
    fn test_flex_and_alignment() {
        assert_eq!(flex_direction(Locale::Ar, "row"), "row-reverse");
        assert_eq!(flex_direction(Locale::Ar, "col"), "col");
        assert_eq!(flex_direction(Locale::En, "row"), "row");

        assert_eq!(text_align(Locale::He, "left"), "right");
        assert_eq!(text_align(Locale::He, "right"), "left");
        assert_eq!(text_align(Locale::He, "center"), "center");
        assert_eq!(text_align(Locale::Fr, "left"), "left");
    }

    #[test]
    fn test_layout_classes() {
        assert_eq!(layout_classes(Locale::Ar), "rtl locale-ar");
        assert_eq!(layout_classes(Locale::Ja), "ltr locale-ja");
    }

    #[test]
    fn test_component_placement_mirrors() {
        let ltr = component_placement(Locale::En);
        assert_eq!(ltr.modal_close_button, Edge::Right);
        assert_eq!(ltr.sidebar, Edge::Left);

        let rtl = component_placement(Locale::Ar);
        assert_eq!(rtl.modal_close_button, Edge::Left);
        assert_eq!(rtl.navbar_logo, Edge::Right);
        assert_eq!(rtl.navbar_menu_direction, TextDirection::Rtl);
    }
}
