//! The document a host renders into: language, direction and root classes.

use super::rtl::text_direction;
use crate::models::{Locale, TextDirection};

pub trait DocumentHost: Send {
    fn set_lang(&mut self, lang: &str);

    fn set_dir(&mut self, dir: TextDirection);

    fn root_classes(&self) -> String;

    fn set_root_classes(&mut self, classes: &str);
}

fn is_locale_class(class: &str) -> bool {
    class.starts_with("locale-") || class.starts_with("dir-")
}

/// Replaces any previous `locale-*` and `dir-*` classes with the locale's.
pub fn rewrite_root_classes(classes: &str, locale: Locale) -> String {
    let locale_class = format!("locale-{}", locale.code());
    let dir_class = format!("dir-{}", text_direction(locale).as_str());

    classes
        .split_whitespace()
        .filter(|class| !is_locale_class(class))
        .chain([locale_class.as_str(), dir_class.as_str()])
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn apply_locale(host: &mut dyn DocumentHost, locale: Locale) {
    host.set_lang(locale.code());
    host.set_dir(text_direction(locale));

    let classes = rewrite_root_classes(&host.root_classes(), locale);
    host.set_root_classes(&classes);
}

/// In-memory document, for headless hosts and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    pub lang: String,
    pub dir: TextDirection,
    pub class_name: String,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self {
            lang: String::new(),
            dir: TextDirection::Ltr,
            class_name: String::new(),
        }
    }
}

impl DocumentHost for DocumentState {
    fn set_lang(&mut self, lang: &str) {
        self.lang = lang.to_string();
    }

    fn set_dir(&mut self, dir: TextDirection) {
        self.dir = dir;
    }

    fn root_classes(&self) -> String {
        self.class_name.clone()
    }

    fn set_root_classes(&mut self, classes: &str) {
        self.class_name = classes.to_string();
    }
}
