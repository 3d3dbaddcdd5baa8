use chrono::NaiveDate;
use serde::Serialize;

use crate::diary::page::DayOption;
use crate::i18n::formatters::DateFormatOptions;
use crate::i18n::LocaleStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOptionItem {
    pub option: DayOption,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOptionsView {
    pub date: NaiveDate,
    pub title: String,
    pub prompt: String,
    pub options: Vec<DayOptionItem>,
    pub close_label: String,
}

pub fn day_options(date: NaiveDate, locale: &LocaleStore) -> DayOptionsView {
    let day = locale.format_date(date, &DateFormatOptions::DayMonth);

    DayOptionsView {
        date,
        title: locale.translate("diary.options.title", &[("date", day)]),
        prompt: locale.t("diary.options.prompt"),
        options: DayOption::ALL
            .iter()
            .map(|&option| DayOptionItem {
                option,
                label: locale.t(option.translation_key()),
                description: locale.t(&format!("{}.description", option.translation_key())),
            })
            .collect(),
        close_label: locale.t("action.close"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Locale;
    use crate::storage::MemoryStore;
    use crate::test_support::date;
    use std::sync::Arc;

    #[test]
    fn test_options_are_translated() {
        let locale = LocaleStore::load(Arc::new(MemoryStore::new()), Some(Locale::En), None, None);
        let view = day_options(date(2024, 3, 5), &locale);

        assert_eq!(view.title, "Day March 5");
        assert_eq!(view.options.len(), 3);
        assert_eq!(view.options[0].option, DayOption::AddAnalysis);
        assert_eq!(view.options[2].label, "View day");
        assert_eq!(view.options[1].description, "Write notes about this trading day");
    }
}
