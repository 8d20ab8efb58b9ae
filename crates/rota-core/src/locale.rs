//! User-facing text per locale.
//!
//! The locale is explicit configuration, not an ambient assumption: month
//! labels, weekday headers, and the fixed analysis messages all route
//! through here. Date keys themselves stay numeric and locale-free.

use crate::calendar::YearMonth;
use crate::datekey::DateKey;
use serde::{Deserialize, Serialize};

/// Supported display locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_TR: [&str; 12] = [
    "Ocak",
    "Şubat",
    "Mart",
    "Nisan",
    "Mayıs",
    "Haziran",
    "Temmuz",
    "Ağustos",
    "Eylül",
    "Ekim",
    "Kasım",
    "Aralık",
];

impl Locale {
    /// Name of a 1-based month number.
    #[must_use]
    pub fn month_name(self, month: u32) -> &'static str {
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            Self::En => MONTHS_EN[idx],
            Self::Tr => MONTHS_TR[idx],
        }
    }

    /// Monday-first weekday header abbreviations.
    #[must_use]
    pub const fn weekdays_short(self) -> [&'static str; 7] {
        match self {
            Self::En => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            Self::Tr => ["Pzt", "Sal", "Çar", "Per", "Cum", "Cmt", "Paz"],
        }
    }

    /// Human-readable month label, e.g. "May 2024" / "Mayıs 2024".
    #[must_use]
    pub fn month_label(self, ym: YearMonth) -> String {
        format!("{} {}", self.month_name(ym.month), ym.year)
    }

    /// Fixed message when the visible month has no selected duty days.
    #[must_use]
    pub const fn no_duty_message(self) -> &'static str {
        match self {
            Self::En => "No duty days selected for this month yet.",
            Self::Tr => "Bu ay için henüz hiç nöbet seçmediniz.",
        }
    }

    /// Fixed fallback shown when the analysis collaborator fails.
    #[must_use]
    pub const fn analysis_fallback(self) -> &'static str {
        match self {
            Self::En => "The schedule cannot be analyzed right now. Check the API key.",
            Self::Tr => "Şu anda programını analiz edemiyorum. API anahtarını kontrol et.",
        }
    }

    /// Prompt sent to the analysis collaborator.
    #[must_use]
    pub fn analysis_prompt(self, month_label: &str, dates: &[DateKey]) -> String {
        let list = dates
            .iter()
            .map(DateKey::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        match self {
            Self::En => format!(
                "I work on-call duty shifts and this is my schedule for {month_label}:\n\n\
                 My duty days: {list}.\n\n\
                 Please give a short, friendly, useful analysis of my schedule:\n\
                 1. State the total number of duty days.\n\
                 2. Comment on how dense the schedule is.\n\
                 3. Close with a short motivating sentence or tip.\n\n\
                 Keep the tone positive and supportive."
            ),
            Self::Tr => format!(
                "Ben bir nöbet usulü çalışanım ve {month_label} ayı için nöbet programım şu şekilde:\n\n\
                 Nöbet günlerim: {list}.\n\n\
                 Lütfen programımın kısa, samimi ve faydalı bir analizini yap:\n\
                 1. Toplam nöbet sayısını belirt.\n\
                 2. Programın yoğunluğunu değerlendir.\n\
                 3. Kısa bir motivasyon cümlesi veya tavsiye ver.\n\n\
                 Tonu pozitif, samimi ve destekleyici olsun."
            ),
        }
    }
}
