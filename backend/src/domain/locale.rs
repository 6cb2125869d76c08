//! Localized labels for the calendar header.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::CalendarError;

/// Supplies the header row and month title text
pub trait WeekdayLabels: Send + Sync {
    /// Short weekday names, Sunday first
    fn short_weekdays(&self) -> [&'static str; 7];

    /// Month name for a 1-based month number
    fn month_name(&self, month: u32) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarLocale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl FromStr for CalendarLocale {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" => Ok(Self::EnUs),
            "pt" | "pt-br" | "pt_br" => Ok(Self::PtBr),
            _ => Err(CalendarError::UnsupportedLocale(s.to_string())),
        }
    }
}

impl WeekdayLabels for CalendarLocale {
    fn short_weekdays(&self) -> [&'static str; 7] {
        match self {
            Self::EnUs => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            Self::PtBr => ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"],
        }
    }

    fn month_name(&self, month: u32) -> &'static str {
        match self {
            Self::EnUs => match month {
                1 => "January", 2 => "February", 3 => "March", 4 => "April",
                5 => "May", 6 => "June", 7 => "July", 8 => "August",
                9 => "September", 10 => "October", 11 => "November", 12 => "December",
                _ => "Invalid Month",
            },
            Self::PtBr => match month {
                1 => "Janeiro", 2 => "Fevereiro", 3 => "Março", 4 => "Abril",
                5 => "Maio", 6 => "Junho", 7 => "Julho", 8 => "Agosto",
                9 => "Setembro", 10 => "Outubro", 11 => "Novembro", 12 => "Dezembro",
                _ => "Mês inválido",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekdays_start_on_sunday() {
        assert_eq!(CalendarLocale::EnUs.short_weekdays()[0], "Sun");
        assert_eq!(CalendarLocale::PtBr.short_weekdays()[0], "Dom");
        assert_eq!(CalendarLocale::PtBr.short_weekdays()[6], "Sáb");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(CalendarLocale::EnUs.month_name(1), "January");
        assert_eq!(CalendarLocale::EnUs.month_name(12), "December");
        assert_eq!(CalendarLocale::EnUs.month_name(13), "Invalid Month");
        assert_eq!(CalendarLocale::PtBr.month_name(10), "Outubro");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("en-US".parse::<CalendarLocale>(), Ok(CalendarLocale::EnUs));
        assert_eq!("pt_BR".parse::<CalendarLocale>(), Ok(CalendarLocale::PtBr));
        assert_eq!(
            "fr-FR".parse::<CalendarLocale>(),
            Err(CalendarError::UnsupportedLocale("fr-FR".to_string()))
        );
    }
}
