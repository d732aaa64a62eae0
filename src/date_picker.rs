// 📅 Date Picker - month / day / year spinner for the start date

use chrono::{Datelike, NaiveDate};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Month,
    Day,
    Year,
}

impl DateField {
    pub fn next(&self) -> Self {
        match self {
            DateField::Month => DateField::Day,
            DateField::Day => DateField::Year,
            DateField::Year => DateField::Month,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            DateField::Month => DateField::Year,
            DateField::Day => DateField::Month,
            DateField::Year => DateField::Day,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatePicker {
    year: i32,
    month: u32,
    day: u32,
    field: DateField,
    open: bool,
}

impl Default for DatePicker {
    fn default() -> Self {
        DatePicker {
            year: 2025,
            month: 1,
            day: 1,
            field: DateField::Month,
            open: false,
        }
    }
}

impl DatePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, date: NaiveDate) {
        self.year = date.year().clamp(MIN_YEAR, MAX_YEAR);
        self.month = date.month();
        self.day = date.day();
        self.clamp_day();
        self.field = DateField::Month;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn field(&self) -> DateField {
        self.field
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Date currently shown on the spinner
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn previous_field(&mut self) {
        self.field = self.field.previous();
    }

    pub fn increment(&mut self) {
        self.step(1);
    }

    pub fn decrement(&mut self) {
        self.step(-1);
    }

    /// Close and return the chosen date
    pub fn confirm(&mut self) -> Option<NaiveDate> {
        if !self.open {
            return None;
        }
        self.open = false;
        self.date()
    }

    pub fn cancel(&mut self) {
        self.open = false;
    }

    fn step(&mut self, delta: i32) {
        match self.field {
            DateField::Month => {
                self.month = wrap(self.month, delta, 12);
                self.clamp_day();
            }
            DateField::Day => {
                self.day = wrap(self.day, delta, days_in_month(self.year, self.month));
            }
            DateField::Year => {
                self.year = (self.year + delta).clamp(MIN_YEAR, MAX_YEAR);
                self.clamp_day();
            }
        }
    }

    fn clamp_day(&mut self) {
        let last = days_in_month(self.year, self.month);
        if self.day > last {
            self.day = last;
        }
    }
}

/// Step `value` in 1..=max, wrapping at both ends
fn wrap(value: u32, delta: i32, max: u32) -> u32 {
    let zero_based = value as i64 - 1 + delta as i64;
    (zero_based.rem_euclid(max as i64) + 1) as u32
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_open_and_confirm_roundtrip() {
        let mut picker = DatePicker::new();
        picker.open(date(2025, 4, 12));
        assert!(picker.is_open());
        assert_eq!(picker.confirm(), Some(date(2025, 4, 12)));
        assert!(!picker.is_open());
    }

    #[test]
    fn test_month_change_clamps_day() {
        let mut picker = DatePicker::new();
        picker.open(date(2025, 1, 31));
        picker.increment();
        assert_eq!(picker.date(), Some(date(2025, 2, 28)));
    }

    #[test]
    fn test_year_change_clamps_leap_day() {
        let mut picker = DatePicker::new();
        picker.open(date(2024, 2, 29));
        picker.next_field();
        picker.next_field();
        assert_eq!(picker.field(), DateField::Year);
        picker.increment();
        assert_eq!(picker.date(), Some(date(2025, 2, 28)));
    }

    #[test]
    fn test_month_and_day_wrap() {
        let mut picker = DatePicker::new();
        picker.open(date(2025, 12, 31));
        picker.increment();
        assert_eq!(picker.month(), 1);
        assert_eq!(picker.year(), 2025);

        picker.next_field();
        picker.increment();
        assert_eq!(picker.day(), 1);
        picker.decrement();
        assert_eq!(picker.day(), 31);
    }

    #[test]
    fn test_year_is_bounded() {
        let mut picker = DatePicker::new();
        picker.open(date(2100, 6, 1));
        picker.previous_field();
        assert_eq!(picker.field(), DateField::Year);
        picker.increment();
        assert_eq!(picker.year(), MAX_YEAR);
    }

    #[test]
    fn test_cancel_returns_nothing() {
        let mut picker = DatePicker::new();
        picker.open(date(2025, 4, 12));
        picker.increment();
        picker.cancel();
        assert_eq!(picker.confirm(), None);
    }
}
