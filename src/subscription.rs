// 🧾 Subscription Record - the aggregate the form screen edits
//
// Lives only in process memory. Each picker produces one FieldUpdate and the
// screen merges it with Subscription::apply.

use crate::catalog::{App, Category, Frequency, ReminderOption, CATALOG};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscription {
    /// Stable identity for the session
    pub id: Uuid,
    pub app: Option<App>,
    pub amount: f64,
    pub category: Option<Category>,
    pub start_date: NaiveDate,
    pub frequency: Option<Frequency>,
    pub remind_me: Option<ReminderOption>,
    pub active: bool,
}

/// One field's new value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    App(App),
    Amount(f64),
    Category(Category),
    StartDate(NaiveDate),
    Frequency(Frequency),
    RemindMe(ReminderOption),
    Active(bool),
}

impl Default for Subscription {
    /// Netflix, $50.00, Loan, Apr 12 2025, weekly, 2 days before, active
    fn default() -> Self {
        Subscription {
            id: Uuid::new_v4(),
            app: CATALOG.apps.first().cloned(),
            amount: 50.00,
            category: CATALOG.category("loan").cloned(),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap_or_default(),
            frequency: CATALOG.frequency("weekly").cloned(),
            remind_me: CATALOG.reminder("2_days").cloned(),
            active: true,
        }
    }
}

impl Subscription {
    /// Merge one field, leaving the others untouched
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::App(app) => self.app = Some(app),
            FieldUpdate::Amount(amount) => self.amount = amount,
            FieldUpdate::Category(category) => self.category = Some(category),
            FieldUpdate::StartDate(date) => self.start_date = date,
            FieldUpdate::Frequency(frequency) => self.frequency = Some(frequency),
            FieldUpdate::RemindMe(reminder) => self.remind_me = Some(reminder),
            FieldUpdate::Active(active) => self.active = active,
        }
    }

    pub fn app_name(&self) -> &str {
        self.app.as_ref().map(|a| a.name).unwrap_or("Choose an app")
    }

    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.name).unwrap_or("Select")
    }

    pub fn frequency_name(&self) -> &str {
        self.frequency.as_ref().map(|f| f.name).unwrap_or("Select")
    }

    pub fn reminder_name(&self) -> &str {
        self.remind_me.as_ref().map(|r| r.name).unwrap_or("None")
    }
}

/// "Apr 12, 2025"
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {}, {}", month, date.day(), date.year())
}

/// Short month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("???")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let sub = Subscription::default();
        assert_eq!(sub.app_name(), "Netflix");
        assert_eq!(sub.amount, 50.0);
        assert_eq!(sub.category_name(), "Loan");
        assert_eq!(sub.start_date, NaiveDate::from_ymd_opt(2025, 4, 12).unwrap());
        assert_eq!(sub.frequency_name(), "Weekly");
        assert_eq!(sub.reminder_name(), "2 days before");
        assert!(sub.active);
    }

    #[test]
    fn test_apply_changes_one_field() {
        let mut sub = Subscription::default();
        let before = sub.clone();

        sub.apply(FieldUpdate::Amount(9.99));
        assert_eq!(sub.amount, 9.99);
        assert_eq!(sub.app, before.app);
        assert_eq!(sub.category, before.category);

        let spotify = CATALOG.app("spotify").cloned().unwrap();
        sub.apply(FieldUpdate::App(spotify));
        assert_eq!(sub.app_name(), "Spotify");

        sub.apply(FieldUpdate::Active(false));
        assert!(!sub.active);
    }

    #[test]
    fn test_placeholders_when_unset() {
        let mut sub = Subscription::default();
        sub.app = None;
        sub.category = None;
        sub.frequency = None;
        sub.remind_me = None;

        assert_eq!(sub.app_name(), "Choose an app");
        assert_eq!(sub.category_name(), "Select");
        assert_eq!(sub.frequency_name(), "Select");
        assert_eq!(sub.reminder_name(), "None");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 12).unwrap();
        assert_eq!(format_date(date), "Apr 12, 2025");
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(format_date(date), "Dec 1, 2024");
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), "Jan");
        assert_eq!(month_name(12), "Dec");
        assert_eq!(month_name(0), "???");
        assert_eq!(month_name(13), "???");
    }

    #[test]
    fn test_serializes_to_json() {
        let sub = Subscription::default();
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["amount"], 50.0);
        assert_eq!(json["start_date"], "2025-04-12");
        assert_eq!(json["app"]["name"], "Netflix");
    }
}
