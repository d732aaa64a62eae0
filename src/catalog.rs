// 📚 Catalog - read-only option tables for the pickers
//
// Apps, categories, billing frequencies and reminder offsets.
// Built once on first use and never mutated afterwards.

use once_cell::sync::Lazy;
use serde::Serialize;

// ============================================================================
// OPTION TYPES
// ============================================================================

/// Something a list picker can show and mark as selected
pub trait PickerItem {
    /// Stable identifier used for the "currently selected" mark
    fn id(&self) -> &str;

    /// Text shown in the list and matched by search
    fn label(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct App {
    pub id: &'static str,
    pub name: &'static str,
    /// Glyph drawn in the app badge
    pub icon: &'static str,
    /// Brand color (e.g., "#E50914")
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frequency {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderOption {
    pub id: &'static str,
    pub name: &'static str,
    /// Days before the billing date
    pub days_before: u32,
}

impl PickerItem for App {
    fn id(&self) -> &str {
        self.id
    }

    fn label(&self) -> &str {
        self.name
    }
}

impl PickerItem for Category {
    fn id(&self) -> &str {
        self.id
    }

    fn label(&self) -> &str {
        self.name
    }
}

impl PickerItem for Frequency {
    fn id(&self) -> &str {
        self.id
    }

    fn label(&self) -> &str {
        self.name
    }
}

impl PickerItem for ReminderOption {
    fn id(&self) -> &str {
        self.id
    }

    fn label(&self) -> &str {
        self.name
    }
}

impl App {
    /// RGB components of the brand color, if it is a valid `#RRGGBB`
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// All option tables, in display order
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub apps: Vec<App>,
    pub categories: Vec<Category>,
    pub frequencies: Vec<Frequency>,
    pub reminders: Vec<ReminderOption>,
}

/// Process-wide catalog, built on first access
pub static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::with_defaults);

impl Catalog {
    /// Catalog with the built-in tables
    pub fn with_defaults() -> Self {
        Catalog {
            apps: default_apps(),
            categories: default_categories(),
            frequencies: default_frequencies(),
            reminders: default_reminders(),
        }
    }

    pub fn app(&self, id: &str) -> Option<&App> {
        self.apps.iter().find(|a| a.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn frequency(&self, id: &str) -> Option<&Frequency> {
        self.frequencies.iter().find(|f| f.id == id)
    }

    pub fn reminder(&self, id: &str) -> Option<&ReminderOption> {
        self.reminders.iter().find(|r| r.id == id)
    }
}

fn default_apps() -> Vec<App> {
    vec![
        App { id: "netflix", name: "Netflix", icon: "N", color: "#E50914" },
        App { id: "spotify", name: "Spotify", icon: "S", color: "#1DB954" },
        App { id: "nyt", name: "New York Times", icon: "𝕿", color: "#000000" },
        App { id: "wsj", name: "Wall Street Journal", icon: "WSJ", color: "#000000" },
        App { id: "hulu", name: "Hulu", icon: "h", color: "#1CE783" },
        App { id: "apple", name: "Apple", icon: "", color: "#000000" },
        App { id: "amazon", name: "Amazon", icon: "a", color: "#FF9900" },
        App { id: "chess", name: "Chess.com", icon: "♟", color: "#769656" },
        App { id: "disney", name: "Disney+", icon: "D", color: "#113CCF" },
        App { id: "hbo", name: "HBO Max", icon: "H", color: "#6B3FA0" },
        App { id: "youtube", name: "YouTube Premium", icon: "▶", color: "#FF0000" },
    ]
}

fn default_categories() -> Vec<Category> {
    vec![
        Category { id: "subscription", name: "Subscription", icon: "🔁" },
        Category { id: "utility", name: "Utility", icon: "🔧" },
        Category { id: "card_payment", name: "Card Payment", icon: "💳" },
        Category { id: "loan", name: "Loan", icon: "🏦" },
        Category { id: "rent", name: "Rent", icon: "🏠" },
    ]
}

fn default_frequencies() -> Vec<Frequency> {
    vec![
        Frequency { id: "weekly", name: "Weekly" },
        Frequency { id: "monthly", name: "Monthly" },
        Frequency { id: "annually", name: "Annually" },
    ]
}

fn default_reminders() -> Vec<ReminderOption> {
    vec![
        ReminderOption { id: "same_day", name: "Same day", days_before: 0 },
        ReminderOption { id: "1_day", name: "1 day before", days_before: 1 },
        ReminderOption { id: "2_days", name: "2 days before", days_before: 2 },
        ReminderOption { id: "3_days", name: "3 days before", days_before: 3 },
        ReminderOption { id: "1_week", name: "1 week before", days_before: 7 },
    ]
}
