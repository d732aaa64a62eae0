// Subscription Editor - Core Library
// Editor state machines, option tables and the form screen. The terminal
// front end lives behind the `tui` feature.

pub mod amount;
pub mod catalog;
pub mod config;
pub mod date_picker;
pub mod error;
pub mod feedback;
pub mod keypad;
pub mod logging;
pub mod picker;
pub mod screen;
pub mod sheet;
pub mod subscription;

#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use amount::{format_amount, parse_committed, seed_text};
pub use catalog::{App, Catalog, Category, Frequency, PickerItem, ReminderOption, CATALOG};
pub use config::Config;
pub use date_picker::{DateField, DatePicker};
pub use error::EditorError;
pub use feedback::{Feedback, PulseCounter, Silent, TerminalBell};
pub use keypad::{AmountEditor, AmountHost, EditBuffer, Key, Visibility, KEYPAD_ROWS};
pub use picker::ListPicker;
pub use screen::{EditScreen, FormState, Input, Row};
pub use sheet::{ModalKind, SheetHit, SheetRect};
pub use subscription::{FieldUpdate, Subscription};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
