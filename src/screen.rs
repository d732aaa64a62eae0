// 📝 Edit Subscription Screen - form state and input dispatch
//
// Holds the record, the focused row and which sheet is open. Input goes to
// the open sheet if there is one, otherwise to the form.
//
// `FormState` is the keypad's `AmountHost`.

use crate::amount;
use crate::catalog::{App, Category, Frequency, ReminderOption, CATALOG};
use crate::date_picker::DatePicker;
use crate::feedback::Feedback;
use crate::keypad::{AmountEditor, AmountHost, Key};
use crate::picker::ListPicker;
use crate::sheet::{ModalKind, SheetHit};
use crate::subscription::{FieldUpdate, Subscription};
use std::rc::Rc;

pub const SAVED_MESSAGE: &str = "Subscription has been saved successfully.";
pub const DELETED_MESSAGE: &str = "Subscription has been deleted.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this subscription? (y/n)";

// ============================================================================
// INPUT
// ============================================================================

/// Terminal-independent input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Char(char),
    /// Click on the backdrop behind an open sheet
    Dismiss,
}

// ============================================================================
// FORM ROWS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    App,
    Amount,
    Category,
    StartDate,
    Frequency,
    RemindMe,
    Active,
    Delete,
}

impl Row {
    pub const ALL: [Row; 8] = [
        Row::App,
        Row::Amount,
        Row::Category,
        Row::StartDate,
        Row::Frequency,
        Row::RemindMe,
        Row::Active,
        Row::Delete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Row::App => "App",
            Row::Amount => "Amount",
            Row::Category => "Category",
            Row::StartDate => "Start Date",
            Row::Frequency => "Frequency",
            Row::RemindMe => "Remind Me",
            Row::Active => "Active",
            Row::Delete => "Delete",
        }
    }

    /// Sheet opened by Enter on this row
    pub fn modal(&self) -> Option<ModalKind> {
        match self {
            Row::App => Some(ModalKind::App),
            Row::Amount => Some(ModalKind::Amount),
            Row::Category => Some(ModalKind::Category),
            Row::StartDate => Some(ModalKind::StartDate),
            Row::Frequency => Some(ModalKind::Frequency),
            Row::RemindMe => Some(ModalKind::Reminder),
            Row::Active | Row::Delete => None,
        }
    }

    fn index(&self) -> usize {
        Row::ALL.iter().position(|r| r == self).unwrap_or(0)
    }

    pub fn next(&self) -> Row {
        Row::ALL[(self.index() + 1) % Row::ALL.len()]
    }

    pub fn previous(&self) -> Row {
        Row::ALL[(self.index() + Row::ALL.len() - 1) % Row::ALL.len()]
    }
}

// ============================================================================
// FORM STATE
// ============================================================================

#[derive(Debug, Clone)]
pub struct FormState {
    pub record: Subscription,
    pub active_modal: Option<ModalKind>,
    pub status: Option<String>,
    pub saved: bool,
    pub deleted: bool,
}

impl FormState {
    pub fn new(record: Subscription) -> Self {
        FormState {
            record,
            active_modal: None,
            status: None,
            saved: false,
            deleted: false,
        }
    }

    pub fn update(&mut self, update: FieldUpdate) {
        tracing::debug!(?update, "record updated");
        self.record.apply(update);
    }
}

impl AmountHost for FormState {
    fn save(&mut self, amount: f64) {
        self.update(FieldUpdate::Amount(amount));
    }

    fn close(&mut self) {
        self.active_modal = None;
    }
}

// ============================================================================
// SCREEN
// ============================================================================

pub struct EditScreen {
    pub form: FormState,
    pub focus: Row,
    pub amount_editor: AmountEditor,
    pub app_picker: ListPicker<App>,
    pub category_picker: ListPicker<Category>,
    pub frequency_picker: ListPicker<Frequency>,
    pub reminder_picker: ListPicker<ReminderOption>,
    pub date_picker: DatePicker,
    pub confirm_delete: bool,
    pub should_quit: bool,
    currency_symbol: String,
    feedback: Rc<dyn Feedback>,
}

impl EditScreen {
    pub fn new(record: Subscription, currency_symbol: &str, feedback: Rc<dyn Feedback>) -> Self {
        EditScreen {
            form: FormState::new(record),
            focus: Row::App,
            amount_editor: AmountEditor::new(feedback.clone()),
            app_picker: ListPicker::new(CATALOG.apps.clone()).searchable(),
            category_picker: ListPicker::new(CATALOG.categories.clone()),
            frequency_picker: ListPicker::new(CATALOG.frequencies.clone()),
            reminder_picker: ListPicker::new(CATALOG.reminders.clone()),
            date_picker: DatePicker::new(),
            confirm_delete: false,
            should_quit: false,
            currency_symbol: currency_symbol.to_string(),
            feedback,
        }
    }

    pub fn record(&self) -> &Subscription {
        &self.form.record
    }

    pub fn active_modal(&self) -> Option<ModalKind> {
        self.form.active_modal
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// "$50.00"
    pub fn formatted_amount(&self) -> String {
        amount::format_amount(&self.currency_symbol, self.form.record.amount)
    }

    /// Value column text for a row
    pub fn row_value(&self, row: Row) -> String {
        let record = &self.form.record;
        match row {
            Row::App => record.app_name().to_string(),
            Row::Amount => self.formatted_amount(),
            Row::Category => record.category_name().to_string(),
            Row::StartDate => crate::subscription::format_date(record.start_date),
            Row::Frequency => record.frequency_name().to_string(),
            Row::RemindMe => record.reminder_name().to_string(),
            Row::Active => (if record.active { "On" } else { "Off" }).to_string(),
            Row::Delete => String::new(),
        }
    }

    pub fn open_modal(&mut self, kind: ModalKind) {
        self.feedback.pulse();
        self.form.status = None;
        let record = &self.form.record;

        match kind {
            ModalKind::App => self.app_picker.open(record.app.as_ref()),
            ModalKind::Amount => self.amount_editor.open(record.amount),
            ModalKind::Category => self.category_picker.open(record.category.as_ref()),
            ModalKind::StartDate => self.date_picker.open(record.start_date),
            ModalKind::Frequency => self.frequency_picker.open(record.frequency.as_ref()),
            ModalKind::Reminder => self.reminder_picker.open(record.remind_me.as_ref()),
        }

        tracing::debug!(modal = kind.title(), "sheet opened");
        self.form.active_modal = Some(kind);
    }

    /// Close whatever sheet is open without producing a value
    pub fn close_modal(&mut self) {
        let Some(kind) = self.form.active_modal else {
            return;
        };

        match kind {
            ModalKind::App => self.app_picker.cancel(),
            ModalKind::Amount => self.amount_editor.cancel(&mut self.form),
            ModalKind::Category => self.category_picker.cancel(),
            ModalKind::StartDate => self.date_picker.cancel(),
            ModalKind::Frequency => self.frequency_picker.cancel(),
            ModalKind::Reminder => self.reminder_picker.cancel(),
        }

        self.form.active_modal = None;
    }

    pub fn save(&mut self) {
        self.feedback.pulse();
        self.form.saved = true;
        self.form.status = Some(SAVED_MESSAGE.to_string());
        tracing::info!(id = %self.form.record.id, amount = self.form.record.amount, "subscription saved");
    }

    pub fn toggle_active(&mut self) {
        self.feedback.pulse();
        let active = !self.form.record.active;
        self.form.update(FieldUpdate::Active(active));
    }

    pub fn request_delete(&mut self) {
        self.feedback.pulse();
        self.confirm_delete = true;
        self.form.status = Some(DELETE_PROMPT.to_string());
    }

    pub fn handle(&mut self, input: Input) {
        if self.confirm_delete {
            self.handle_delete_confirmation(input);
            return;
        }

        match self.form.active_modal {
            None => self.handle_form(input),
            Some(ModalKind::Amount) => self.handle_amount(input),
            Some(ModalKind::StartDate) => self.handle_date(input),
            Some(ModalKind::App) => {
                if let Some(app) = handle_list(&mut self.app_picker, input) {
                    self.form.update(FieldUpdate::App(app));
                }
                self.sync_list_closed();
            }
            Some(ModalKind::Category) => {
                if let Some(category) = handle_list(&mut self.category_picker, input) {
                    self.form.update(FieldUpdate::Category(category));
                }
                self.sync_list_closed();
            }
            Some(ModalKind::Frequency) => {
                if let Some(frequency) = handle_list(&mut self.frequency_picker, input) {
                    self.form.update(FieldUpdate::Frequency(frequency));
                }
                self.sync_list_closed();
            }
            Some(ModalKind::Reminder) => {
                if let Some(reminder) = handle_list(&mut self.reminder_picker, input) {
                    self.form.update(FieldUpdate::RemindMe(reminder));
                }
                self.sync_list_closed();
            }
        }
    }

    /// Route a click resolved by `sheet::hit_test` to the open sheet.
    ///
    /// Keypad cells press keys. "Done" commits the amount and date sheets
    /// and closes list sheets unchanged. A list row picks that item.
    pub fn click(&mut self, hit: SheetHit) {
        let kind = match self.form.active_modal {
            Some(kind) if !self.confirm_delete => kind,
            _ => return,
        };

        match hit {
            SheetHit::Backdrop => self.handle(Input::Dismiss),
            SheetHit::Cancel => self.handle(Input::Esc),
            SheetHit::Done if kind.is_list() => self.handle(Input::Esc),
            SheetHit::Done => self.handle(Input::Enter),
            SheetHit::Key(key) => {
                if kind == ModalKind::Amount {
                    self.amount_editor.press(key);
                }
            }
            SheetHit::ListRow(index) => {
                let selected = match kind {
                    ModalKind::App => self.app_picker.select(index),
                    ModalKind::Category => self.category_picker.select(index),
                    ModalKind::Frequency => self.frequency_picker.select(index),
                    ModalKind::Reminder => self.reminder_picker.select(index),
                    ModalKind::Amount | ModalKind::StartDate => false,
                };
                if selected {
                    self.handle(Input::Enter);
                }
            }
        }
    }

    fn handle_form(&mut self, input: Input) {
        match input {
            Input::Up | Input::Char('k') => self.focus = self.focus.previous(),
            Input::Down | Input::Char('j') | Input::Char('\t') => self.focus = self.focus.next(),
            Input::Enter | Input::Char(' ') => self.activate_focused(),
            Input::Char('s') => self.save(),
            Input::Char('q') | Input::Esc => {
                self.feedback.pulse();
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn activate_focused(&mut self) {
        match self.focus {
            Row::Active => self.toggle_active(),
            Row::Delete => self.request_delete(),
            row => {
                if let Some(kind) = row.modal() {
                    self.open_modal(kind);
                }
            }
        }
    }

    fn handle_delete_confirmation(&mut self, input: Input) {
        match input {
            Input::Char('y') | Input::Char('Y') => {
                self.feedback.pulse();
                self.confirm_delete = false;
                self.form.deleted = true;
                self.form.status = Some(DELETED_MESSAGE.to_string());
                tracing::info!(id = %self.form.record.id, "subscription deleted");
            }
            Input::Char('n') | Input::Char('N') | Input::Esc | Input::Dismiss => {
                self.confirm_delete = false;
                self.form.status = None;
            }
            _ => {}
        }
    }

    fn handle_amount(&mut self, input: Input) {
        match input {
            Input::Char(c) => {
                if let Some(key) = Key::from_char(c) {
                    self.amount_editor.press(key);
                }
            }
            Input::Backspace => self.amount_editor.press(Key::Backspace),
            Input::Enter => {
                self.amount_editor.commit(&mut self.form);
            }
            Input::Esc | Input::Dismiss => self.amount_editor.cancel(&mut self.form),
            _ => {}
        }
    }

    fn handle_date(&mut self, input: Input) {
        match input {
            Input::Left => self.date_picker.previous_field(),
            Input::Right | Input::Char('\t') => self.date_picker.next_field(),
            Input::Up | Input::Char('k') => self.date_picker.increment(),
            Input::Down | Input::Char('j') => self.date_picker.decrement(),
            Input::Enter => {
                if let Some(date) = self.date_picker.confirm() {
                    self.form.update(FieldUpdate::StartDate(date));
                }
                self.form.active_modal = None;
            }
            Input::Esc | Input::Dismiss => self.close_modal(),
            _ => {}
        }
    }

    fn sync_list_closed(&mut self) {
        let still_open = match self.form.active_modal {
            Some(ModalKind::App) => self.app_picker.is_open(),
            Some(ModalKind::Category) => self.category_picker.is_open(),
            Some(ModalKind::Frequency) => self.frequency_picker.is_open(),
            Some(ModalKind::Reminder) => self.reminder_picker.is_open(),
            _ => true,
        };
        if !still_open {
            self.form.active_modal = None;
        }
    }
}

/// Shared list-sheet keys. Returns the chosen item when the user confirms.
fn handle_list<T: crate::catalog::PickerItem + Clone>(
    picker: &mut ListPicker<T>,
    input: Input,
) -> Option<T> {
    match input {
        Input::Up => picker.previous(),
        Input::Down => picker.next(),
        Input::Enter => return picker.confirm(),
        Input::Esc | Input::Dismiss => picker.cancel(),
        Input::Backspace => picker.pop_search(),
        Input::Char(c) if picker.is_searchable() => picker.push_search(c),
        Input::Char('k') => picker.previous(),
        Input::Char('j') => picker.next(),
        _ => {}
    }
    None
}
