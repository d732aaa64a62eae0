// 🔢 Numeric Keypad Editor - digit-by-digit money entry
//
// Two visible states: Hidden and Visible.
// - Hidden → Visible: open(amount) re-seeds the buffer from the amount
// - Visible → Hidden: commit() (hands a value to the host) or cancel() (nothing)
//
// The buffer is never carried across sessions; only the seeding rule links
// one session to the next.

use crate::amount::{self, DECIMAL_SEPARATOR, EMPTY_BUFFER, MAX_FRACTION_DIGITS};
use crate::feedback::Feedback;
use std::fmt;
use std::rc::Rc;

// ============================================================================
// KEYS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// 0-9
    Digit(u8),
    Decimal,
    Backspace,
}

impl Key {
    /// Map a typed character onto a pad key
    pub fn from_char(c: char) -> Option<Key> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| Key::Digit(d as u8)),
            DECIMAL_SEPARATOR | ',' => Some(Key::Decimal),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Key::Digit(d) => DIGIT_LABELS.get(*d as usize).copied().unwrap_or("?"),
            Key::Decimal => ".",
            Key::Backspace => "⌫",
        }
    }

    /// Phone-style letter grouping printed under 2-9. Decorative only.
    pub fn sub_label(&self) -> Option<&'static str> {
        match self {
            Key::Digit(2) => Some("ABC"),
            Key::Digit(3) => Some("DEF"),
            Key::Digit(4) => Some("GHI"),
            Key::Digit(5) => Some("JKL"),
            Key::Digit(6) => Some("MNO"),
            Key::Digit(7) => Some("PQRS"),
            Key::Digit(8) => Some("TUV"),
            Key::Digit(9) => Some("WXYZ"),
            _ => None,
        }
    }
}

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Pad layout, top row first
pub const KEYPAD_ROWS: [[Key; 3]; 4] = [
    [Key::Digit(1), Key::Digit(2), Key::Digit(3)],
    [Key::Digit(4), Key::Digit(5), Key::Digit(6)],
    [Key::Digit(7), Key::Digit(8), Key::Digit(9)],
    [Key::Decimal, Key::Digit(0), Key::Backspace],
];

// ============================================================================
// EDIT BUFFER
// ============================================================================

/// Text of the amount being typed.
///
/// Invariants:
/// - never empty (`"0"` is the empty state)
/// - at most one decimal separator
/// - at most two digits after the separator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
}

impl Default for EditBuffer {
    fn default() -> Self {
        EditBuffer {
            text: EMPTY_BUFFER.to_string(),
        }
    }
}

impl EditBuffer {
    pub fn seeded(amount: f64) -> Self {
        EditBuffer {
            text: amount::seed_text(amount),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn has_separator(&self) -> bool {
        self.text.contains(DECIMAL_SEPARATOR)
    }

    /// Apply one digit or separator. Returns false when the key was rejected
    /// and the buffer left untouched.
    pub fn append(&mut self, d: char) -> bool {
        let is_separator = d == DECIMAL_SEPARATOR;
        if !is_separator && !d.is_ascii_digit() {
            return false;
        }

        if is_separator && self.has_separator() {
            return false;
        }

        if self.text == EMPTY_BUFFER && !is_separator {
            self.text = d.to_string();
            return true;
        }

        if amount::fraction_len(&self.text) >= MAX_FRACTION_DIGITS {
            return false;
        }

        self.text.push(d);
        true
    }

    /// Drop the last character, flooring at `"0"`
    pub fn backspace(&mut self) {
        if self.text.chars().count() <= 1 {
            self.text = EMPTY_BUFFER.to_string();
        } else {
            self.text.pop();
        }
    }

    /// Committed value of the current text
    pub fn value(&self) -> f64 {
        amount::parse_committed(&self.text)
    }
}

impl fmt::Display for EditBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ============================================================================
// HOST CONTRACT
// ============================================================================

/// Whoever opened the editor. `commit` calls `save` then `close`;
/// `cancel` calls only `close`.
pub trait AmountHost {
    fn save(&mut self, amount: f64);
    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

type ChangeObserver = Box<dyn FnMut(&str)>;

// ============================================================================
// EDITOR
// ============================================================================

/// Keypad editor session.
///
/// Mutations are announced to observers registered with [`AmountEditor::on_change`]
/// so a renderer can redraw without polling.
pub struct AmountEditor {
    buffer: EditBuffer,
    visibility: Visibility,
    feedback: Rc<dyn Feedback>,
    observers: Vec<ChangeObserver>,
}

impl AmountEditor {
    pub fn new(feedback: Rc<dyn Feedback>) -> Self {
        AmountEditor {
            buffer: EditBuffer::default(),
            visibility: Visibility::Hidden,
            feedback,
            observers: Vec::new(),
        }
    }

    /// Register a callback receiving the buffer text after every change.
    ///
    /// For embedders that render on change. The terminal front end redraws
    /// after every input event and reads `buffer()` directly instead.
    pub fn on_change<F>(&mut self, observer: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Hidden → Visible. Re-seeds from `amount` even if already visible.
    pub fn open(&mut self, amount: f64) {
        self.buffer = EditBuffer::seeded(amount);
        self.visibility = Visibility::Visible;
        tracing::debug!(seed = %self.buffer, "amount editor opened");
        self.notify();
    }

    /// Route a pad key to append or backspace
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => {
                if let Some(c) = char::from_digit(u32::from(d), 10) {
                    self.append_digit(c);
                }
            }
            Key::Decimal => self.append_digit(DECIMAL_SEPARATOR),
            Key::Backspace => self.backspace(),
        }
    }

    /// Append a digit or the separator. Pulses whether or not it is accepted.
    pub fn append_digit(&mut self, d: char) {
        if !self.is_visible() {
            return;
        }

        self.feedback.pulse();

        if self.buffer.append(d) {
            self.notify();
        } else {
            tracing::debug!(key = %d, buffer = %self.buffer, "keystroke rejected");
        }
    }

    pub fn backspace(&mut self) {
        if !self.is_visible() {
            return;
        }

        self.feedback.pulse();
        self.buffer.backspace();
        self.notify();
    }

    /// Finalize: save the parsed amount, then close. Returns the saved value.
    pub fn commit<H: AmountHost + ?Sized>(&mut self, host: &mut H) -> Option<f64> {
        if !self.is_visible() {
            return None;
        }

        let value = self.buffer.value();
        tracing::info!(buffer = %self.buffer, amount = value, "amount committed");

        self.visibility = Visibility::Hidden;
        host.save(value);
        host.close();
        Some(value)
    }

    /// Discard the buffer and close without a value
    pub fn cancel<H: AmountHost + ?Sized>(&mut self, host: &mut H) {
        if !self.is_visible() {
            return;
        }

        self.visibility = Visibility::Hidden;
        self.buffer = EditBuffer::default();
        host.close();
    }

    fn notify(&mut self) {
        let text = self.buffer.as_str().to_string();
        for observer in self.observers.iter_mut() {
            observer(&text);
        }
    }
}

impl fmt::Debug for AmountEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmountEditor")
            .field("buffer", &self.buffer)
            .field("visibility", &self.visibility)
            .field("observers", &self.observers.len())
            .finish()
    }
}
