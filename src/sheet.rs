// 🪟 Bottom Sheet - modal shell geometry and identity
//
// Every picker is shown in a full-width panel anchored to the bottom of the
// screen. The rest of the screen is backdrop: clicking it dismisses the
// sheet through the same close path as Esc.
//
// The renderer draws from the rectangles computed here and mouse clicks are
// resolved against the same rectangles.

use crate::keypad::{Key, KEYPAD_ROWS};

/// Width of the "Esc" and "Done" cells at either end of the sheet header
pub const HEADER_BUTTON_WIDTH: u16 = 8;

/// Rows taken by the amount read-out above the keypad
pub const AMOUNT_INPUT_HEIGHT: u16 = 3;

/// Rows taken by the search box of a searchable list
pub const SEARCH_BOX_HEIGHT: u16 = 3;

/// Which picker is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    App,
    Amount,
    Category,
    StartDate,
    Frequency,
    Reminder,
}

impl ModalKind {
    pub fn title(&self) -> &'static str {
        match self {
            ModalKind::App => "App",
            ModalKind::Amount => "Amount",
            ModalKind::Category => "Category",
            ModalKind::StartDate => "Start Date",
            ModalKind::Frequency => "Frequency",
            ModalKind::Reminder => "Remind Me",
        }
    }

    /// Share of the screen height taken by the sheet
    pub fn height_fraction(&self) -> f32 {
        match self {
            ModalKind::App => 0.75,
            ModalKind::Amount => 0.52,
            ModalKind::Category => 0.5,
            ModalKind::StartDate => 0.38,
            ModalKind::Frequency => 0.4,
            ModalKind::Reminder => 0.4,
        }
    }

    /// Only the app list carries a search box
    pub fn has_search(&self) -> bool {
        matches!(self, ModalKind::App)
    }

    pub fn is_list(&self) -> bool {
        !matches!(self, ModalKind::Amount | ModalKind::StartDate)
    }
}

/// Smallest sheet that still fits a border and one line of content
pub const MIN_SHEET_HEIGHT: u16 = 3;

/// Screen-space rectangle, independent of the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SheetRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl SheetRect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        SheetRect { x, y, width, height }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }

    /// Area inside a one-cell border
    pub fn inner(&self) -> SheetRect {
        if self.width < 2 || self.height < 2 {
            return SheetRect::new(self.x, self.y, 0, 0);
        }
        SheetRect::new(self.x + 1, self.y + 1, self.width - 2, self.height - 2)
    }

    /// Split off the top `rows` rows (fewer if the rect is shorter)
    pub fn split_top(&self, rows: u16) -> (SheetRect, SheetRect) {
        let top = rows.min(self.height);
        (
            SheetRect::new(self.x, self.y, self.width, top),
            SheetRect::new(self.x, self.y + top, self.width, self.height - top),
        )
    }

    /// Band `index` of `count` equal-ish vertical slices
    fn row_band(&self, index: u16, count: u16) -> SheetRect {
        let (start, len) = band(self.y, self.height, index, count);
        SheetRect::new(self.x, start, self.width, len)
    }

    /// Band `index` of `count` equal-ish horizontal slices
    fn column_band(&self, index: u16, count: u16) -> SheetRect {
        let (start, len) = band(self.x, self.width, index, count);
        SheetRect::new(start, self.y, len, self.height)
    }
}

fn band(origin: u16, length: u16, index: u16, count: u16) -> (u16, u16) {
    let at = |i: u16| (u32::from(length) * u32::from(i) / u32::from(count.max(1))) as u16;
    let start = at(index);
    (origin + start, at(index + 1) - start)
}

/// Fixed parts of every sheet: header row with Esc / title / Done, then body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub cancel: SheetRect,
    pub title: SheetRect,
    pub done: SheetRect,
    pub body: SheetRect,
}

pub fn sheet_layout(sheet: SheetRect) -> SheetLayout {
    let (header, body) = sheet.inner().split_top(1);
    let button = HEADER_BUTTON_WIDTH.min(header.width / 2);

    SheetLayout {
        cancel: SheetRect::new(header.x, header.y, button, header.height),
        title: SheetRect::new(header.x + button, header.y, header.width - 2 * button, header.height),
        done: SheetRect::new(header.x + header.width - button, header.y, button, header.height),
        body,
    }
}

/// Amount sheet body: read-out box, then a 4×3 key grid matching `KEYPAD_ROWS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadLayout {
    pub input: SheetRect,
    pub cells: [[SheetRect; 3]; 4],
}

impl KeypadLayout {
    /// Every key with the cell it is drawn in
    pub fn keys(&self) -> impl Iterator<Item = (Key, SheetRect)> + '_ {
        KEYPAD_ROWS
            .iter()
            .zip(self.cells.iter())
            .flat_map(|(keys, cells)| keys.iter().copied().zip(cells.iter().copied()))
    }

    pub fn key_at(&self, column: u16, row: u16) -> Option<Key> {
        self.keys()
            .find(|(_, cell)| cell.contains(column, row))
            .map(|(key, _)| key)
    }
}

pub fn keypad_layout(body: SheetRect) -> KeypadLayout {
    let (input, pad) = body.split_top(AMOUNT_INPUT_HEIGHT);
    let mut cells = [[SheetRect::default(); 3]; 4];
    for (r, row) in cells.iter_mut().enumerate() {
        let band = pad.row_band(r as u16, 4);
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = band.column_band(c as u16, 3);
        }
    }
    KeypadLayout { input, cells }
}

/// List sheet body: optional search box, then one row per visible item
pub fn list_layout(body: SheetRect, searchable: bool) -> (Option<SheetRect>, SheetRect) {
    if searchable {
        let (search, list) = body.split_top(SEARCH_BOX_HEIGHT);
        (Some(search), list)
    } else {
        (None, body)
    }
}

/// First visible list row, scrolled just enough to keep the cursor on screen
pub fn list_offset(cursor: Option<usize>, height: u16) -> usize {
    let height = usize::from(height);
    match cursor {
        Some(cursor) if height > 0 && cursor >= height => cursor + 1 - height,
        _ => 0,
    }
}

/// What a mouse click landed on while a sheet is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetHit {
    Backdrop,
    Cancel,
    Done,
    Key(Key),
    /// Index into the picker's visible items
    ListRow(usize),
}

/// Resolve a click at (column, row) against the open sheet.
///
/// `list_offset` is the index of the first list item on screen. Clicks on
/// padding or on the date spinner resolve to `None`.
pub fn hit_test(
    screen: SheetRect,
    kind: ModalKind,
    list_offset: usize,
    column: u16,
    row: u16,
) -> Option<SheetHit> {
    if is_backdrop_hit(screen, kind, column, row) {
        return Some(SheetHit::Backdrop);
    }
    let sheet = sheet_area(screen, kind.height_fraction());
    if !sheet.contains(column, row) {
        return None;
    }

    let layout = sheet_layout(sheet);
    if layout.cancel.contains(column, row) {
        return Some(SheetHit::Cancel);
    }
    if layout.done.contains(column, row) {
        return Some(SheetHit::Done);
    }

    match kind {
        ModalKind::Amount => keypad_layout(layout.body)
            .key_at(column, row)
            .map(SheetHit::Key),
        ModalKind::StartDate => None,
        _ => {
            let (_, list) = list_layout(layout.body, kind.has_search());
            list.contains(column, row)
                .then(|| SheetHit::ListRow(list_offset + usize::from(row - list.y)))
        }
    }
}

/// Bottom-anchored sheet occupying `fraction` of `screen`
pub fn sheet_area(screen: SheetRect, fraction: f32) -> SheetRect {
    let wanted = (screen.height as f32 * fraction.clamp(0.0, 1.0)).round() as u16;
    let height = wanted.max(MIN_SHEET_HEIGHT).min(screen.height);
    SheetRect {
        x: screen.x,
        y: screen.y + (screen.height - height),
        width: screen.width,
        height,
    }
}

/// True when a click at (column, row) lands on the backdrop
pub fn is_backdrop_hit(screen: SheetRect, kind: ModalKind, column: u16, row: u16) -> bool {
    screen.contains(column, row) && !sheet_area(screen, kind.height_fraction()).contains(column, row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_half_screen() {
        let screen = SheetRect::new(0, 0, 80, 40);
        let sheet = sheet_area(screen, 0.5);
        assert_eq!(sheet, SheetRect::new(0, 20, 80, 20));
    }

    #[test]
    fn test_sheet_min_and_max_height() {
        let tiny = SheetRect::new(0, 0, 80, 4);
        assert_eq!(sheet_area(tiny, 0.1).height, MIN_SHEET_HEIGHT);

        let tinier = SheetRect::new(0, 0, 80, 2);
        assert_eq!(sheet_area(tinier, 0.5).height, 2);
        assert_eq!(sheet_area(tinier, 0.5).y, 0);

        let screen = SheetRect::new(0, 0, 80, 40);
        assert_eq!(sheet_area(screen, 1.5).height, 40);
    }

    #[test]
    fn test_backdrop_hit() {
        let screen = SheetRect::new(0, 0, 80, 40);
        // Category sheet covers rows 20..40
        assert!(is_backdrop_hit(screen, ModalKind::Category, 10, 5));
        assert!(!is_backdrop_hit(screen, ModalKind::Category, 10, 25));
        assert!(!is_backdrop_hit(screen, ModalKind::Category, 10, 45));
    }

    #[test]
    fn test_sheet_layout_header_cells() {
        let layout = sheet_layout(SheetRect::new(0, 20, 80, 20));
        assert_eq!(layout.cancel, SheetRect::new(1, 21, 8, 1));
        assert_eq!(layout.done, SheetRect::new(71, 21, 8, 1));
        assert_eq!(layout.title, SheetRect::new(9, 21, 62, 1));
        assert_eq!(layout.body, SheetRect::new(1, 22, 78, 17));
    }

    #[test]
    fn test_keypad_cells_tile_the_pad() {
        let pad = keypad_layout(SheetRect::new(0, 0, 30, 19));
        assert_eq!(pad.input, SheetRect::new(0, 0, 30, 3));

        // 16 pad rows split 4/4/4/4, 30 columns split 10/10/10
        assert_eq!(pad.cells[0][0], SheetRect::new(0, 3, 10, 4));
        assert_eq!(pad.cells[3][2], SheetRect::new(20, 15, 10, 4));

        let covered: u32 = pad
            .keys()
            .map(|(_, cell)| u32::from(cell.width) * u32::from(cell.height))
            .sum();
        assert_eq!(covered, 30 * 16);
    }

    #[test]
    fn test_key_at_follows_pad_layout() {
        let pad = keypad_layout(SheetRect::new(0, 0, 30, 19));
        assert_eq!(pad.key_at(15, 4), Some(Key::Digit(2)));
        assert_eq!(pad.key_at(5, 16), Some(Key::Decimal));
        assert_eq!(pad.key_at(25, 18), Some(Key::Backspace));
        assert_eq!(pad.key_at(15, 1), None);
    }

    #[test]
    fn test_list_offset_keeps_cursor_visible() {
        assert_eq!(list_offset(None, 5), 0);
        assert_eq!(list_offset(Some(4), 5), 0);
        assert_eq!(list_offset(Some(5), 5), 1);
        assert_eq!(list_offset(Some(10), 5), 6);
        assert_eq!(list_offset(Some(3), 0), 0);
    }

    #[test]
    fn test_hit_test_amount_sheet() {
        let screen = SheetRect::new(0, 0, 80, 40);
        let sheet = sheet_area(screen, ModalKind::Amount.height_fraction());
        let layout = sheet_layout(sheet);
        let pad = keypad_layout(layout.body);
        let two = pad.cells[0][1];

        assert_eq!(
            hit_test(screen, ModalKind::Amount, 0, two.x + two.width / 2, two.y),
            Some(SheetHit::Key(Key::Digit(2)))
        );
        assert_eq!(
            hit_test(screen, ModalKind::Amount, 0, layout.done.x, layout.done.y),
            Some(SheetHit::Done)
        );
        assert_eq!(
            hit_test(screen, ModalKind::Amount, 0, layout.cancel.x, layout.cancel.y),
            Some(SheetHit::Cancel)
        );
        assert_eq!(hit_test(screen, ModalKind::Amount, 0, 40, 2), Some(SheetHit::Backdrop));
        // border and read-out box
        assert_eq!(hit_test(screen, ModalKind::Amount, 0, 0, sheet.y + 5), None);
        assert_eq!(hit_test(screen, ModalKind::Amount, 0, 40, pad.input.y), None);
        assert_eq!(hit_test(screen, ModalKind::Amount, 0, 200, 2), None);
    }

    #[test]
    fn test_hit_test_list_rows() {
        let screen = SheetRect::new(0, 0, 80, 40);
        // Category: sheet rows 20..40, header 21, list from 22
        assert_eq!(hit_test(screen, ModalKind::Category, 0, 30, 22), Some(SheetHit::ListRow(0)));
        assert_eq!(hit_test(screen, ModalKind::Category, 0, 30, 24), Some(SheetHit::ListRow(2)));
        assert_eq!(hit_test(screen, ModalKind::Category, 3, 30, 24), Some(SheetHit::ListRow(5)));

        // App: sheet rows 10..40, header 11, search box 12..15, list from 15
        assert_eq!(hit_test(screen, ModalKind::App, 0, 30, 13), None);
        assert_eq!(hit_test(screen, ModalKind::App, 0, 30, 15), Some(SheetHit::ListRow(0)));

        // date spinner body has no click targets
        assert_eq!(hit_test(screen, ModalKind::StartDate, 0, 40, 35), None);
    }

    #[test]
    fn test_titles() {
        assert_eq!(ModalKind::Reminder.title(), "Remind Me");
        assert_eq!(ModalKind::StartDate.title(), "Start Date");
    }
}
