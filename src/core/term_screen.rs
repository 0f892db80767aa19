// (C) 2025 - Enzo Lombardi

//! Private screen owned by the embedded [`crate::core::terminal_emulator::TerminalEmulator`].
//!
//! Mirrors the logical/physical dual-buffer diffing shape of [`crate::terminal::Terminal`], but
//! over [`TermCell`] instead of the chrome [`crate::core::draw::Cell`], and adds the
//! terminal-emulator-specific state a plain compositor screen doesn't need: a scrolling region,
//! a primary/alternate screen pair (DECSET 1049), and a scrollback ring buffer.

use super::term_cell::TermCell;
use std::collections::VecDeque;

/// Cursor shape as selected by DECSCUSR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Block,
    Underline,
    Bar,
}

#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    pub row: u16,
    pub col: u16,
    pub visible: bool,
    pub shape: CursorShape,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            row: 0,
            col: 0,
            visible: true,
            shape: CursorShape::Block,
        }
    }
}

/// A single rows×cols grid of [`TermCell`], used for both the primary and alternate screens.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: u16,
    cols: u16,
    cells: Vec<TermCell>,
}

impl Grid {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            cells: vec![TermCell::blank(); rows as usize * cols as usize],
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    fn index(&self, row: u16, col: u16) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    pub fn get(&self, row: u16, col: u16) -> Option<&TermCell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, row: u16, col: u16, cell: TermCell) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = cell;
        }
    }

    pub fn row_slice(&self, row: u16) -> &[TermCell] {
        let start = row as usize * self.cols as usize;
        &self.cells[start..start + self.cols as usize]
    }

    pub fn row_slice_mut(&mut self, row: u16) -> &mut [TermCell] {
        let cols = self.cols as usize;
        let start = row as usize * cols;
        &mut self.cells[start..start + cols]
    }

    pub fn clear(&mut self) {
        for c in &mut self.cells {
            *c = TermCell::blank();
        }
    }

    pub fn resize(&mut self, rows: u16, cols: u16) {
        let mut new_cells = vec![TermCell::blank(); rows as usize * cols as usize];
        let copy_rows = rows.min(self.rows);
        let copy_cols = cols.min(self.cols);
        for r in 0..copy_rows {
            for c in 0..copy_cols {
                let old_idx = r as usize * self.cols as usize + c as usize;
                let new_idx = r as usize * cols as usize + c as usize;
                new_cells[new_idx] = self.cells[old_idx].clone();
            }
        }
        self.rows = rows;
        self.cols = cols;
        self.cells = new_cells;
    }

    /// Scrolls rows `top..=bottom` (inclusive, 0-based) up by `n`, filling the bottom with blanks.
    /// The row that scrolls off the top of the region is returned for each shifted row, in
    /// top-to-bottom order, so the caller can push it onto the scrollback.
    pub fn scroll_up(&mut self, top: u16, bottom: u16, n: u16) -> Vec<Vec<TermCell>> {
        let mut scrolled_off = Vec::new();
        for _ in 0..n {
            if top > bottom || bottom >= self.rows {
                break;
            }
            scrolled_off.push(self.row_slice(top).to_vec());
            for r in top..bottom {
                let next = self.row_slice(r + 1).to_vec();
                self.row_slice_mut(r).clone_from_slice(&next);
            }
            for c in self.row_slice_mut(bottom) {
                *c = TermCell::blank();
            }
        }
        scrolled_off
    }

    /// Scrolls rows `top..=bottom` down by `n`, filling the top with blanks.
    pub fn scroll_down(&mut self, top: u16, bottom: u16, n: u16) {
        for _ in 0..n {
            if top > bottom || bottom >= self.rows {
                break;
            }
            let mut r = bottom;
            while r > top {
                let prev = self.row_slice(r - 1).to_vec();
                self.row_slice_mut(r).clone_from_slice(&prev);
                r -= 1;
            }
            for c in self.row_slice_mut(top) {
                *c = TermCell::blank();
            }
        }
    }
}

/// The terminal emulator's private screen: primary/alternate grid pair, cursor, scrolling
/// region, and scrollback. See `SPEC_FULL.md` §4.3/§3.
pub struct TermScreen {
    primary: Grid,
    alternate: Grid,
    using_alternate: bool,
    pub cursor: Cursor,
    /// (top, bottom), 0-based inclusive, clamped to the grid on resize.
    pub scroll_region: (u16, u16),
    scrollback: VecDeque<Vec<TermCell>>,
    scrollback_cap: usize,
    dirty: bool,
}

impl TermScreen {
    pub fn new(rows: u16, cols: u16, scrollback_cap: usize) -> Self {
        Self {
            primary: Grid::new(rows, cols),
            alternate: Grid::new(rows, cols),
            using_alternate: false,
            cursor: Cursor::default(),
            scroll_region: (0, rows.saturating_sub(1)),
            scrollback: VecDeque::new(),
            scrollback_cap,
            dirty: true,
        }
    }

    pub fn rows(&self) -> u16 {
        self.active().rows()
    }

    pub fn cols(&self) -> u16 {
        self.active().cols()
    }

    fn active(&self) -> &Grid {
        if self.using_alternate { &self.alternate } else { &self.primary }
    }

    fn active_mut(&mut self) -> &mut Grid {
        if self.using_alternate { &mut self.alternate } else { &mut self.primary }
    }

    pub fn get(&self, row: u16, col: u16) -> Option<&TermCell> {
        self.active().get(row, col)
    }

    pub fn put(&mut self, row: u16, col: u16, cell: TermCell) {
        self.active_mut().set(row, col, cell);
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        self.active_mut().clear();
        self.dirty = true;
    }

    pub fn resize(&mut self, rows: u16, cols: u16) {
        self.primary.resize(rows, cols);
        self.alternate.resize(rows, cols);
        let (top, bottom) = self.scroll_region;
        self.scroll_region = (top.min(rows.saturating_sub(1)), bottom.min(rows.saturating_sub(1)));
        self.cursor.row = self.cursor.row.min(rows.saturating_sub(1));
        self.cursor.col = self.cursor.col.min(cols.saturating_sub(1));
        self.dirty = true;
    }

    /// DECSET 1049: switch to the alternate screen, clearing it first.
    pub fn enter_alternate_screen(&mut self) {
        if !self.using_alternate {
            self.alternate.clear();
            self.using_alternate = true;
            self.dirty = true;
        }
    }

    /// Switching back restores the primary screen; scrollback is untouched either way.
    pub fn leave_alternate_screen(&mut self) {
        if self.using_alternate {
            self.using_alternate = false;
            self.dirty = true;
        }
    }

    pub fn is_alternate(&self) -> bool {
        self.using_alternate
    }

    /// Scrolls the current scrolling region up by `n` lines. Lines that scroll off the top are
    /// pushed onto scrollback, but only when rendering the primary screen and the region spans
    /// the whole screen from the top (matches real terminals: scrollback only accumulates full
    /// screen-width line scrolls, not partial regions below row 0).
    pub fn scroll_up(&mut self, n: u16) {
        let (top, bottom) = self.scroll_region;
        let push_to_scrollback = !self.using_alternate && top == 0;
        let scrolled_off = self.active_mut().scroll_up(top, bottom, n);
        if push_to_scrollback {
            for line in scrolled_off {
                self.scrollback.push_back(line);
                while self.scrollback.len() > self.scrollback_cap {
                    self.scrollback.pop_front();
                }
            }
        }
        self.dirty = true;
    }

    pub fn scroll_down(&mut self, n: u16) {
        let (top, bottom) = self.scroll_region;
        self.active_mut().scroll_down(top, bottom, n);
        self.dirty = true;
    }

    pub fn scrollback_lines(&self) -> impl Iterator<Item = &Vec<TermCell>> {
        self.scrollback.iter()
    }

    pub fn scrollback_cap(&self) -> usize {
        self.scrollback_cap
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::term_cell::TermCellContent;

    #[test]
    fn put_then_get_round_trips() {
        let mut screen = TermScreen::new(24, 80, 1000);
        let cell = TermCell::with_char('A', Default::default(), Default::default(), Default::default());
        screen.put(0, 0, cell.clone());
        assert_eq!(screen.get(0, 0), Some(&cell));
    }

    #[test]
    fn scroll_up_pushes_to_scrollback_from_top_region() {
        let mut screen = TermScreen::new(3, 2, 10);
        screen.put(0, 0, TermCell::with_char('a', Default::default(), Default::default(), Default::default()));
        screen.scroll_up(1);
        assert_eq!(screen.scrollback_lines().count(), 1);
        let line = screen.scrollback_lines().next().unwrap();
        assert_eq!(line[0].content, TermCellContent::Char('a'));
    }

    #[test]
    fn alternate_screen_switch_leaves_scrollback_untouched() {
        let mut screen = TermScreen::new(3, 2, 10);
        screen.scroll_up(1);
        assert_eq!(screen.scrollback_lines().count(), 1);
        screen.enter_alternate_screen();
        screen.clear();
        screen.leave_alternate_screen();
        assert_eq!(screen.scrollback_lines().count(), 1);
    }

    #[test]
    fn resize_clamps_cursor_and_region() {
        let mut screen = TermScreen::new(24, 80, 10);
        screen.cursor.row = 23;
        screen.cursor.col = 79;
        screen.resize(10, 40);
        assert_eq!(screen.cursor.row, 9);
        assert_eq!(screen.cursor.col, 39);
    }
}
