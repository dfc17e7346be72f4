//! Scroll state for the form, preview and export panes.
//!
//! A [`Viewport`] is a window of `height` rows over a list of
//! `total_lines` rows. The offset is kept inside the list at all times.

use std::ops::Range;

/// Visible window over a list of rows.
///
/// ```
/// use mailform::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 10, 40);
/// vp.scroll_down(5);
/// assert_eq!(vp.visible_range(), 5..15);
///
/// vp.scroll_to_show(30, 31);
/// assert_eq!(vp.visible_range(), 22..32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    /// First visible row.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Rows currently on screen, clamped to the list.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height as usize).min(self.total_lines);
        self.offset.min(end)..end
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll the least amount needed to bring rows `first..=last` on screen.
    ///
    /// When the span is taller than the viewport its first row wins.
    pub fn scroll_to_show(&mut self, first: usize, last: usize) {
        let height = self.height as usize;
        if height == 0 {
            return;
        }
        if last >= self.offset + height {
            self.offset = (last + 1).saturating_sub(height);
        }
        if first < self.offset {
            self.offset = first;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the row count, e.g. after the modified template changed.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}
