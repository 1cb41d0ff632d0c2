//! Screen geometry for dirpilot.
//!
//! [ViewportGeometry] is derived from the terminal area on every frame and never stored,
//! so a resize only needs a redraw.

use ratatui::layout::Rect;

/// Smallest terminal that still gets a file list.
pub const MIN_HEIGHT: u16 = 5;
pub const MIN_WIDTH: u16 = 20;

pub const PERM_WIDTH: usize = 10;
pub const SIZE_WIDTH: usize = 7;
pub const DATE_WIDTH: usize = 12;
pub const MIN_NAME_WIDTH: usize = 10;

/// Where everything goes on screen for one frame.
///
/// Row 0 is the header, the last row is the footer and the bordered list box fills
/// the rows in between. Column offsets are relative to the inside of the list box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportGeometry {
    pub header: Rect,
    pub list_box: Rect,
    pub list_inner: Rect,
    pub footer: Rect,
    pub name_width: usize,
    pub perm_x: usize,
    pub size_x: usize,
    pub date_x: usize,
}

impl ViewportGeometry {
    /// Computes the geometry for `area`, or `None` if the terminal is too small.
    pub fn compute(area: Rect) -> Option<Self> {
        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            return None;
        }

        let header = Rect::new(area.x, area.y, area.width, 1);
        let footer = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        let list_box = Rect::new(area.x, area.y + 1, area.width, area.height - 2);
        let list_inner = Rect::new(
            list_box.x + 1,
            list_box.y + 1,
            list_box.width - 2,
            list_box.height - 2,
        );

        let content_width = list_inner.width as usize;
        let name_width = content_width
            .saturating_sub(PERM_WIDTH + SIZE_WIDTH + DATE_WIDTH + 3)
            .max(MIN_NAME_WIDTH);
        let perm_x = name_width + 1;
        let size_x = perm_x + PERM_WIDTH + 1;
        let date_x = size_x + SIZE_WIDTH + 1;

        Some(Self {
            header,
            list_box,
            list_inner,
            footer,
            name_width,
            perm_x,
            size_x,
            date_x,
        })
    }

    /// Number of entry rows that fit in the list box.
    #[inline]
    pub fn list_height(&self) -> usize {
        self.list_inner.height as usize
    }

    #[inline]
    pub fn content_width(&self) -> usize {
        self.list_inner.width as usize
    }

    /// A column is drawn only if it fits completely.
    pub fn shows_perm(&self) -> bool {
        self.perm_x + PERM_WIDTH <= self.content_width()
    }

    pub fn shows_size(&self) -> bool {
        self.size_x + SIZE_WIDTH <= self.content_width()
    }

    pub fn shows_date(&self) -> bool {
        self.date_x + DATE_WIDTH <= self.content_width()
    }

    /// Indices of the entries drawn for a listing of `len` entries scrolled to `scroll`.
    pub fn visible_range(&self, scroll: usize, len: usize) -> std::ops::Range<usize> {
        let start = scroll.min(len);
        let end = (scroll + self.list_height()).min(len);
        start..end
    }
}
