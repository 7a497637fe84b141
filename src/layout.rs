//! Page geometry and the pagination driver.
//!
//! The driver owns the single vertical cursor used while assembling the
//! document.  Before any block of known height is emitted the caller asks
//! [`Paginator::ensure_space`]; if the block would cross into the footer
//! reserve, a new page is started and the cursor resets to the top margin.

/// Fixed page geometry, in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSpec {
    pub width: f64,
    pub height: f64,
    /// Left/right content margin and the cursor start on the first page.
    pub margin: f64,
    /// Space at the bottom of every page kept free for the footer.
    pub footer_reserve: f64,
    /// Cursor position after a page break.
    pub top_after_break: f64,
}

impl PageSpec {
    /// Portrait A4 with the margins the report was designed around.
    pub const A4: PageSpec = PageSpec {
        width: 210.0,
        height: 297.0,
        margin: 20.0,
        footer_reserve: 30.0,
        top_after_break: 30.0,
    };

    /// Width available to content between the side margins.
    pub fn content_width(&self) -> f64 {
        self.width - self.margin * 2.0
    }

    /// Height usable by content on a continuation page.
    pub fn printable_height(&self) -> f64 {
        self.height - self.footer_reserve - self.top_after_break
    }
}

/// Receiver of page-break requests.  [`crate::surface::Surface`] implements
/// this; tests substitute a counter.
pub trait PageSink {
    fn begin_page(&mut self);
}

/// The vertical cursor plus the page-break decision logic.
#[derive(Clone, Debug)]
pub struct Paginator {
    spec: PageSpec,
    y: f64,
}

impl Paginator {
    pub fn new(spec: PageSpec) -> Self {
        Self { spec, y: spec.margin }
    }

    pub fn spec(&self) -> &PageSpec {
        &self.spec
    }

    /// Current cursor position, measured from the top of the page.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Moves the cursor to an absolute position on the current page.
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Advances the cursor past an emitted block.
    pub fn advance(&mut self, height: f64) {
        self.y += height;
    }

    /// Starts a new page if a block of `required` height would not fit above
    /// the footer reserve.  Returns whether a break occurred; the return
    /// value is diagnostic only.
    pub fn ensure_space(&mut self, sink: &mut impl PageSink, required: f64) -> bool {
        if self.y + required > self.spec.height - self.spec.footer_reserve {
            sink.begin_page();
            self.y = self.spec.top_after_break;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSink {
        pages: usize,
    }

    impl PageSink for CountingSink {
        fn begin_page(&mut self) {
            self.pages += 1;
        }
    }

    fn emit_blocks(block_height: f64, count: usize) -> usize {
        let mut sink = CountingSink { pages: 0 };
        let mut paginator = Paginator::new(PageSpec::A4);
        paginator.set_y(PageSpec::A4.top_after_break);
        for _ in 0..count {
            paginator.ensure_space(&mut sink, block_height);
            paginator.advance(block_height);
        }
        sink.pages
    }

    #[test]
    fn no_break_while_content_fits() {
        assert_eq!(emit_blocks(8.0, 3), 0);
    }

    #[test]
    fn break_count_matches_total_height() {
        // 40 blocks of 10mm; the 237mm printable band on A4 holds 23 of
        // them, so the run needs ceil(40 / 23) - 1 = 1 break.
        let block = 10.0;
        let count = 40;
        let printable = PageSpec::A4.printable_height();
        let per_page = (printable / block).floor();
        let expected = ((count as f64) / per_page).ceil() as usize - 1;
        assert_eq!(emit_blocks(block, count), expected);
    }

    #[test]
    fn cursor_resets_to_top_margin_after_break() {
        let mut sink = CountingSink { pages: 0 };
        let mut paginator = Paginator::new(PageSpec::A4);
        paginator.set_y(260.0);
        let broke = paginator.ensure_space(&mut sink, 20.0);
        assert!(broke);
        assert_eq!(paginator.y(), PageSpec::A4.top_after_break);
    }

    #[test]
    fn block_exactly_filling_the_page_does_not_break() {
        let mut sink = CountingSink { pages: 0 };
        let mut paginator = Paginator::new(PageSpec::A4);
        paginator.set_y(PageSpec::A4.top_after_break);
        let exact = PageSpec::A4.height - PageSpec::A4.footer_reserve - paginator.y();
        assert!(!paginator.ensure_space(&mut sink, exact));
        assert_eq!(sink.pages, 0);
    }
}
