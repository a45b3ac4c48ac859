//! Scroll window over the product list, plus the sentinel predicate that
//! advises the pager to fetch more.

/// Tracks the portion of the product list currently on screen and keeps the
/// selected row within bounds.
#[derive(Debug, Default)]
pub struct Viewport {
    pub scroll_offset: usize,
    pub selected_index: usize,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move selection up one row.
    pub fn up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down one row.
    pub fn down(&mut self, total_items: usize) {
        if self.selected_index + 1 < total_items {
            self.selected_index += 1;
        }
    }

    /// Clamp the selection after the list shrinks (query change, refinement).
    pub fn clamp(&mut self, total_items: usize) {
        if total_items == 0 {
            self.selected_index = 0;
            self.scroll_offset = 0;
        } else if self.selected_index >= total_items {
            self.selected_index = total_items - 1;
        }
    }

    /// Adjust the scroll offset so the selected row stays visible.
    pub fn ensure_visible(&mut self, view_height: usize) {
        if view_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + view_height {
            self.scroll_offset = self.selected_index + 1 - view_height;
        }
    }

    /// Scroll one extra row when the selection sits on the last item, so the
    /// sentinel row is on screen rather than just below it.
    pub fn reveal_sentinel(&mut self, total_items: usize, view_height: usize) {
        if view_height == 0 {
            return;
        }
        if total_items > 0
            && self.selected_index + 1 == total_items
            && total_items + 1 > view_height
        {
            self.scroll_offset = total_items + 1 - view_height;
        }
    }

    /// Whether the sentinel row (the slot just past the last item) falls
    /// inside the visible window, or the selection has reached the last
    /// item. This is the "scrolled to the bottom" signal that advises a
    /// further page load; the pager's own guard stays authoritative, so
    /// firing repeatedly is harmless.
    pub fn sentinel_visible(&self, total_items: usize, view_height: usize) -> bool {
        total_items < self.scroll_offset + view_height || self.selected_index + 1 >= total_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_down_and_visibility() {
        let mut vp = Viewport::new();
        vp.down(10);
        assert_eq!(vp.selected_index, 1);
        vp.up();
        assert_eq!(vp.selected_index, 0);

        vp.selected_index = 15;
        vp.ensure_visible(5);
        assert!(vp.scroll_offset <= vp.selected_index);
        assert!(vp.selected_index < vp.scroll_offset + 5);
    }

    #[test]
    fn down_stops_at_the_last_item() {
        let mut vp = Viewport::new();
        for _ in 0..10 {
            vp.down(3);
        }
        assert_eq!(vp.selected_index, 2);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut vp = Viewport {
            scroll_offset: 10,
            selected_index: 25,
        };
        vp.clamp(5);
        assert_eq!(vp.selected_index, 4);

        vp.clamp(0);
        assert_eq!(vp.selected_index, 0);
        assert_eq!(vp.scroll_offset, 0);
    }

    #[test]
    fn sentinel_hidden_while_items_fill_the_window() {
        let vp = Viewport::new();
        // 30 items, 10 visible starting at 0: the sentinel (index 30) is
        // well below the window.
        assert!(!vp.sentinel_visible(30, 10));
    }

    #[test]
    fn sentinel_visible_once_scrolled_to_the_bottom() {
        let vp = Viewport {
            scroll_offset: 21,
            selected_index: 29,
        };
        assert!(vp.sentinel_visible(30, 10));
    }

    #[test]
    fn sentinel_visible_for_a_short_list() {
        let vp = Viewport::new();
        assert!(vp.sentinel_visible(3, 10));
        assert!(vp.sentinel_visible(0, 10));
    }

    #[test]
    fn selecting_the_last_item_counts_as_reaching_the_sentinel() {
        let vp = Viewport {
            scroll_offset: 20,
            selected_index: 29,
        };
        assert!(vp.sentinel_visible(30, 10));
    }

    #[test]
    fn reveal_sentinel_scrolls_one_extra_row() {
        let mut vp = Viewport {
            scroll_offset: 20,
            selected_index: 29,
        };
        vp.reveal_sentinel(30, 10);
        assert_eq!(vp.scroll_offset, 21);

        // No adjustment while everything already fits.
        let mut vp = Viewport::new();
        vp.selected_index = 2;
        vp.reveal_sentinel(3, 10);
        assert_eq!(vp.scroll_offset, 0);
    }

    #[test]
    fn reveal_sentinel_ignores_an_empty_window() {
        // A terminal too short to show the list reports height 0. The offset
        // must stay within the list, or slicing the visible range panics.
        let mut vp = Viewport {
            scroll_offset: 0,
            selected_index: 4,
        };
        vp.reveal_sentinel(5, 0);
        assert_eq!(vp.scroll_offset, 0);
    }
}
