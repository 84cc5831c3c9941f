use iced::widget::scrollable;

/// Fraction of the visible width one arrow press scrolls by.
pub const PAGE_FRACTION: f32 = 0.8;
/// Tolerance before the right arrow disappears, so sub-pixel remainders don't keep it up.
pub const END_SLACK: f32 = 10.0;
/// Content moves this many pixels per pixel of pointer travel while dragging.
pub const DRAG_SPEED: f32 = 2.0;
/// Pointer travel under which a press and release still counts as a click.
pub const CLICK_SLOP: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Which arrows a row shows for its current scroll metrics.
///
/// Rows start with no arrows. The scrollable only reports a viewport once its
/// content overflows, so a row that fits never hears back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollViewState {
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
}

impl ScrollViewState {
    pub fn measure(offset: f32, content_width: f32, viewport_width: f32) -> Self {
        ScrollViewState {
            can_scroll_left: offset > 0.0,
            can_scroll_right: offset < content_width - viewport_width - END_SLACK,
        }
    }
}

pub fn page_delta(direction: ScrollDirection, viewport_width: f32) -> f32 {
    let distance = viewport_width * PAGE_FRACTION;
    match direction {
        ScrollDirection::Left => -distance,
        ScrollDirection::Right => distance,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragScroll {
    start_x: f32,
    start_offset: f32,
    travel: f32,
}

impl DragScroll {
    pub fn begin(x: f32, offset: f32) -> Self {
        DragScroll {
            start_x: x,
            start_offset: offset,
            travel: 0.0,
        }
    }

    /// Scroll offset for the pointer at `x`, clamped to `0..=max_offset`.
    pub fn offset_at(&mut self, x: f32, max_offset: f32) -> f32 {
        let walk = (x - self.start_x) * DRAG_SPEED;
        self.travel = self.travel.max((x - self.start_x).abs());
        (self.start_offset - walk).clamp(0.0, max_offset.max(0.0))
    }

    pub fn is_click(&self) -> bool {
        self.travel < CLICK_SLOP
    }
}

/// Per-row scroll bookkeeping, fed by the row's scroll and pointer callbacks.
#[derive(Debug, Clone)]
pub struct RowScroller {
    id: scrollable::Id,
    view: ScrollViewState,
    offset: f32,
    content_width: f32,
    viewport_width: f32,
    pointer_x: f32,
    drag: Option<DragScroll>,
}

impl RowScroller {
    pub fn new(index: usize) -> Self {
        RowScroller {
            id: scrollable::Id::new(format!("content-row-{}", index)),
            view: ScrollViewState::default(),
            offset: 0.0,
            content_width: 0.0,
            viewport_width: 0.0,
            pointer_x: 0.0,
            drag: None,
        }
    }

    #[inline]
    pub fn id(&self) -> scrollable::Id {
        self.id.clone()
    }

    #[inline]
    pub fn view(&self) -> ScrollViewState {
        self.view
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn scrolled(&mut self, offset: f32, content_width: f32, viewport_width: f32) {
        self.offset = offset;
        self.content_width = content_width;
        self.viewport_width = viewport_width;
        self.view = ScrollViewState::measure(offset, content_width, viewport_width);
    }

    pub fn page(&self, direction: ScrollDirection) -> iced::Task<super::HomeMessage> {
        scrollable::scroll_by(
            self.id(),
            scrollable::AbsoluteOffset {
                x: page_delta(direction, self.viewport_width),
                y: 0.0,
            },
        )
    }

    pub fn press(&mut self) {
        self.drag = Some(DragScroll::begin(self.pointer_x, self.offset));
    }

    /// Records the pointer and, while dragging, returns the offset to scroll to.
    pub fn pointer_moved(&mut self, x: f32) -> Option<f32> {
        self.pointer_x = x;
        let max_offset = self.content_width - self.viewport_width;
        self.drag.as_mut().map(|drag| drag.offset_at(x, max_offset))
    }

    /// Ends a drag. Returns whether it was short enough to be a click.
    pub fn release(&mut self) -> bool {
        self.drag.take().is_some_and(|drag| drag.is_click())
    }

    pub fn scroll_to(&self, offset: f32) -> iced::Task<super::HomeMessage> {
        scrollable::scroll_to(self.id(), scrollable::AbsoluteOffset { x: offset, y: 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_follow_metrics() {
        assert_eq!(
            ScrollViewState::measure(0.0, 2000.0, 800.0),
            ScrollViewState {
                can_scroll_left: false,
                can_scroll_right: true
            }
        );
        assert_eq!(
            ScrollViewState::measure(600.0, 2000.0, 800.0),
            ScrollViewState {
                can_scroll_left: true,
                can_scroll_right: true
            }
        );
    }

    #[test]
    fn right_arrow_hides_within_slack() {
        let state = ScrollViewState::measure(1191.0, 2000.0, 800.0);
        assert!(state.can_scroll_left);
        assert!(!state.can_scroll_right);
    }

    #[test]
    fn content_narrower_than_viewport_has_no_arrows() {
        assert_eq!(
            ScrollViewState::measure(0.0, 500.0, 800.0),
            ScrollViewState {
                can_scroll_left: false,
                can_scroll_right: false
            }
        );
    }

    #[test]
    fn unmeasured_row_shows_no_arrows() {
        let mut scroller = RowScroller::new(2);
        assert_eq!(scroller.view(), ScrollViewState::default());
        assert!(!scroller.view().can_scroll_right);

        scroller.scrolled(0.0, 2000.0, 800.0);
        assert!(scroller.view().can_scroll_right);
    }

    #[test]
    fn page_is_most_of_the_viewport() {
        assert_eq!(page_delta(ScrollDirection::Right, 1000.0), 800.0);
        assert_eq!(page_delta(ScrollDirection::Left, 1000.0), -800.0);
    }

    #[test]
    fn drag_moves_content_twice_as_far() {
        let mut drag = DragScroll::begin(300.0, 400.0);

        assert_eq!(drag.offset_at(250.0, 1000.0), 500.0);
        assert_eq!(drag.offset_at(350.0, 1000.0), 300.0);
        assert_eq!(drag.offset_at(0.0, 1000.0), 1000.0);
        assert_eq!(drag.offset_at(600.0, 1000.0), 0.0);
        assert!(!drag.is_click());
    }

    #[test]
    fn tiny_drag_is_a_click() {
        let mut scroller = RowScroller::new(0);
        scroller.scrolled(0.0, 2000.0, 800.0);
        scroller.pointer_moved(100.0);
        scroller.press();

        assert_eq!(scroller.pointer_moved(102.0), Some(0.0));
        assert!(scroller.release());
        assert!(!scroller.is_dragging());
        assert_eq!(scroller.pointer_moved(50.0), None);
    }

    #[test]
    fn release_without_press_is_not_a_click() {
        let mut scroller = RowScroller::new(1);
        assert!(!scroller.release());
    }
}
