use egui::Rect;

/// Pointer distance from a viewport edge that arms the assistant.
pub const EDGE_THRESHOLD: f32 = 36.0;
/// Seconds between scroll nudges while armed.
pub const TICK_INTERVAL: f64 = 0.05;
/// Pixels per nudge.
pub const SCROLL_STEP: f32 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeDirection {
    Left,
    Right,
}

/// Nudges the grid's horizontal scroll offset while a drag hovers near a
/// viewport edge.
///
/// The assistant holds no timer of its own: the grid feeds it pointer moves
/// and a monotonic clock while a drag session exists, and calls `stop` on
/// every session exit path, so a cancelled drag cannot leave a tick running.
#[derive(Debug, Clone)]
pub struct AutoScroll {
    direction: Option<EdgeDirection>,
    last_tick: f64,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoScroll {
    pub fn new() -> Self {
        Self {
            direction: None,
            last_tick: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    /// Re-evaluate edge proximity. Called on every pointer move of an active
    /// drag; arming starts the tick train, leaving the edge zone stops it.
    pub fn update(&mut self, pointer_x: f32, viewport: Rect, now: f64) {
        let near_left = pointer_x <= viewport.left() + EDGE_THRESHOLD;
        let near_right = pointer_x >= viewport.right() - EDGE_THRESHOLD;
        let next = if near_left {
            Some(EdgeDirection::Left)
        } else if near_right {
            Some(EdgeDirection::Right)
        } else {
            None
        };
        if next.is_some() && self.direction.is_none() {
            // First nudge fires on the next tick call.
            self.last_tick = now - TICK_INTERVAL;
        }
        self.direction = next;
    }

    /// Advance the tick train: returns the new scroll offset, bounded by the
    /// content's natural scroll range. A disarmed or between-ticks call
    /// returns the offset unchanged.
    pub fn tick(
        &mut self,
        scroll_x: f32,
        viewport_width: f32,
        content_width: f32,
        now: f64,
    ) -> f32 {
        let Some(direction) = self.direction else {
            return scroll_x;
        };
        if now - self.last_tick < TICK_INTERVAL {
            return scroll_x;
        }
        self.last_tick = now;

        let max_scroll = (content_width - viewport_width).max(0.0);
        let step = match direction {
            EdgeDirection::Left => -SCROLL_STEP,
            EdgeDirection::Right => SCROLL_STEP,
        };
        (scroll_x + step).clamp(0.0, max_scroll)
    }

    /// Disarm immediately. Called on every drag session exit path.
    pub fn stop(&mut self) {
        self.direction = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, Rect};

    fn viewport() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(800.0, 600.0))
    }

    #[test]
    fn pointer_in_the_middle_never_arms() {
        let mut scroller = AutoScroll::new();
        scroller.update(400.0, viewport(), 0.0);
        assert!(!scroller.is_active());
        assert_eq!(scroller.tick(100.0, 800.0, 2000.0, 10.0), 100.0);
    }

    #[test]
    fn near_edge_ticks_at_the_fixed_interval() {
        let mut scroller = AutoScroll::new();
        scroller.update(795.0, viewport(), 1.0);
        assert!(scroller.is_active());

        // Armed: the first tick fires immediately.
        let x1 = scroller.tick(100.0, 800.0, 2000.0, 1.0);
        assert_eq!(x1, 100.0 + SCROLL_STEP);
        // Too soon for another.
        assert_eq!(scroller.tick(x1, 800.0, 2000.0, 1.0 + TICK_INTERVAL / 2.0), x1);
        // Interval elapsed.
        assert_eq!(
            scroller.tick(x1, 800.0, 2000.0, 1.0 + TICK_INTERVAL),
            x1 + SCROLL_STEP
        );
    }

    #[test]
    fn scrolling_never_leaves_the_content_bounds() {
        let mut scroller = AutoScroll::new();

        scroller.update(2.0, viewport(), 0.0);
        assert_eq!(scroller.tick(5.0, 800.0, 2000.0, 0.0), 0.0);

        scroller.update(799.0, viewport(), 1.0);
        assert_eq!(scroller.tick(1195.0, 800.0, 2000.0, 1.0), 1200.0);

        // Content narrower than the viewport cannot scroll at all.
        scroller.update(799.0, viewport(), 2.0);
        assert_eq!(scroller.tick(0.0, 800.0, 500.0, 2.0), 0.0);
    }

    #[test]
    fn stop_disarms_within_one_tick() {
        let mut scroller = AutoScroll::new();
        scroller.update(799.0, viewport(), 0.0);
        assert!(scroller.is_active());
        scroller.stop();
        assert!(!scroller.is_active());
        assert_eq!(scroller.tick(100.0, 800.0, 2000.0, 60.0), 100.0);
    }

    #[test]
    fn leaving_the_edge_zone_disarms() {
        let mut scroller = AutoScroll::new();
        scroller.update(799.0, viewport(), 0.0);
        assert!(scroller.is_active());
        scroller.update(400.0, viewport(), 0.1);
        assert!(!scroller.is_active());
    }
}
