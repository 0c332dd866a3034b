use crate::scene::host::{MeshSink, Raycaster, SceneHost};
use crate::table::{PointerOutcome, Table};
use nalgebra::Point2;

/// Pointer state polled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    /// `None` when the pointer is outside the viewport.
    pub position: Option<Point2<f32>>,
    pub primary_down: bool,
}

impl PointerSample {
    pub fn new(position: Option<Point2<f32>>, primary_down: bool) -> Self {
        Self {
            position,
            primary_down,
        }
    }
}

/// What happened to the table during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub pointer: PointerOutcome,
    pub pressed: bool,
    pub released: bool,
}

/// Turns polled pointer samples into table events.
///
/// Movement is delivered before button edges, so a press lands on the handle
/// hovered in the same frame.
#[derive(Debug, Default)]
pub struct PointerTracker {
    last_primary_down: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame<H>(&mut self, sample: PointerSample, table: &mut Table, host: &mut H) -> FrameReport
    where
        H: SceneHost + MeshSink + Raycaster,
    {
        let pointer = match sample.position {
            Some(position) => table.on_pointer_moved(position, host),
            None => table.on_pointer_left(host),
        };

        let mut report = FrameReport {
            pointer,
            pressed: false,
            released: false,
        };
        if sample.primary_down && !self.last_primary_down {
            report.pressed = table.on_button_down();
        } else if !sample.primary_down && self.last_primary_down {
            report.released = table.on_button_up();
        }
        self.last_primary_down = sample.primary_down;

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::Config;
    use crate::scene::loader::init_scene;
    use crate::table::Corner;
    use nalgebra::Point3;

    #[test]
    fn press_lands_on_handle_hovered_in_the_same_frame() {
        let mut ctx = init_scene(&Config::default()).unwrap();
        let over_ne = ctx.world.world_to_screen(&Point3::new(1.0, 0.775, 0.75));

        let report = ctx.frame(PointerSample::new(over_ne, true));

        assert!(matches!(report.pointer, PointerOutcome::Hovered(_)));
        assert!(report.pressed);
        assert!(ctx.table.interaction().is_stretching());
    }

    #[test]
    fn leaving_the_viewport_clears_the_hover() {
        let mut ctx = init_scene(&Config::default()).unwrap();
        let over_ne = ctx.world.world_to_screen(&Point3::new(1.0, 0.775, 0.75));
        ctx.frame(PointerSample::new(over_ne, false));
        let handle = ctx.table.handle(Corner::Northeast);
        assert!(ctx.world.object(handle).unwrap().visible);

        let report = ctx.frame(PointerSample::new(None, false));
        assert!(matches!(report.pointer, PointerOutcome::Hovered(c) if c.hide == Some(Corner::Northeast)));
        assert!(!ctx.world.object(handle).unwrap().visible);

        // Pressing outside must not start a stretch.
        assert!(!ctx.frame(PointerSample::new(None, true)).pressed);
        assert!(!ctx.table.interaction().is_stretching());

        // Coming back to the same pixel hovers again.
        ctx.frame(PointerSample::new(over_ne, false));
        assert!(ctx.world.object(handle).unwrap().visible);
    }

    #[test]
    fn stretch_survives_leaving_the_viewport() {
        let mut ctx = init_scene(&Config::default()).unwrap();
        let over_ne = ctx.world.world_to_screen(&Point3::new(1.0, 0.775, 0.75));
        ctx.frame(PointerSample::new(over_ne, true));

        let report = ctx.frame(PointerSample::new(None, true));
        assert_eq!(report.pointer, PointerOutcome::Unchanged);
        assert!(ctx.table.interaction().is_stretching());
    }

    #[test]
    fn held_button_is_a_single_edge() {
        let mut ctx = init_scene(&Config::default()).unwrap();
        let empty = Some(Point2::new(1.0, 1.0));

        assert!(!ctx.frame(PointerSample::new(empty, true)).pressed);
        let report = ctx.frame(PointerSample::new(empty, true));
        assert!(!report.pressed && !report.released);
        assert!(!ctx.frame(PointerSample::new(empty, false)).released);
    }
}
