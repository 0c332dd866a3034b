use crate::table::corners::Corner;
use log::debug;
use nalgebra::Point2;

/// Where the pointer interaction currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Hover(Corner),
    Stretching(Corner),
}

/// Visibility changes a hover update asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverChange {
    pub hide: Option<Corner>,
    pub show: Option<Corner>,
}

impl HoverChange {
    pub fn is_empty(&self) -> bool {
        self.hide.is_none() && self.show.is_none()
    }
}

/// Hover/drag bookkeeping for one table.
#[derive(Debug, Clone)]
pub struct InteractionState {
    state: DragState,
    last_pointer: Point2<f32>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionState {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            // Guarantees the first real sample registers as a move.
            last_pointer: Point2::new(f32::MAX, f32::MAX),
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Handle under the pointer or being dragged.
    pub fn active_handle(&self) -> Option<Corner> {
        match self.state {
            DragState::Idle => None,
            DragState::Hover(c) | DragState::Stretching(c) => Some(c),
        }
    }

    pub fn is_stretching(&self) -> bool {
        matches!(self.state, DragState::Stretching(_))
    }

    pub fn last_pointer(&self) -> Point2<f32> {
        self.last_pointer
    }

    /// Records `pointer`; false if it equals the previous sample.
    pub fn pointer_changed(&mut self, pointer: Point2<f32>) -> bool {
        if pointer == self.last_pointer {
            return false;
        }
        self.last_pointer = pointer;
        true
    }

    /// Forgets the last sample so re-entering at the same spot counts as a move.
    pub fn pointer_left(&mut self) {
        self.last_pointer = Point2::new(f32::MAX, f32::MAX);
    }

    /// Applies a hover hit-test result. Ignored while stretching.
    pub fn hover(&mut self, hit: Option<Corner>) -> HoverChange {
        let previous = match self.state {
            DragState::Stretching(_) => return HoverChange::default(),
            DragState::Idle => None,
            DragState::Hover(c) => Some(c),
        };
        if previous == hit {
            return HoverChange::default();
        }

        self.state = match hit {
            Some(c) => DragState::Hover(c),
            None => DragState::Idle,
        };
        debug!("Hover {:?} -> {:?}", previous, hit);
        HoverChange {
            hide: previous,
            show: hit,
        }
    }

    /// Starts stretching when a handle is hovered. Returns true on transition.
    pub fn press(&mut self) -> bool {
        if let DragState::Hover(c) = self.state {
            self.state = DragState::Stretching(c);
            debug!("Stretching {:?}", c);
            return true;
        }
        false
    }

    /// Ends stretching, keeping the handle hovered. Returns true on transition.
    pub fn release(&mut self) -> bool {
        if let DragState::Stretching(c) = self.state {
            self.state = DragState::Hover(c);
            debug!("Released {:?}", c);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_pointer_samples_are_ignored() {
        let mut s = InteractionState::new();
        assert!(s.pointer_changed(Point2::new(1.0, 2.0)));
        assert!(!s.pointer_changed(Point2::new(1.0, 2.0)));
        assert!(s.pointer_changed(Point2::new(1.0, 3.0)));
    }

    #[test]
    fn hover_switches_between_handles() {
        let mut s = InteractionState::new();
        assert_eq!(s.hover(None), HoverChange::default());

        let change = s.hover(Some(Corner::Northeast));
        assert_eq!(change.show, Some(Corner::Northeast));
        assert_eq!(change.hide, None);

        let change = s.hover(Some(Corner::Southeast));
        assert_eq!(change.hide, Some(Corner::Northeast));
        assert_eq!(change.show, Some(Corner::Southeast));

        assert!(s.hover(Some(Corner::Southeast)).is_empty());

        let change = s.hover(None);
        assert_eq!(change.hide, Some(Corner::Southeast));
        assert_eq!(s.state(), DragState::Idle);
    }

    #[test]
    fn press_and_release_only_act_on_a_hovered_handle() {
        let mut s = InteractionState::new();
        assert!(!s.press());
        assert!(!s.release());

        s.hover(Some(Corner::Southwest));
        assert!(!s.release());
        assert!(s.press());
        assert!(s.is_stretching());
        assert!(!s.press());

        // Hover results are ignored mid-drag.
        assert!(s.hover(None).is_empty());
        assert_eq!(s.active_handle(), Some(Corner::Southwest));

        assert!(s.release());
        assert_eq!(s.state(), DragState::Hover(Corner::Southwest));
    }
}
