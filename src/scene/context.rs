use crate::scene::world::World;
use crate::table::Table;
use crate::ui::input::{FrameReport, PointerSample, PointerTracker};

/// Everything one interactive session owns.
#[derive(Debug)]
pub struct SceneContext {
    pub world: World,
    pub table: Table,
    pub tracker: PointerTracker,
}

impl SceneContext {
    /// Feeds one frame of pointer input to the table.
    pub fn frame(&mut self, sample: PointerSample) -> FrameReport {
        self.tracker.frame(sample, &mut self.table, &mut self.world)
    }
}
