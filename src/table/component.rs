use crate::core::geometry::{Bounds, Plane};
use crate::core::math::transform::transform_point;
use crate::scene::host::{Layer, LocalTransform, MeshSink, ObjectHandle, Raycaster, SceneHost};
use crate::table::box_mesh::TRIANGLES;
use crate::table::chairs::{ChairLayout, ChairPlan};
use crate::table::corners::{Axis, Corner, CornerModel};
use crate::table::interaction::{DragState, HoverChange, InteractionState};
use crate::table::legs::LegLayout;
use crate::table::settings::{SetupError, TableSettings, TabletopSettings};
use crate::table::stretch::stretch_corner;
use log::{debug, info, trace};
use nalgebra::{Matrix4, Point2, Point3, UnitQuaternion, Vector3};

/// What a pointer move did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Same position as last frame, or nothing to update.
    Unchanged,
    /// Hovered handle changed.
    Hovered(HoverChange),
    /// The dragged corner moved to this table-local position.
    Stretched { corner: Corner, position: Point3<f32> },
    /// The pointer ray missed the support plane; the frame was skipped.
    PlaneMissed,
}

/// An interactive table: stretchable top, corner handles, optional legs and chairs.
///
/// Driven by the host once per frame through [`Table::on_pointer_moved`],
/// [`Table::on_button_down`] and [`Table::on_button_up`].
#[derive(Debug)]
pub struct Table {
    tabletop: TabletopSettings,
    root: Matrix4<f32>,
    root_inverse: Matrix4<f32>,
    corners: CornerModel,
    bounds: Bounds,
    handles: [ObjectHandle; 4],
    legs: Option<LegLayout>,
    chairs: Option<ChairLayout>,
    interaction: InteractionState,
    /// Mid-thickness plane in table-local space.
    support_plane: Plane,
}

impl Table {
    /// Validates `settings`, builds the mesh and instantiates handles, legs and chairs.
    pub fn new<H: SceneHost + MeshSink>(
        settings: TableSettings,
        host: &mut H,
    ) -> Result<Self, SetupError> {
        settings.validate()?;
        let root_inverse = settings
            .root
            .try_inverse()
            .ok_or(SetupError::SingularRootTransform)?;

        let t = settings.tabletop;
        let corners = CornerModel::new(t.width, t.thickness, t.depth, t.base_height);

        host.set_triangles(&TRIANGLES);
        let bounds = host.update_vertices(corners.vertices());

        let handle_scale = Vector3::repeat(t.thickness * 2.0);
        let handles = Corner::ALL.map(|_| {
            let handle = host.create_child(&t.handle);
            host.set_local_transform(
                handle,
                LocalTransform::new(Point3::origin(), UnitQuaternion::identity(), handle_scale),
            );
            host.set_visible(handle, false);
            handle
        });

        let legs = settings
            .leg
            .map(|leg| LegLayout::spawn(leg, t.base_height, host));
        let chairs = settings.chair.map(ChairLayout::new);

        let support_plane = Plane::horizontal(t.base_height + t.thickness * 0.5);

        let mut table = Self {
            tabletop: t,
            root: settings.root,
            root_inverse,
            corners,
            bounds,
            handles,
            legs,
            chairs,
            interaction: InteractionState::new(),
            support_plane,
        };
        table.reposition_subordinates(host);

        info!(
            "Table ready: {:.2} x {:.2}, legs: {}, chairs: {}",
            table.width(),
            table.depth(),
            table.legs.is_some(),
            table.chair_count()
        );
        Ok(table)
    }

    //=================================
    // Frame Events
    //=================================

    /// Pointer position for this frame. Repeated positions are ignored.
    pub fn on_pointer_moved<H>(&mut self, pointer: Point2<f32>, host: &mut H) -> PointerOutcome
    where
        H: SceneHost + MeshSink + Raycaster,
    {
        if !self.interaction.pointer_changed(pointer) {
            return PointerOutcome::Unchanged;
        }

        match self.interaction.state() {
            DragState::Stretching(corner) => self.stretch(corner, pointer, host),
            DragState::Idle | DragState::Hover(_) => {
                let hit = host
                    .cast_from_screen(pointer, Layer::Handle)
                    .and_then(|object| self.corner_of(object));

                let change = self.interaction.hover(hit);
                if change.is_empty() {
                    return PointerOutcome::Unchanged;
                }
                if let Some(corner) = change.hide {
                    host.set_visible(self.handles[corner.index()], false);
                }
                if let Some(corner) = change.show {
                    host.set_visible(self.handles[corner.index()], true);
                }
                PointerOutcome::Hovered(change)
            }
        }
    }

    /// Pointer left the viewport. Clears the hover; a running stretch continues.
    pub fn on_pointer_left<H: SceneHost>(&mut self, host: &mut H) -> PointerOutcome {
        self.interaction.pointer_left();
        let change = self.interaction.hover(None);
        if change.is_empty() {
            return PointerOutcome::Unchanged;
        }
        if let Some(corner) = change.hide {
            host.set_visible(self.handles[corner.index()], false);
        }
        PointerOutcome::Hovered(change)
    }

    /// Primary button pressed. Starts stretching if a handle is hovered.
    pub fn on_button_down(&mut self) -> bool {
        self.interaction.press()
    }

    /// Primary button released. Ends stretching, keeping the last valid shape.
    pub fn on_button_up(&mut self) -> bool {
        self.interaction.release()
    }

    fn stretch<H>(&mut self, corner: Corner, pointer: Point2<f32>, host: &mut H) -> PointerOutcome
    where
        H: SceneHost + MeshSink + Raycaster,
    {
        let world_plane = self.support_plane.transformed(&self.root);
        let Some(hit) = host.project_onto_plane(pointer, &world_plane) else {
            trace!("Pointer ray missed the support plane");
            return PointerOutcome::PlaneMissed;
        };
        let target = transform_point(&self.root_inverse, &hit);

        let position = stretch_corner(&mut self.corners, corner, target, &self.tabletop.min);
        self.bounds = host.update_vertices(self.corners.vertices());
        self.reposition_subordinates(host);

        debug!(
            "{:?} -> ({:.3}, {:.3}), top {:.3} x {:.3}",
            corner,
            position.x,
            position.z,
            self.width(),
            self.depth()
        );
        PointerOutcome::Stretched { corner, position }
    }

    //=================================
    // Layout
    //=================================

    fn reposition_subordinates<H: SceneHost>(&mut self, host: &mut H) {
        self.reposition_handles(host);

        let Some(legs) = self.legs.as_mut() else {
            return;
        };
        legs.reposition(&self.corners, &self.bounds, self.tabletop.base_height, host);

        if let Some(chairs) = self.chairs.as_mut() {
            chairs.arrange(legs.positions(), &legs.footprint(), host);
        }
    }

    fn reposition_handles<H: SceneHost>(&self, host: &mut H) {
        let y = self.tabletop.base_height + self.tabletop.thickness * 0.5;
        let scale = Vector3::repeat(self.tabletop.thickness * 2.0);

        for corner in Corner::ALL {
            let c = self.corners.position(corner);
            host.set_local_transform(
                self.handles[corner.index()],
                LocalTransform::new(Point3::new(c.x, y, c.z), UnitQuaternion::identity(), scale),
            );
        }
    }

    fn corner_of(&self, object: ObjectHandle) -> Option<Corner> {
        self.handles
            .iter()
            .position(|h| *h == object)
            .map(Corner::from_index)
    }

    //=================================
    // Accessors
    //=================================

    pub fn corner_position(&self, corner: Corner) -> Point3<f32> {
        self.corners.position(corner)
    }

    /// Current extent along x.
    pub fn width(&self) -> f32 {
        self.corners.span(Axis::X)
    }

    /// Current extent along z.
    pub fn depth(&self) -> f32 {
        self.corners.span(Axis::Z)
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn root(&self) -> &Matrix4<f32> {
        &self.root
    }

    pub fn tabletop(&self) -> &TabletopSettings {
        &self.tabletop
    }

    pub fn handle(&self, corner: Corner) -> ObjectHandle {
        self.handles[corner.index()]
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn leg_positions(&self) -> Option<&[Point3<f32>; 4]> {
        self.legs.as_ref().map(|l| l.positions())
    }

    pub fn legs(&self) -> Option<&LegLayout> {
        self.legs.as_ref()
    }

    pub fn chair_plan(&self) -> Option<&ChairPlan> {
        self.chairs.as_ref().map(|c| c.plan())
    }

    pub fn chairs(&self) -> Option<&ChairLayout> {
        self.chairs.as_ref()
    }

    pub fn chair_count(&self) -> usize {
        self.chairs.as_ref().map_or(0, |c| c.chairs().len())
    }
}
