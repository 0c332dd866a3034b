use crate::core::geometry::Bounds;
use crate::io::config::PlanConfig;
use crate::scene::world::World;
use crate::table::{Corner, Table};
use image::{ImageBuffer, Rgb, RgbImage};
use log::{error, info};
use nalgebra::{Matrix4, Point3};
use std::path::Path;

const MAX_SIDE: u32 = 8192;

const BACKGROUND: Rgb<u8> = Rgb([245, 245, 240]);
const TABLETOP: Rgb<u8> = Rgb([181, 136, 99]);
const LEG: Rgb<u8> = Rgb([90, 60, 40]);
const CHAIR: Rgb<u8> = Rgb([70, 110, 160]);
const HANDLE: Rgb<u8> = Rgb([220, 60, 50]);

/// Top view of the table in its own space, +z pointing up the image.
pub fn render_plan(world: &World, table: &Table, plan: &PlanConfig) -> RgbImage {
    let identity = Matrix4::identity();
    let tabletop = *world.mesh().bounds();

    let mut extent = tabletop;
    for (_, object) in world.objects() {
        let b = object.world_bounds(&identity);
        extent.expand_by_point(&b.min);
        extent.expand_by_point(&b.max);
    }

    let ppu = plan.pixels_per_unit.max(1.0);
    let origin_x = extent.min.x - plan.margin;
    let origin_z = extent.max.z + plan.margin;
    let width = (((extent.size().x + 2.0 * plan.margin) * ppu).ceil() as u32).clamp(1, MAX_SIDE);
    let height = (((extent.size().z + 2.0 * plan.margin) * ppu).ceil() as u32).clamp(1, MAX_SIDE);

    let mut img: RgbImage = ImageBuffer::from_pixel(width, height, BACKGROUND);

    let mut fill = |bounds: &Bounds, color: Rgb<u8>| {
        let x0 = ((bounds.min.x - origin_x) * ppu).floor().max(0.0) as u32;
        let x1 = (((bounds.max.x - origin_x) * ppu).ceil().max(0.0) as u32).min(width);
        let y0 = ((origin_z - bounds.max.z) * ppu).floor().max(0.0) as u32;
        let y1 = (((origin_z - bounds.min.z) * ppu).ceil().max(0.0) as u32).min(height);
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, color);
            }
        }
    };

    let bounds_of = |handle| world.object(handle).map(|o| o.world_bounds(&identity));

    // Painted bottom to top: chairs, tabletop, legs, handles.
    for b in table.chairs().into_iter().flat_map(|c| c.chairs()).filter_map(|h| bounds_of(*h)) {
        fill(&b, CHAIR);
    }
    if tabletop.size().x > 0.0 {
        fill(&tabletop, TABLETOP);
    }
    for b in table.legs().into_iter().flat_map(|l| l.objects()).filter_map(|h| bounds_of(*h)) {
        fill(&b, LEG);
    }
    for corner in Corner::ALL {
        let Some(o) = world.object(table.handle(corner)).filter(|o| o.visible) else {
            continue;
        };
        let b = o.world_bounds(&identity);
        let c = b.center();
        let r = (b.extents().x * 0.25).max(1.0 / ppu);
        fill(
            &Bounds::new(Point3::new(c.x - r, c.y, c.z - r), Point3::new(c.x + r, c.y, c.z + r)),
            HANDLE,
        );
    }

    img
}

/// Writes the plan to `path`; failures are logged, not returned.
pub fn save_plan_image(world: &World, table: &Table, plan: &PlanConfig, path: &str) -> bool {
    let img = render_plan(world, table, plan);
    match img.save(Path::new(path)) {
        Ok(()) => {
            info!("Plan saved to '{}' ({}x{})", path, img.width(), img.height());
            true
        }
        Err(e) => {
            error!("Failed to save image to '{}': {}", path, e);
            false
        }
    }
}
