use crate::core::geometry::Bounds;
use crate::core::math::transform::transform_point;
use crate::io::config::Config;
use crate::io::image::save_plan_image;
use crate::scene::context::SceneContext;
use crate::scene::loader::init_scene;
use crate::scene::world::World;
use crate::table::{Corner, Table};
use crate::ui::input::PointerSample;
use egui::{Color32, Pos2, Sense, Shape, Stroke};
use log::{info, warn};
use nalgebra::{Matrix4, Point2, Point3};
use std::path::PathBuf;

const BACKGROUND: Color32 = Color32::from_rgb(36, 38, 44);
const TABLETOP: Color32 = Color32::from_rgb(181, 136, 99);
const EDGE: Color32 = Color32::from_rgb(230, 220, 200);
const LEG: Color32 = Color32::from_rgb(160, 120, 90);
const CHAIR: Color32 = Color32::from_rgb(110, 150, 210);
const HANDLE: Color32 = Color32::from_rgb(230, 70, 60);

/// Box edges as pairs of corner indices, see [`box_corners`].
#[rustfmt::skip]
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0),
    (4, 5), (5, 7), (7, 6), (6, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

fn box_corners(bounds: &Bounds, matrix: &Matrix4<f32>) -> [Point3<f32>; 8] {
    let (a, b) = (bounds.min, bounds.max);
    std::array::from_fn(|i| {
        let p = Point3::new(
            if i & 1 == 0 { a.x } else { b.x },
            if i & 4 == 0 { a.y } else { b.y },
            if i & 2 == 0 { a.z } else { b.z },
        );
        transform_point(matrix, &p)
    })
}

pub struct ViewerApp {
    config: Config,
    config_path: Option<PathBuf>,
    context: SceneContext,
    status: Option<String>,
}

impl ViewerApp {
    pub fn new(config: Config, config_path: Option<PathBuf>, context: SceneContext) -> Self {
        Self {
            config,
            config_path,
            context,
            status: None,
        }
    }

    /// Rebuilds the scene from disk. The old scene stays on failure.
    fn reload(&mut self) {
        info!("Reloading configuration...");
        let loaded = match &self.config_path {
            Some(path) => Config::load(path).map_err(|e| e.to_string()),
            None => Ok(Config::default()),
        };
        let rebuilt = loaded.and_then(|config| {
            init_scene(&config)
                .map(|context| (config, context))
                .map_err(|e| e.to_string())
        });

        match rebuilt {
            Ok((config, mut context)) => {
                context
                    .world
                    .set_viewport(self.context.world.viewport.0, self.context.world.viewport.1);
                self.config = config;
                self.context = context;
                self.status = None;
                info!("Hot reload successful!");
            }
            Err(e) => {
                warn!("Failed to reload config: {}", e);
                self.status = Some(e);
            }
        }
    }

    fn draw(&self, painter: &egui::Painter, offset: egui::Vec2) {
        let world = &self.context.world;
        let table = &self.context.table;
        let to_pos = |p: &Point3<f32>| {
            world
                .world_to_screen(p)
                .map(|s| Pos2::new(s.x, s.y) + offset)
        };

        let wire = |bounds: &Bounds, matrix: &Matrix4<f32>, color: Color32| {
            let corners = box_corners(bounds, matrix);
            for (a, b) in BOX_EDGES {
                if let (Some(a), Some(b)) = (to_pos(&corners[a]), to_pos(&corners[b])) {
                    painter.line_segment([a, b], Stroke::new(1.5, color));
                }
            }
        };

        draw_objects(world, table, &wire);

        // Top face, filled.
        let top: Option<Vec<Pos2>> = Corner::ALL
            .iter()
            .map(|c| {
                let mut p = table.corner_position(*c);
                p.y = table.bounds().max.y;
                to_pos(&transform_point(world.root(), &p))
            })
            .collect();
        if let Some(top) = top {
            painter.add(Shape::convex_polygon(top, TABLETOP, Stroke::new(1.0, EDGE)));
        }
        wire(table.bounds(), world.root(), EDGE);

        for corner in Corner::ALL {
            let Some(object) = world.object(table.handle(corner)).filter(|o| o.visible) else {
                continue;
            };
            let center = object.world_bounds(world.root()).center();
            if let Some(pos) = to_pos(&center) {
                painter.circle_filled(pos, 6.0, HANDLE);
            }
        }
    }
}

fn draw_objects<F>(world: &World, table: &Table, wire: &F)
where
    F: Fn(&Bounds, &Matrix4<f32>, Color32),
{
    let draw = |handle, color| {
        if let Some(object) = world.object(handle) {
            wire(&object.bounds, &(world.root() * object.local_matrix()), color);
        }
    };
    for handle in table.chairs().into_iter().flat_map(|c| c.chairs()) {
        draw(*handle, CHAIR);
    }
    for handle in table.legs().into_iter().flat_map(|l| l.objects()) {
        draw(*handle, LEG);
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::R)) {
            self.reload();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::P)) {
            save_plan_image(
                &self.context.world,
                &self.context.table,
                &self.config.plan,
                &self.config.plan.output,
            );
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let table = &self.context.table;
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{:.2} x {:.2}  chairs: {}  {:?}",
                    table.width(),
                    table.depth(),
                    table.chair_count(),
                    table.interaction().state()
                ));
                if let Some(status) = &self.status {
                    ui.colored_label(Color32::LIGHT_RED, status.as_str());
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BACKGROUND))
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
                let rect = response.rect;
                self.context.world.set_viewport(rect.width(), rect.height());

                let (hover, primary_down) =
                    ctx.input(|i| (i.pointer.hover_pos(), i.pointer.primary_down()));
                let position = hover
                    .filter(|p| rect.contains(*p))
                    .map(|p| Point2::new(p.x - rect.min.x, p.y - rect.min.y));
                self.context.frame(PointerSample::new(position, primary_down));

                self.draw(&painter, rect.min.to_vec2());
            });
    }
}

/// Opens the viewer window on an already built scene.
pub fn start_viewer(
    config: Config,
    config_path: Option<PathBuf>,
    context: SceneContext,
) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.viewport.width as f32, config.viewport.height as f32])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Table Designer",
        options,
        Box::new(|_cc| Ok(Box::new(ViewerApp::new(config, config_path, context)))),
    )
}
