use table_designer::app::replay_session;
use table_designer::io::config::Config;
use table_designer::scene::loader::init_scene;
use table_designer::table::Corner;
use table_designer::ui::input::PointerSample;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-2
}

#[test]
fn default_session_reshapes_the_table() {
    let (context, summary) = replay_session(&Config::default()).unwrap();

    assert_eq!(summary.frames, 9);
    assert_eq!(summary.misses, 0);
    assert!(summary.stretches >= 3);

    let ne = context.table.corner_position(Corner::Northeast);
    let sw = context.table.corner_position(Corner::Southwest);
    assert!(close(ne.x, 1.6) && close(ne.z, 1.1), "NE at {ne:?}");
    assert!(close(sw.x, -0.2) && close(sw.z, -0.5), "SW at {sw:?}");

    // Deeper than it started, with the chair count following.
    assert!(summary.depth > 1.5);
    assert_eq!(summary.chairs, context.world.count_of("chair"));
    assert!(!context.table.interaction().is_stretching());
}

#[test]
fn toml_session_drives_the_world_camera() {
    let text = r#"
        [tabletop]
        dimension = [2.0, 0.05, 1.5]
        height = 0.75

        [leg]
        template = "leg"

        [[session]]
        world = [1.0, 0.775, 0.75]

        [[session]]
        world = [1.0, 0.775, 0.75]
        primary_down = true

        [[session]]
        world = [2.0, 0.775, 0.75]
        primary_down = true
    "#;
    let config: Config = toml::from_str(text).unwrap();
    let (context, summary) = replay_session(&config).unwrap();

    assert!(close(context.table.width(), 3.0), "width {}", context.table.width());
    assert!(close(summary.depth, 1.5));
    assert_eq!(summary.chairs, 0);
    assert!(context.table.interaction().is_stretching());
}

#[test]
fn pointer_outside_the_viewport_changes_nothing() {
    let mut context = init_scene(&Config::default()).unwrap();

    let report = context.frame(PointerSample::new(None, true));

    assert!(!report.pressed);
    assert!(context.table.interaction().active_handle().is_none());
    assert!(close(context.table.width(), 2.0));
}
