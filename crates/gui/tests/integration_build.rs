//! Integration tests for scene building: part table -> renderable meshes.

use glam::Vec3;
use lathe_explorer_lib::build::{build_scene, create_mesh};
use lathe_explorer_lib::parts::PartTable;
use lathe_explorer_lib::state::{InteractionState, PointerMessage};
use lathe_explorer_lib::validation::MeshValidator;

#[test]
fn test_lathe_scene_layout_order() {
    let table = PartTable::lathe();
    let interaction = InteractionState::new(&table);
    let scene = build_scene(&table, &interaction);

    let labels: Vec<&str> = scene.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "Lathe Bed",
            "Headstock",
            "Chuck",
            "workpiece",
            "Carriage",
            "Tool Post",
            "Tailstock"
        ]
    );
    assert_eq!(scene.iter().filter(|m| m.is_interactive()).count(), 6);
}

#[test]
fn test_group_frames_compose() {
    let table = PartTable::lathe();
    let scene = build_scene(&table, &InteractionState::new(&table));

    let chuck = scene.iter().find(|m| m.part_id.as_deref() == Some("chuck")).unwrap();
    let origin = chuck.world.transform_point3(Vec3::ZERO);
    assert!((origin - Vec3::new(-1.5, 0.5, 0.0)).length() < 1e-5);

    // Spindle axis: the cylinder's +Y maps onto world -X
    let axis = chuck.world.transform_vector3(Vec3::Y);
    assert!((axis - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5, "{axis}");

    let bed = scene.iter().find(|m| m.part_id.as_deref() == Some("bed")).unwrap();
    let origin = bed.world.transform_point3(Vec3::ZERO);
    assert!((origin - Vec3::new(0.0, -0.5, 0.0)).length() < 1e-5);
}

#[test]
fn test_selection_keeps_highlight_after_leave() {
    let table = PartTable::lathe();
    let mut interaction = InteractionState::new(&table);
    interaction.apply(&PointerMessage::Enter("carriage".into()));
    interaction.apply(&PointerMessage::Click("carriage".into()));
    interaction.apply(&PointerMessage::Leave("carriage".into()));

    let scene = build_scene(&table, &interaction);
    let carriage = scene.iter().find(|m| m.part_id.as_deref() == Some("carriage")).unwrap();
    assert_eq!(carriage.color, [0x4a, 0xde, 0x80]);
}

#[test]
fn test_every_part_mesh_is_valid() {
    let table = PartTable::lathe();
    for part in table.iter() {
        let mesh = create_mesh(&part.primitive);
        let errors = MeshValidator::new(&mesh).validate_all();
        assert!(errors.is_empty(), "{}: {:?}", part.id, errors);
    }
}

#[test]
fn test_bed_dimensions() {
    let table = PartTable::lathe();
    let mesh = create_mesh(&table.get("bed").unwrap().primitive);
    assert!(MeshValidator::new(&mesh).assert_dimensions_approx([6.0, 0.5, 2.0], 1e-4));
}
