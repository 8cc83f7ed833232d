//! Scene building: projects the part table and interaction state into a
//! flat list of renderable meshes with resolved colors and world transforms.

mod cache;
mod lights;
mod primitives;

pub use cache::SceneCache;
pub use lights::{AmbientLight, LightRig, PointLight, SpotLight};
pub use primitives::create_mesh;

use glam::{EulerRot, Mat4, Quat, Vec3};
use shared::{Material, PartDescriptor, PartId, Primitive, Rgb, SceneNode, Transform};

use crate::parts::PartTable;
use crate::state::interaction::InteractionState;

/// One mesh ready for the renderer
#[derive(Clone, Debug)]
pub struct RenderableMesh {
    /// `None` for decorative meshes (never hovered or selected)
    pub part_id: Option<PartId>,
    pub label: String,
    pub primitive: Primitive,
    /// Local → world, parent frames already composed
    pub world: Mat4,
    pub color: Rgb,
    pub material: Material,
}

impl RenderableMesh {
    pub fn is_interactive(&self) -> bool {
        self.part_id.is_some()
    }
}

/// Hover color when hovered or selected, base color otherwise
pub fn resolve_color(part: &PartDescriptor, interaction: &InteractionState) -> Rgb {
    if interaction.is_highlighted(&part.id) {
        part.hover_color
    } else {
        part.base_color
    }
}

/// Local frame of a node: translate, then rotate (Euler XYZ)
pub fn local_matrix(transform: &Transform) -> Mat4 {
    let [tx, ty, tz] = transform.position;
    let [rx, ry, rz] = transform.rotation;
    let rotation = Quat::from_euler(EulerRot::XYZ, rx as f32, ry as f32, rz as f32);
    Mat4::from_rotation_translation(rotation, Vec3::new(tx as f32, ty as f32, tz as f32))
}

/// Pure projection from state to render description, in layout order
pub fn build_scene(table: &PartTable, interaction: &InteractionState) -> Vec<RenderableMesh> {
    let mut out = Vec::with_capacity(table.len() + 1);
    walk(table.layout(), Mat4::IDENTITY, table, interaction, &mut out);
    out
}

fn walk(
    node: &SceneNode,
    parent: Mat4,
    table: &PartTable,
    interaction: &InteractionState,
    out: &mut Vec<RenderableMesh>,
) {
    match node {
        SceneNode::Group {
            transform,
            children,
            ..
        } => {
            let frame = parent * local_matrix(transform);
            for child in children {
                walk(child, frame, table, interaction, out);
            }
        }
        SceneNode::Part { id } => {
            let Some(part) = table.get(id) else {
                tracing::warn!("layout references unknown part '{id}'");
                return;
            };
            out.push(RenderableMesh {
                part_id: Some(part.id.clone()),
                label: part.title.clone(),
                primitive: part.primitive.clone(),
                world: parent * local_matrix(&part.transform),
                color: resolve_color(part, interaction),
                material: part.material,
            });
        }
        SceneNode::Decor(decor) => out.push(RenderableMesh {
            part_id: None,
            label: decor.name.clone(),
            primitive: decor.primitive.clone(),
            world: parent * local_matrix(&decor.transform),
            color: decor.color,
            material: decor.material,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::interaction::PointerMessage;

    fn find<'a>(meshes: &'a [RenderableMesh], id: &str) -> &'a RenderableMesh {
        meshes
            .iter()
            .find(|m| m.part_id.as_deref() == Some(id))
            .unwrap()
    }

    #[test]
    fn test_builds_every_part_plus_workpiece() {
        let table = PartTable::lathe();
        let meshes = build_scene(&table, &InteractionState::new(&table));
        assert_eq!(meshes.len(), 7);
        let decor: Vec<_> = meshes.iter().filter(|m| !m.is_interactive()).collect();
        assert_eq!(decor.len(), 1);
        assert_eq!(decor[0].label, "workpiece");
    }

    #[test]
    fn test_idle_scene_uses_base_colors() {
        let table = PartTable::lathe();
        let meshes = build_scene(&table, &InteractionState::new(&table));
        for part in table.iter() {
            assert_eq!(find(&meshes, &part.id).color, part.base_color);
        }
    }

    #[test]
    fn test_selected_chuck_highlighted_alone() {
        let table = PartTable::lathe();
        let mut s = InteractionState::new(&table);
        s.apply(&PointerMessage::Click("chuck".to_string()));
        let meshes = build_scene(&table, &s);
        for part in table.iter() {
            let expected = if part.id == "chuck" {
                part.hover_color
            } else {
                part.base_color
            };
            assert_eq!(find(&meshes, &part.id).color, expected, "{}", part.id);
        }
    }

    #[test]
    fn test_hover_and_selection_both_highlight() {
        let table = PartTable::lathe();
        let mut s = InteractionState::new(&table);
        s.apply(&PointerMessage::Click("bed".to_string()));
        s.apply(&PointerMessage::Enter("tailstock".to_string()));
        let meshes = build_scene(&table, &s);
        assert_eq!(find(&meshes, "bed").color, [0x40, 0x40, 0x40]);
        assert_eq!(find(&meshes, "tailstock").color, [0xc0, 0x84, 0xfc]);
        assert_eq!(find(&meshes, "headstock").color, [0x3b, 0x82, 0xf6]);
    }

    #[test]
    fn test_root_offset_applies_to_parts() {
        let table = PartTable::lathe();
        let meshes = build_scene(&table, &InteractionState::new(&table));
        let head = find(&meshes, "headstock").world.transform_point3(Vec3::ZERO);
        assert!((head - Vec3::new(-2.5, 0.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_chuck_inherits_rotated_frame() {
        let table = PartTable::lathe();
        let meshes = build_scene(&table, &InteractionState::new(&table));
        let chuck = find(&meshes, "chuck");
        let center = chuck.world.transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(-1.5, 0.5, 0.0)).length() < 1e-5);
        // Cylinder axis (+Y local) is turned onto the spindle axis (-X world)
        let axis = chuck.world.transform_vector3(Vec3::Y);
        assert!((axis - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_decor_never_highlighted() {
        let table = PartTable::lathe();
        let mut s = InteractionState::new(&table);
        s.apply(&PointerMessage::Enter("workpiece".to_string()));
        s.apply(&PointerMessage::Click("workpiece".to_string()));
        let meshes = build_scene(&table, &s);
        let workpiece = meshes.iter().find(|m| !m.is_interactive()).unwrap();
        assert_eq!(workpiece.color, [0xd9, 0x77, 0x06]);
    }
}
