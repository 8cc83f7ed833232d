//! Part descriptor table and scene layout of the lathe.

use std::collections::HashSet;
use std::f64::consts::FRAC_PI_2;

use shared::{DecorMesh, Material, PartDescriptor, Primitive, SceneNode, Transform};

/// Shared by every interactive part
pub const PART_MATERIAL: Material = Material {
    roughness: 0.3,
    metalness: 0.8,
};

pub const RADIAL_SEGMENTS: u32 = 32;

/// Read-only descriptors plus the group hierarchy that places them
#[derive(Debug, Clone)]
pub struct PartTable {
    parts: Vec<PartDescriptor>,
    layout: SceneNode,
}

impl PartTable {
    /// Build a table, checking that ids are unique and that the layout
    /// places every descriptor exactly once.
    pub fn new(parts: Vec<PartDescriptor>, layout: SceneNode) -> Result<Self, String> {
        let table = Self { parts, layout };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("Part table is empty".to_string());
        }

        let mut ids = HashSet::new();
        for part in &self.parts {
            if !ids.insert(part.id.as_str()) {
                return Err(format!("Duplicate part id '{}'", part.id));
            }
        }

        let mut placed = HashSet::new();
        for id in self.layout.part_ids() {
            if !ids.contains(id.as_str()) {
                return Err(format!("Layout references unknown part '{id}'"));
            }
            if !placed.insert(id.as_str()) {
                return Err(format!("Part '{id}' is placed more than once"));
            }
        }

        if let Some(missing) = self.parts.iter().find(|p| !placed.contains(p.id.as_str())) {
            return Err(format!("Part '{}' is not placed in the layout", missing.id));
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PartDescriptor> {
        self.parts.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PartDescriptor> {
        self.parts.iter()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn layout(&self) -> &SceneNode {
        &self.layout
    }

    /// The lathe: six interactive sub-assemblies and a decorative workpiece
    pub fn lathe() -> Self {
        let parts = vec![
            part(
                "bed",
                "Lathe Bed",
                "The rigid base that supports all other components. It has precision-ground ways for the carriage and tailstock to slide on.",
                Primitive::cuboid(6.0, 0.5, 2.0),
                Transform::at([0.0, 0.0, 0.0]),
                [0x2a, 0x2a, 0x2a],
                [0x40, 0x40, 0x40],
            ),
            part(
                "headstock",
                "Headstock",
                "Contains the main motor, spindle, and speed change gears. It spins the workpiece.",
                Primitive::cuboid(1.5, 1.5, 2.0),
                Transform::at([-2.5, 1.0, 0.0]),
                [0x3b, 0x82, 0xf6],
                [0x60, 0xa5, 0xfa],
            ),
            part(
                "chuck",
                "Chuck",
                "Clamps the workpiece securely. Common types include 3-jaw (self-centering) and 4-jaw (independent).",
                Primitive::cylinder(0.6, 0.5, RADIAL_SEGMENTS),
                Transform::new(),
                [0x9c, 0xa3, 0xaf],
                [0xd1, 0xd5, 0xdb],
            ),
            part(
                "carriage",
                "Carriage",
                "Moves along the bed ways. It carries the cross-slide, compound rest, and the cutting tool.",
                Primitive::cuboid(1.2, 0.4, 2.2),
                Transform::at([1.0, 0.5, 0.5]),
                [0x22, 0xc5, 0x5e],
                [0x4a, 0xde, 0x80],
            ),
            part(
                "toolpost",
                "Tool Post",
                "Holds the cutting tool. Can be adjusted for height and angle.",
                Primitive::cuboid(0.4, 0.8, 0.4),
                Transform::at([1.0, 1.2, 0.5]),
                [0xef, 0x44, 0x44],
                [0xf8, 0x71, 0x71],
            ),
            part(
                "tailstock",
                "Tailstock",
                "Used to support long workpieces or hold drilling tools. It can slide along the bed.",
                Primitive::cuboid(1.0, 1.0, 1.5),
                Transform::at([2.5, 0.75, 0.0]),
                [0xa8, 0x55, 0xf7],
                [0xc0, 0x84, 0xfc],
            ),
        ];

        let spindle_axis = [0.0, 0.0, FRAC_PI_2];
        let workpiece = DecorMesh {
            name: "workpiece".to_string(),
            primitive: Primitive::cylinder(0.2, 3.0, RADIAL_SEGMENTS),
            transform: Transform::new(),
            color: [0xd9, 0x77, 0x06],
            material: Material {
                roughness: 0.2,
                metalness: 0.5,
            },
        };

        let layout = SceneNode::group(
            "lathe",
            Transform::at([0.0, -0.5, 0.0]),
            vec![
                SceneNode::part("bed"),
                SceneNode::part("headstock"),
                SceneNode::group(
                    "chuck_mount",
                    Transform::at([-1.5, 1.0, 0.0]).rotated(spindle_axis),
                    vec![SceneNode::part("chuck")],
                ),
                SceneNode::group(
                    "workpiece_mount",
                    Transform::at([0.0, 1.0, 0.0]).rotated(spindle_axis),
                    vec![SceneNode::Decor(workpiece)],
                ),
                SceneNode::part("carriage"),
                SceneNode::part("toolpost"),
                SceneNode::part("tailstock"),
            ],
        );

        let table = Self { parts, layout };
        debug_assert!(table.validate().is_ok());
        table
    }
}

fn part(
    id: &str,
    title: &str,
    description: &str,
    primitive: Primitive,
    transform: Transform,
    base_color: [u8; 3],
    hover_color: [u8; 3],
) -> PartDescriptor {
    PartDescriptor {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        primitive,
        transform,
        base_color,
        hover_color,
        material: PART_MATERIAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lathe_table_is_consistent() {
        let table = PartTable::lathe();
        assert!(table.validate().is_ok());
        assert_eq!(table.len(), 6);
        let ids: Vec<&str> = table.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["bed", "headstock", "chuck", "carriage", "toolpost", "tailstock"]
        );
    }

    #[test]
    fn test_lookup_by_id() {
        let table = PartTable::lathe();
        assert_eq!(table.get("headstock").unwrap().title, "Headstock");
        assert!(table.get("workpiece").is_none());
        assert!(table.get("spindle").is_none());
    }

    #[test]
    fn test_workpiece_has_no_descriptor() {
        let table = PartTable::lathe();
        let placed: Vec<&str> = table.layout().part_ids().iter().map(|s| s.as_str()).collect();
        assert!(!placed.contains(&"workpiece"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let table = PartTable::lathe();
        let mut parts: Vec<PartDescriptor> = table.iter().cloned().collect();
        parts.push(parts[0].clone());
        let err = PartTable::new(parts, table.layout().clone()).unwrap_err();
        assert!(err.contains("Duplicate part id 'bed'"));
    }

    #[test]
    fn test_unplaced_part_rejected() {
        let table = PartTable::lathe();
        let parts: Vec<PartDescriptor> = table.iter().cloned().collect();
        let layout = SceneNode::group("root", Transform::new(), vec![SceneNode::part("bed")]);
        let err = PartTable::new(parts, layout).unwrap_err();
        assert!(err.contains("not placed"));
    }

    #[test]
    fn test_unknown_layout_reference_rejected() {
        let table = PartTable::lathe();
        let parts: Vec<PartDescriptor> = table.iter().cloned().collect();
        let layout = SceneNode::group(
            "root",
            Transform::new(),
            vec![table.layout().clone(), SceneNode::part("spindle")],
        );
        assert!(PartTable::new(parts, layout).unwrap_err().contains("unknown part 'spindle'"));
    }

    #[test]
    fn test_double_placement_rejected() {
        let table = PartTable::lathe();
        let parts: Vec<PartDescriptor> = table.iter().cloned().collect();
        let layout = SceneNode::group(
            "root",
            Transform::new(),
            vec![table.layout().clone(), SceneNode::part("chuck")],
        );
        assert!(PartTable::new(parts, layout).unwrap_err().contains("more than once"));
    }

    #[test]
    fn test_empty_table_rejected() {
        let layout = SceneNode::group("root", Transform::new(), Vec::new());
        assert_eq!(PartTable::new(Vec::new(), layout).unwrap_err(), "Part table is empty");
    }
}
