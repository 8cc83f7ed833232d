//! Primitive → CPU mesh

use shared::Primitive;

use crate::viewport::mesh::{self, MeshData};

/// Generate local-frame geometry for a primitive, centered at the origin
pub fn create_mesh(primitive: &Primitive) -> MeshData {
    match primitive {
        Primitive::Box {
            width,
            height,
            depth,
        } => mesh::cuboid(*width as f32, *height as f32, *depth as f32),
        Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => mesh::cylinder(
            *radius_top as f32,
            *radius_bottom as f32,
            *height as f32,
            *radial_segments,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::MeshValidator;

    #[test]
    fn test_box_dimensions() {
        let m = create_mesh(&Primitive::cuboid(6.0, 0.5, 2.0));
        let v = MeshValidator::new(&m);
        assert!(v.validate_all().is_empty());
        assert!(v.assert_dimensions_approx([6.0, 0.5, 2.0], 1e-4));
    }

    #[test]
    fn test_cylinder_dimensions() {
        let m = create_mesh(&Primitive::cylinder(0.6, 0.5, 32));
        let v = MeshValidator::new(&m);
        assert!(v.validate_all().is_empty());
        assert!(v.assert_dimensions_approx([1.2, 0.5, 1.2], 1e-3));
    }

    #[test]
    fn test_frustum_dimensions() {
        let m = create_mesh(&Primitive::Cylinder {
            radius_top: 0.2,
            radius_bottom: 0.5,
            height: 2.0,
            radial_segments: 16,
        });
        let v = MeshValidator::new(&m);
        assert!(v.validate_all().is_empty());
        assert!(v.assert_dimensions_approx([1.0, 2.0, 1.0], 1e-3));
    }
}
