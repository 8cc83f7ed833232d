use glam::{Mat4, Vec3};
use shared::PartId;

use super::mesh::MeshData;

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Express the ray in the frame whose world matrix is `world`.
    /// Rigid transforms keep the parameter `t` in world units.
    pub fn to_local(&self, world: &Mat4) -> Ray {
        let inv = world.inverse();
        Ray {
            origin: inv.transform_point3(self.origin),
            direction: inv.transform_vector3(self.direction),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from mesh vertex positions
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for i in 0..data.vertex_count() {
            let p = data.position(i as u32);
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min - ray.origin) * inv_dir;
    let t2 = (aabb.max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Nearest triangle hit distance in a mesh, or None
pub fn ray_mesh(ray: &Ray, mesh: &MeshData) -> Option<f32> {
    (0..mesh.triangle_count())
        .filter_map(|tri| {
            let [v0, v1, v2] = mesh.triangle(tri);
            ray_triangle_intersect(ray, v0, v1, v2)
        })
        .min_by(|a, b| a.total_cmp(b))
}

/// An interactive part's hit region: local geometry placed by a world matrix
pub struct PickTarget<'a> {
    pub id: &'a PartId,
    pub world: Mat4,
    pub local_aabb: Aabb,
    pub mesh: &'a MeshData,
}

/// Pick the nearest part whose geometry is hit by the world-space ray.
/// AABB rejects first, triangles decide.
pub fn pick_nearest<'a>(
    ray: &Ray,
    targets: impl IntoIterator<Item = PickTarget<'a>>,
) -> Option<&'a PartId> {
    let mut best: Option<(&PartId, f32)> = None;

    for target in targets {
        let local = ray.to_local(&target.world);
        if ray_aabb(&local, &target.local_aabb).is_none() {
            continue;
        }
        if let Some(dist) = ray_mesh(&local, target.mesh) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((target.id, dist));
            }
        }
    }

    best.map(|(id, _)| id)
}
