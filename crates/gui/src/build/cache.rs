//! Render cache: static geometry plus colors resolved for the current interaction version

use shared::PartId;

use super::{build_scene, create_mesh, RenderableMesh};
use crate::parts::PartTable;
use crate::state::interaction::InteractionState;
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::{pick_nearest, Aabb, PickTarget, Ray};

/// Rebuilt when the interaction version changes. Geometry is generated once;
/// only colors move with hover and selection.
pub struct SceneCache {
    meshes: Vec<RenderableMesh>,
    /// Parallel to `meshes`
    geometry: Vec<MeshData>,
    local_aabbs: Vec<Aabb>,
    version: u64,
    rebuild_count: u64,
    geometry_generation: u64,
}

impl Default for SceneCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCache {
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            geometry: Vec::new(),
            local_aabbs: Vec::new(),
            version: u64::MAX, // force first rebuild
            rebuild_count: 0,
            geometry_generation: 0,
        }
    }

    /// Check if cache is still valid
    pub fn is_valid(&self, interaction: &InteractionState) -> bool {
        self.version == interaction.version()
    }

    /// Force the next `rebuild_if_needed` to rebuild. Interaction versions
    /// restart at zero for every mounted session.
    pub fn invalidate(&mut self) {
        self.version = u64::MAX;
    }

    pub fn rebuild_if_needed(&mut self, table: &PartTable, interaction: &InteractionState) {
        if !self.is_valid(interaction) {
            self.rebuild(table, interaction);
        }
    }

    pub fn rebuild(&mut self, table: &PartTable, interaction: &InteractionState) {
        let meshes = build_scene(table, interaction);

        let layout_changed = meshes.len() != self.meshes.len()
            || meshes
                .iter()
                .zip(&self.meshes)
                .any(|(a, b)| a.primitive != b.primitive);
        if layout_changed {
            self.geometry = meshes.iter().map(|m| create_mesh(&m.primitive)).collect();
            self.local_aabbs = self.geometry.iter().map(Aabb::from_mesh).collect();
            self.geometry_generation += 1;
            tracing::debug!("generated geometry for {} meshes", self.geometry.len());
        }

        self.meshes = meshes;
        self.version = interaction.version();
        self.rebuild_count += 1;
    }

    pub fn meshes(&self) -> &[RenderableMesh] {
        &self.meshes
    }

    pub fn geometry(&self) -> &[MeshData] {
        &self.geometry
    }

    /// Rebuild counter
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Bumps only when geometry is regenerated (GPU upload key)
    pub fn geometry_generation(&self) -> u64 {
        self.geometry_generation
    }

    /// Nearest interactive part under the ray. Decorative meshes are not hit regions.
    pub fn pick(&self, ray: &Ray) -> Option<&PartId> {
        let targets = self
            .meshes
            .iter()
            .zip(self.geometry.iter().zip(&self.local_aabbs))
            .filter_map(|(m, (mesh, aabb))| {
                m.part_id.as_ref().map(|id| PickTarget {
                    id,
                    world: m.world,
                    local_aabb: *aabb,
                    mesh,
                })
            });
        pick_nearest(ray, targets)
    }
}
