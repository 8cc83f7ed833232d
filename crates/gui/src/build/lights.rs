//! Fixed studio lighting for the explorer scene

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub target: Vec3,
    /// Cone half-angle (radians)
    pub angle: f32,
    /// 0 = hard edge, 1 = fully soft cone
    pub penumbra: f32,
    pub intensity: f32,
    pub cast_shadow: bool,
}

impl SpotLight {
    /// Cosines of the inner (full intensity) and outer cone edges
    pub fn cone_cosines(&self) -> (f32, f32) {
        let outer = self.angle.cos();
        let inner = (self.angle * (1.0 - self.penumbra)).cos();
        (inner, outer)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
}

/// One ambient, one shadow-casting spot, one point light
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub spot: SpotLight,
    pub point: PointLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self::studio()
    }
}

impl LightRig {
    pub fn studio() -> Self {
        Self {
            ambient: AmbientLight { intensity: 0.5 },
            spot: SpotLight {
                position: Vec3::new(10.0, 10.0, 10.0),
                target: Vec3::ZERO,
                angle: 0.15,
                penumbra: 1.0,
                intensity: 100.0,
                cast_shadow: true,
            },
            point: PointLight {
                position: Vec3::new(-10.0, -10.0, -10.0),
                intensity: 50.0,
            },
        }
    }
}
