use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3, Vec4};

use super::picking::Ray;

/// Eye position the explorer always mounts with
pub const DEFAULT_EYE: Vec3 = Vec3::new(5.0, 4.0, 6.0);
pub const DEFAULT_FOV_DEGREES: f32 = 45.0;

/// Keeps `look_at` well-defined at the poles; the stored angle is untouched.
const POLE_EPSILON: f32 = 1e-4;

/// Orbit constraints, applied after every input-driven update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    /// Polar angle from +Y (0 = looking straight down)
    pub min_polar: f32,
    /// Never below the horizon plane of the target
    pub max_polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_polar: 0.0,
            max_polar: FRAC_PI_2,
            min_distance: 4.0,
            max_distance: 15.0,
        }
    }
}

/// Orbit camera around a fixed target. Panning is disabled.
#[derive(Clone, Copy, Debug)]
pub struct ArcBallCamera {
    /// Horizontal rotation angle around +Y (radians, unclamped)
    pub azimuth: f32,
    /// Angle between +Y and the eye direction (radians)
    pub polar: f32,
    /// Distance from target
    pub distance: f32,
    /// Vertical field of view (radians)
    pub fov: f32,
    target: Vec3,
    limits: OrbitLimits,
}

impl Default for ArcBallCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcBallCamera {
    pub fn new() -> Self {
        Self::looking_at(DEFAULT_EYE, Vec3::ZERO, OrbitLimits::default())
    }

    /// Place the camera at `eye` looking at `target`, then apply the limits
    pub fn looking_at(eye: Vec3, target: Vec3, limits: OrbitLimits) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let polar = if distance > 0.0 {
            (offset.y / distance).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };
        let mut camera = Self {
            azimuth: offset.x.atan2(offset.z),
            polar,
            distance,
            fov: DEFAULT_FOV_DEGREES.to_radians(),
            target,
            limits,
        };
        camera.apply_limits();
        camera
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    /// Orbit by a drag delta in degrees. Dragging right swings the eye
    /// toward -X so the model turns with the pointer.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx.to_radians();
        self.polar -= dy.to_radians();
        self.apply_limits();
    }

    /// Orbit by a pointer drag in pixels: a full-height drag is one turn
    pub fn drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let degrees_per_px = 360.0 / viewport_height.max(1.0);
        self.rotate(dx * degrees_per_px, dy * degrees_per_px);
    }

    /// Dolly by a scroll fraction; positive moves closer
    pub fn dolly(&mut self, delta: f32) {
        self.distance *= 1.0 - delta;
        self.apply_limits();
    }

    /// Pan input is absorbed: the orbit target stays fixed for the session
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if dx != 0.0 || dy != 0.0 {
            tracing::trace!("pan ignored ({dx}, {dy})");
        }
    }

    pub fn set_polar(&mut self, polar: f32) {
        self.polar = polar;
        self.apply_limits();
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
        self.apply_limits();
    }

    fn apply_limits(&mut self) {
        let l = &self.limits;
        // NaN from a degenerate input falls back to the upper bound
        self.polar = if self.polar.is_nan() {
            l.max_polar
        } else {
            self.polar.clamp(l.min_polar, l.max_polar)
        };
        self.distance = if self.distance.is_nan() {
            l.max_distance
        } else {
            self.distance.clamp(l.min_distance, l.max_distance)
        };
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let polar = self.polar.clamp(POLE_EPSILON, std::f32::consts::PI - POLE_EPSILON);
        let (sp, cp) = polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();

        self.target + self.distance * Vec3::new(sp * sa, cp, sp * ca)
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.1, 200.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Project a 3D point to 2D screen coords (for overlay text)
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let aspect = rect.width() / rect.height();
        let p = self.view_projection(aspect) * point.extend(1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let screen_x = rect.center().x + ndc.x * rect.width() * 0.5;
        let screen_y = rect.center().y - ndc.y * rect.height() * 0.5;
        Some(egui::pos2(screen_x, screen_y))
    }

    /// Cast a ray from a screen position into the 3D scene
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let aspect = rect.width() / rect.height();

        // Screen → NDC
        let ndc_x = (screen_pos.x - rect.center().x) / (rect.width() * 0.5);
        let ndc_y = -(screen_pos.y - rect.center().y) / (rect.height() * 0.5);

        let vp_inv = self.view_projection(aspect).inverse();

        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray {
            origin: self.eye_position(),
            direction: (far - near).normalize_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_default_pose_matches_default_eye() {
        let cam = ArcBallCamera::new();
        assert!(approx(cam.distance, 77.0_f32.sqrt()));
        assert!((cam.eye_position() - DEFAULT_EYE).length() < 1e-3);
        assert_eq!(cam.target(), Vec3::ZERO);
    }

    #[test]
    fn test_polar_clamps_to_exact_bounds() {
        let mut cam = ArcBallCamera::new();
        cam.set_polar(-0.7);
        assert_eq!(cam.polar, 0.0);
        cam.set_polar(3.0);
        assert_eq!(cam.polar, FRAC_PI_2);
    }

    #[test]
    fn test_rotate_never_goes_below_horizon() {
        let mut cam = ArcBallCamera::new();
        for _ in 0..50 {
            cam.rotate(3.0, -20.0);
            assert!(cam.polar <= FRAC_PI_2);
            assert!(cam.eye_position().y >= -1e-4);
        }
        assert_eq!(cam.polar, FRAC_PI_2);
    }

    #[test]
    fn test_drag_right_turns_eye_toward_negative_x() {
        let mut cam = ArcBallCamera::new();
        let before = cam.eye_position();
        cam.rotate(20.0, 0.0);
        let after = cam.eye_position();
        assert!(after.x < before.x, "{before} -> {after}");
        assert!(approx(after.y, before.y));
    }

    #[test]
    fn test_full_height_drag_is_one_turn() {
        let mut cam = ArcBallCamera::new();
        let azimuth = cam.azimuth;
        cam.drag(600.0, 0.0, 600.0);
        assert!(approx(cam.azimuth, azimuth - std::f32::consts::TAU));

        cam.drag(150.0, 0.0, 600.0);
        assert!(approx(cam.azimuth, azimuth - std::f32::consts::TAU - FRAC_PI_2));
    }

    #[test]
    fn test_drag_down_raises_eye() {
        let mut cam = ArcBallCamera::new();
        let polar = cam.polar;
        cam.drag(0.0, 30.0, 600.0);
        assert!(approx(cam.polar, polar - 18.0_f32.to_radians()));
    }

    #[test]
    fn test_distance_clamps() {
        let mut cam = ArcBallCamera::new();
        cam.set_distance(0.5);
        assert_eq!(cam.distance, 4.0);
        for _ in 0..100 {
            cam.dolly(-0.5);
        }
        assert_eq!(cam.distance, 15.0);
    }

    #[test]
    fn test_pan_has_no_effect() {
        let mut cam = ArcBallCamera::new();
        let eye = cam.eye_position();
        cam.pan(120.0, -40.0);
        assert_eq!(cam.target(), Vec3::ZERO);
        assert_eq!(cam.eye_position(), eye);
    }

    #[test]
    fn test_straight_down_view_is_finite() {
        let mut cam = ArcBallCamera::new();
        cam.set_polar(0.0);
        let view = cam.view_matrix();
        assert!(view.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_nan_input_is_clamped() {
        let mut cam = ArcBallCamera::new();
        cam.set_polar(f32::NAN);
        cam.set_distance(f32::NAN);
        assert_eq!(cam.polar, FRAC_PI_2);
        assert_eq!(cam.distance, 15.0);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let cam = ArcBallCamera::new();
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let ray = cam.screen_ray(rect.center(), rect);
        let to_target = (cam.target() - ray.origin).normalize();
        assert!(ray.direction.dot(to_target) > 0.9999);
    }
}
