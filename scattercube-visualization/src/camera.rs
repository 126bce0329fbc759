//! Cursor unprojection for mouse picking

use nalgebra::{Matrix4, Perspective3};
use scattercube_core::{Point2f, Point3f, Ray, Transform3D, Vector3f};

/// Viewer looking at the plot with a Y-up perspective projection
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Point3f,
    pub target: Point3f,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Stand `distance` in front of `target` along +Z, looking back at it
    pub fn facing(target: Point3f, distance: f32) -> Self {
        Self {
            eye: target + Vector3f::z() * distance,
            target,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    fn clip_from_world(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(&self.eye, &self.target, &Vector3f::y());
        Perspective3::new(self.aspect, self.fov_y, self.near, self.far).as_matrix() * view
    }

    /// World-space ray through a cursor given in normalized device coordinates.
    /// `(0, 0)` is the screen center, `(1, 1)` the top-right corner.
    pub fn ray_from_cursor(&self, cursor: &Point2f) -> Option<Ray> {
        let world_from_clip = Transform3D::from(self.clip_from_world()).inverse()?;
        let near = world_from_clip.transform_point(&Point3f::new(cursor.x, cursor.y, -1.0));
        let far = world_from_clip.transform_point(&Point3f::new(cursor.x, cursor.y, 1.0));
        let direction = far - near;
        if direction.norm() <= f32::EPSILON {
            return None;
        }
        Some(Ray::new(near, direction))
    }
}

impl Default for Camera {
    /// Standing in front of the plot at its default height
    fn default() -> Self {
        Self::facing(Point3f::new(0.0, 1.7, 0.0), 2.5)
    }
}
