//! Ray intersection tests used by pick queries

use scattercube_core::{Point3f, Ray, Vector3f};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    /// Box centered on `center` with the given half extents
    pub fn from_center(center: Point3f, half_extents: Vector3f) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }
}

/// Distance along `ray` to the first intersection with a sphere.
/// A ray starting inside the sphere hits its far side.
pub fn ray_sphere(ray: &Ray, center: &Point3f, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(&ray.direction);
    let c = oc.norm_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    let far = -b + sqrt_d;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Distance along `ray` to the entry point of a box (slab test).
/// A ray starting inside the box reports distance 0.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for i in 0..3 {
        let origin = ray.origin[i];
        let dir = ray.direction[i];
        if dir.abs() < f32::EPSILON {
            if origin < aabb.min[i] || origin > aabb.max[i] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let mut t0 = (aabb.min[i] - origin) * inv;
        let mut t1 = (aabb.max[i] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}
