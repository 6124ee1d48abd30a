use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};
use starlane_camera::FlyCamera;

/// A world-space ray for intersection queries.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space.
    pub origin: Vec3,
    /// Ray direction, normalized.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point along the ray at distance `t`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Build a pick ray through a normalized-device-coordinate position.
    ///
    /// Unprojects the near- and far-plane points through the inverse
    /// view-projection; the ray starts on the near plane. Depth follows the
    /// wgpu convention (near = 0, far = 1).
    pub fn from_screen(ndc: Vec2, camera: &FlyCamera) -> Self {
        let inv = camera.view_projection().inverse();
        let near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near = near.xyz() / near.w;
        let far = far.xyz() / far.w;
        Self::new(near, far - near)
    }

    /// Analytic ray-sphere intersection. Returns the nearest non-negative
    /// distance, or None for a miss (including spheres entirely behind the
    /// origin).
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t_near = -b - sqrt_disc;
        if t_near >= 0.0 {
            return Some(t_near);
        }
        let t_far = -b + sqrt_disc;
        (t_far >= 0.0).then_some(t_far)
    }

    /// Slab-method ray-AABB intersection. Returns the distance to the entry
    /// point, or the exit point when the origin is inside the box.
    pub fn intersect_aabb(&self, min: Vec3, max: Vec3) -> Option<f32> {
        let inv_dir = self.direction.recip();
        let t_a = (min - self.origin) * inv_dir;
        let t_b = (max - self.origin) * inv_dir;
        let t1 = t_a.min(t_b);
        let t2 = t_a.max(t_b);
        let t_near = t1.x.max(t1.y).max(t1.z);
        let t_far = t2.x.min(t2.y).min(t2.z);
        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_hit_ahead() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = ray.intersect_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_miss() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 5.0), 1.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_a_miss() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(
            ray.intersect_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0)
                .is_none()
        );
    }

    #[test]
    fn origin_inside_sphere_hits_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn aabb_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let t = ray
            .intersect_aabb(Vec3::splat(-1.0), Vec3::splat(1.0))
            .unwrap();
        assert!((t - 4.0).abs() < 1e-5);

        let miss = Ray::new(Vec3::new(5.0, 0.0, -5.0), Vec3::Z);
        assert!(
            miss.intersect_aabb(Vec3::splat(-1.0), Vec3::splat(1.0))
                .is_none()
        );
    }

    #[test]
    fn aabb_from_inside_hits_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = ray
            .intersect_aabb(Vec3::splat(-1.0), Vec3::splat(1.0))
            .unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn screen_center_ray_follows_camera_forward() {
        let camera = FlyCamera {
            position: Vec3::ZERO,
            ..FlyCamera::default()
        };
        let ray = Ray::from_screen(Vec2::ZERO, &camera);
        // Default camera faces -Z.
        assert!(ray.direction.z < -0.99);
        assert!(ray.direction.x.abs() < 1e-4);
        // Origin sits on the near plane, in front of the eye.
        assert!(ray.origin.z < 0.0 && ray.origin.z > -1.0);
    }

    #[test]
    fn screen_corner_ray_diverges_from_center() {
        let camera = FlyCamera {
            position: Vec3::ZERO,
            ..FlyCamera::default()
        };
        let center = Ray::from_screen(Vec2::ZERO, &camera);
        let corner = Ray::from_screen(Vec2::new(1.0, 1.0), &camera);
        assert!(center.direction.dot(corner.direction) < 0.999);
        assert!(corner.direction.x > 0.0);
        assert!(corner.direction.y > 0.0);
    }
}
