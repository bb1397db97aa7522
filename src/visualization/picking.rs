//! Ray hit testing against node spheres.

use bevy::math::Vec3;

/// Closest target whose sphere the ray passes through.
///
/// Targets are `(key, center, hit_radius)`. Only hits in front of the ray
/// origin count; ties go to the nearest along the ray.
pub fn closest_hit<K>(
    origin: Vec3,
    direction: Vec3,
    targets: impl IntoIterator<Item = (K, Vec3, f32)>,
) -> Option<K> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    let mut closest: Option<(K, f32)> = None;
    for (key, center, radius) in targets {
        let t = (center - origin).dot(direction);
        if t <= 0.0 {
            continue;
        }
        let closest_point = origin + direction * t;
        if closest_point.distance(center) >= radius {
            continue;
        }
        if closest.as_ref().map_or(true, |(_, best)| t < *best) {
            closest = Some((key, t));
        }
    }
    closest.map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_nearest() {
        let targets = vec![
            ("far", Vec3::new(0.0, 0.0, -10.0), 1.0),
            ("near", Vec3::new(0.0, 0.0, -5.0), 1.0),
        ];
        assert_eq!(closest_hit(Vec3::ZERO, Vec3::NEG_Z, targets), Some("near"));
    }

    #[test]
    fn test_miss_and_behind() {
        let targets = vec![
            ("aside", Vec3::new(5.0, 0.0, -5.0), 1.0),
            ("behind", Vec3::new(0.0, 0.0, 5.0), 1.0),
        ];
        assert_eq!(closest_hit(Vec3::ZERO, Vec3::NEG_Z, targets), None);
    }

    #[test]
    fn test_unnormalized_direction() {
        let targets = vec![(1, Vec3::new(0.0, 0.5, -4.0), 0.6)];
        assert_eq!(closest_hit(Vec3::ZERO, Vec3::new(0.0, 0.0, -20.0), targets), Some(1));
    }
}
