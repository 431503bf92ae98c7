use super::*;
use approx::assert_relative_eq;

#[test]
fn test_left_profile_stays_left_of_split() {
    let profile = left_profile(0.7, 0.5);
    assert_eq!(profile.side(), ProfileSide::Left);
    assert!(profile.points().iter().all(|p| p.x <= 0.0));
    assert!(profile.points().iter().any(|p| p.x < -0.34));
}

#[test]
fn test_profiles_are_counter_clockwise() {
    for side in ProfileSide::ALL {
        let profile = CrossSectionProfile::new(side, 0.7, 0.5);
        assert!(profile.signed_area() > 0.0, "{} half is clockwise", side.name());
    }
}

#[test]
fn test_right_is_exact_mirror_of_left() {
    let left = left_profile(0.7, 0.5);
    let right = right_profile(0.7, 0.5);
    assert_eq!(left.vertex_count(), right.vertex_count());

    let n = left.vertex_count();
    for (i, p) in left.points().iter().enumerate() {
        let q = right.points()[n - 1 - i];
        assert_eq!(q.x, -p.x);
        assert_eq!(q.y, p.y);
    }
    assert_relative_eq!(left.signed_area(), right.signed_area(), epsilon = 1e-12);
}

#[test]
fn test_split_line_vertices_coincide() {
    let left = left_profile(0.7, 0.5);
    let right = right_profile(0.7, 0.5);

    let mut left_seam: Vec<f64> = left.points().iter().filter(|p| p.x == 0.0).map(|p| p.y).collect();
    let mut right_seam: Vec<f64> = right.points().iter().filter(|p| p.x == 0.0).map(|p| p.y).collect();
    left_seam.sort_by(f64::total_cmp);
    right_seam.sort_by(f64::total_cmp);

    // Bottom edge, bore bottom, bore top and top edge
    assert_eq!(left_seam, vec![-0.35, -0.25, 0.25, 0.35]);
    assert_eq!(left_seam, right_seam);
}

#[test]
fn test_area_is_half_rounded_square_minus_half_bore() {
    let (outer, inner) = (0.7, 0.5);
    let profile = CrossSectionProfile::with_segments(ProfileSide::Left, outer, inner, 64);

    let r = outer / 4.0;
    let half_square = outer * outer / 2.0 - (4.0 - std::f64::consts::PI) * r * r / 2.0;
    let half_bore = std::f64::consts::PI * (inner / 2.0).powi(2) / 2.0;
    assert_relative_eq!(profile.signed_area(), half_square - half_bore, max_relative = 1e-3);
}

#[test]
fn test_no_consecutive_duplicates() {
    let profile = left_profile(0.7, 0.5);
    let n = profile.vertex_count();
    for i in 0..n {
        let a = profile.points()[i];
        let b = profile.points()[(i + 1) % n];
        assert!(a.distance(b) > EPSILON, "duplicate at {i}");
    }
}

#[test]
fn test_vertex_count() {
    // 8 arc endpoints plus the interior points of a 24 segment bore and two
    // 12 segment corners
    let profile = left_profile(0.7, 0.5);
    assert_eq!(profile.vertex_count(), 8 + 23 + 11 + 11);
}

#[test]
fn test_garbage_sizes_are_clamped() {
    let profile = left_profile(f64::NAN, -1.0);
    let min_x = profile.points().iter().map(|p| p.x).fold(f64::MAX, f64::min);
    assert_relative_eq!(min_x, -MIN_PROFILE_OUTER_SIZE / 2.0, epsilon = 1e-12);
    assert!(profile.signed_area() > 0.0);
}
