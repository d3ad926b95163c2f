//! Property tests for the compass projection and diff math.

use proptest::prelude::*;

use civic_compass::{
    build_sphere_basis, diff_scores, normalize_axis_value, rotate, to_political_compass, Axis,
    AxisScores, CanvasFrame, CompassConfig, CompassReading, ConfidenceMap, SphereLayout, Vec3,
    ViewAngle, AXIS_COUNT,
};

const EPS: f64 = 1e-9;

fn score() -> impl Strategy<Value = f64> {
    -1.0f64..=1.0
}

fn axis_scores() -> impl Strategy<Value = AxisScores> {
    prop::collection::vec(prop::option::of(score()), AXIS_COUNT).prop_map(|values| {
        let mut scores = AxisScores::new();
        for (axis, value) in Axis::ALL.iter().zip(values) {
            if let Some(v) = value {
                scores.set(*axis, v).expect("score in range");
            }
        }
        scores
    })
}

#[test]
fn test_political_compass_reference_points() {
    let economic = AxisScores::from_pairs(&[(Axis::Economy, 1.0)]).unwrap();
    let point = to_political_compass(&economic);
    assert_eq!((point.economic, point.social), (1.0, 0.0));

    let libertarian = AxisScores::from_pairs(&[
        (Axis::Governance, 1.0),
        (Axis::CivilLiberties, 1.0),
        (Axis::Society, 1.0),
        (Axis::Justice, 1.0),
    ])
    .unwrap();
    let point = to_political_compass(&libertarian);
    assert_eq!((point.economic, point.social), (0.0, -1.0));
}

proptest! {
    #[test]
    fn prop_sphere_basis_unit_vectors(n in 1usize..256) {
        let basis = build_sphere_basis(n);
        prop_assert_eq!(basis.len(), n);
        for v in basis {
            prop_assert!((v.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn prop_rotate_preserves_length(
        x in -10.0f64..10.0,
        y in -10.0f64..10.0,
        z in -10.0f64..10.0,
        yaw in -20.0f64..20.0,
        pitch in -20.0f64..20.0,
    ) {
        let v = Vec3::new(x, y, z);
        let r = rotate(v, yaw, pitch);
        prop_assert!((r.length() - v.length()).abs() < 1e-9 * (1.0 + v.length()));
    }

    #[test]
    fn prop_normalize_monotonic(a in score(), b in score()) {
        let (na, nb) = (normalize_axis_value(a), normalize_axis_value(b));
        prop_assert!((0.0..=1.0).contains(&na));
        if a < b {
            prop_assert!(na <= nb);
        }
    }

    #[test]
    fn prop_political_compass_in_range(scores in axis_scores()) {
        let point = to_political_compass(&scores);
        prop_assert!((-1.0..=1.0).contains(&point.economic));
        prop_assert!((-1.0..=1.0).contains(&point.social));
    }

    #[test]
    fn prop_self_diff_is_zero(scores in axis_scores()) {
        let result = diff_scores(&scores, &scores);
        prop_assert_eq!(result.total_shift, 0.0);
        prop_assert!(result.deltas.iter().all(|s| s.delta == 0.0));
    }

    #[test]
    fn prop_diff_antisymmetric(a in axis_scores(), b in axis_scores()) {
        let ab = diff_scores(&a, &b);
        let ba = diff_scores(&b, &a);
        for axis in Axis::ALL {
            prop_assert_eq!(ab.delta(axis), -ba.delta(axis));
        }
        prop_assert_eq!(ab.biggest_shift.axis, ba.biggest_shift.axis);
    }

    #[test]
    fn prop_biggest_shift_is_maximal(a in axis_scores(), b in axis_scores()) {
        let result = diff_scores(&a, &b);
        let biggest = result.biggest_shift.delta.abs();
        for shift in &result.deltas {
            prop_assert!(shift.delta.abs() <= biggest);
        }
        let sum: f64 = result.deltas.iter().map(|s| s.delta.abs()).sum();
        prop_assert_eq!(result.total_shift, sum);
    }

    #[test]
    fn prop_layout_stays_on_canvas(
        scores in axis_scores(),
        yaw in -10.0f64..10.0,
        pitch in -10.0f64..10.0,
        width in 120.0f64..1200.0,
        height in 80.0f64..1200.0,
    ) {
        let config = CompassConfig::default();
        let reading = CompassReading::new(scores, ConfidenceMap::new());
        let frame = CanvasFrame::fit_within(width, height, &config.render);
        let layout = SphereLayout::compute(&reading, ViewAngle::new(yaw, pitch), frame, &config);
        prop_assert!(layout.fits_canvas());
    }
}
