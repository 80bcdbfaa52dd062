use float_cmp::approx_eq;
use proptest::prelude::*;

use perfo_rs::entities::{MarginBand, SpacingPolicy};
use perfo_rs::geometry::ShapeSpec;
use perfo_rs::solver::{StaggerMode, solve_axis};
use perfo_rs::util::SolverConfig;
use perfo_rs::{LayoutError, compute_layout};

const EPS: f64 = 1e-6;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn margins_are_symmetric(
        width in 50.0..2000.0f64,
        height in 50.0..2000.0f64,
        size in 1.0..40.0f64,
        gap in 0.0..20.0f64,
        floor in 0.0..30.0f64,
        stretch in any::<bool>(),
    ) {
        let spacing = match stretch {
            true => SpacingPolicy::stretch_to_margin(gap, floor).unwrap(),
            false => SpacingPolicy::try_new(gap, None, MarginBand::at_least(floor).unwrap()).unwrap(),
        };
        let shape = ShapeSpec::square(size).unwrap();
        match compute_layout(width, height, shape, spacing, StaggerMode::None, None) {
            Ok(layout) => {
                prop_assert!(layout.count_x() >= 1 && layout.count_y() >= 1);
                prop_assert!(approx_eq!(f64, 2.0 * layout.x.margin + layout.occupied_width(), width, epsilon = EPS));
                prop_assert!(approx_eq!(f64, 2.0 * layout.y.margin + layout.occupied_height(), height, epsilon = EPS));
                prop_assert!(layout.x.margin >= floor - EPS);
                prop_assert!(layout.y.margin >= floor - EPS);
            }
            Err(LayoutError::SheetTooSmall { available, required, .. }) => {
                prop_assert!(available < required);
            }
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }

    #[test]
    fn count_never_drops_on_a_longer_axis(
        length in 20.0..3000.0f64,
        extra in 0.0..500.0f64,
        size in 1.0..40.0f64,
        gap in 0.0..20.0f64,
        floor in 0.0..10.0f64,
    ) {
        let config = SolverConfig::default();
        let policy = SpacingPolicy::try_new(gap, None, MarginBand::at_least(floor).unwrap()).unwrap();
        let short = solve_axis(length, size, &policy, 0.0, &config);
        let long = solve_axis(length + extra, size, &policy, 0.0, &config);
        if let Ok(short) = short {
            let long = long.unwrap();
            prop_assert!(long.count >= short.count, "{} < {}", long.count, short.count);
        }
    }

    #[test]
    fn wide_band_is_always_hit(
        length in 100.0..3000.0f64,
        size in 1.0..40.0f64,
        gap in 0.0..20.0f64,
        floor in 0.0..20.0f64,
    ) {
        //with a fixed pitch p, the margin can always be brought within p/2 of the floor
        let pitch = size + gap;
        let band = MarginBand::try_new(floor, floor + pitch / 2.0 + 1.0).unwrap();
        let policy = SpacingPolicy::try_new(gap, None, band).unwrap();
        prop_assume!(length >= size + 2.0 * floor);
        let sol = solve_axis(length, size, &policy, 0.0, &SolverConfig::default()).unwrap();
        prop_assert!(band.contains(sol.margin), "margin {} outside [{}, {}]", sol.margin, band.min, band.max);
    }

    #[test]
    fn stretched_layouts_hit_the_target(
        length in 100.0..3000.0f64,
        size in 1.0..40.0f64,
        gap in 0.0..20.0f64,
        target in 0.0..20.0f64,
    ) {
        //room for at least two shapes, a single one cannot be stretched
        prop_assume!(length - size - 2.0 * target >= size + gap + 1.0);
        let policy = SpacingPolicy::stretch_to_margin(gap, target).unwrap();
        let sol = solve_axis(length, size, &policy, 0.0, &SolverConfig::default()).unwrap();
        prop_assert!(approx_eq!(f64, sol.margin, target, epsilon = EPS));
        prop_assert!(sol.pitch >= size + gap - EPS);
    }
}
