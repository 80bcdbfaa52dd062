#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use test_case::test_case;

    use perfo_rs::entities::{GroupSpec, LayoutRequest, MarginBand, SpacingPolicy};
    use perfo_rs::geometry::{Axis, ShapeKind, ShapeSpec};
    use perfo_rs::solver::{LayoutEngine, StaggerMode, StaggerPolicy, StaggerRules};
    use perfo_rs::util::{MarginMode, SolverConfig, assertions};
    use perfo_rs::{LayoutError, compute_layout};

    const EPS: f64 = 1e-9;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn squares_stretched_to_target_margin() {
        init_logger();
        let layout = compute_layout(
            500.0,
            300.0,
            ShapeSpec::square(10.0).unwrap(),
            SpacingPolicy::stretch_to_margin(10.0, 17.0).unwrap(),
            StaggerMode::Half,
            None,
        )
        .unwrap();

        assert!(approx_eq!(f64, layout.x.margin, 17.0, epsilon = EPS));
        assert!(approx_eq!(f64, layout.y.margin, 17.0, epsilon = EPS));
        assert!(approx_eq!(f64, layout.occupied_width(), 466.0, epsilon = EPS));
        assert!(approx_eq!(f64, layout.occupied_height(), 266.0, epsilon = EPS));
        assert_eq!(layout.count_x(), 23);
        assert_eq!(layout.count_y(), 13);
        assert!(layout.x.pitch >= 20.0);

        //squares keep every column on shifted rows
        assert_eq!(layout.row_count(1), layout.row_count(0));
        assert_eq!(layout.row_offset(1), layout.x.pitch / 2.0);
        assert_eq!(layout.n_shapes(), 23 * 13);
        assert!(assertions::cells_within_sheet(&layout));
        //shifted rows hang half a pitch past the right margin, nothing was reserved for them
        assert_eq!(layout.x.stagger_extra, 0.0);
        assert!(assertions::cells_are_centered(&layout));
    }

    #[test]
    fn slots_in_gap_and_margin_bands() {
        init_logger();
        let band = MarginBand::try_new(18.0, 27.0).unwrap();
        let spacing = SpacingPolicy::try_new(8.5, Some(13.0), band).unwrap();
        let layout = compute_layout(
            1000.0,
            500.0,
            ShapeSpec::slot(40.0, 8.5).unwrap(),
            spacing,
            StaggerMode::None,
            None,
        )
        .unwrap();

        for (axis, item) in [(&layout.x, 40.0), (&layout.y, 8.5)] {
            assert!(band.contains(axis.margin), "margin {}", axis.margin);
            assert!(axis.pitch >= item + 8.5 - EPS && axis.pitch <= item + 13.0 + EPS);
        }
        assert!(assertions::layout_is_centered(&layout));
        assert!(assertions::cells_are_centered(&layout));
    }

    #[test]
    fn staggered_slots_stay_centered() {
        let layout = compute_layout(
            1000.0,
            500.0,
            ShapeSpec::slot(35.0, 10.0).unwrap(),
            SpacingPolicy::stretch_to_margin(10.0, 17.0).unwrap(),
            StaggerMode::Half,
            None,
        )
        .unwrap();
        assert_eq!(layout.x.stagger_extra, 0.0);
        assert_eq!(layout.row_count(1), layout.row_count(0) - 1);
        assert!(approx_eq!(f64, layout.x.margin, 17.0, epsilon = EPS));
        assert!(assertions::cells_are_centered(&layout));
    }

    #[test]
    fn sheet_too_small_reports_axis() {
        init_logger();
        let err = compute_layout(
            20.0,
            300.0,
            ShapeSpec::square(10.0).unwrap(),
            SpacingPolicy::stretch_to_margin(10.0, 17.0).unwrap(),
            StaggerMode::None,
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            LayoutError::SheetTooSmall {
                axis: Axis::X,
                available: 20.0,
                required: 44.0
            }
        );
    }

    #[test]
    fn single_shape_exact_fit() {
        let layout = compute_layout(
            44.0,
            44.0,
            ShapeSpec::square(10.0).unwrap(),
            SpacingPolicy::stretch_to_margin(10.0, 17.0).unwrap(),
            StaggerMode::None,
            None,
        )
        .unwrap();
        assert_eq!((layout.count_x(), layout.count_y()), (1, 1));
        assert!(approx_eq!(f64, layout.x.margin, 17.0, epsilon = EPS));
        assert_eq!(layout.n_shapes(), 1);
    }

    #[test]
    fn staggered_diamonds_drop_a_column_and_stay_centered() {
        init_logger();
        let diamond = ShapeSpec::diamond_from_diagonal(10.0).unwrap();
        let layout = compute_layout(
            500.0,
            300.0,
            diamond,
            SpacingPolicy::stretch_to_margin(10.0, 17.0).unwrap(),
            StaggerMode::Half,
            None,
        )
        .unwrap();

        assert_eq!(layout.x.stagger_extra, 0.0);
        assert_eq!(layout.count_x(), 23);
        assert!(approx_eq!(f64, layout.x.margin, 17.0, epsilon = EPS));
        assert_eq!(layout.row_count(1), layout.row_count(0) - 1);
        assert_eq!(layout.cells().count(), layout.n_shapes());
        assert!(assertions::layout_is_centered(&layout));
        assert!(assertions::cells_are_centered(&layout));
        assert!(assertions::cells_within_sheet(&layout));

        //the last shape of a shifted row ends before the last one of an unshifted row
        let half_w = layout.bbox.width / 2.0;
        let right_edge = |row: usize| {
            layout
                .cells()
                .filter(|c| c.row == row)
                .map(|c| c.center.0 + half_w)
                .fold(f64::NEG_INFINITY, f64::max)
        };
        assert!(approx_eq!(f64, 500.0 - right_edge(0), 17.0, epsilon = EPS));
        assert!(right_edge(1) < right_edge(0));
    }

    #[test_case(StaggerPolicy::RESERVE, 23, 23; "reserve")]
    #[test_case(StaggerPolicy { drop_last_column: true, reserve_offset: true }, 23, 22; "drop overrides reserve")]
    fn diamond_stagger_policies_are_centered(policy: StaggerPolicy, even: usize, odd: usize) {
        let engine = LayoutEngine::new(SolverConfig {
            stagger_rules: StaggerRules {
                diamond: policy,
                ..StaggerRules::default()
            },
            ..SolverConfig::default()
        });
        let request = LayoutRequest::new(
            500.0,
            300.0,
            ShapeSpec::diamond_from_diagonal(10.0).unwrap(),
            SpacingPolicy::stretch_to_margin(10.0, 17.0).unwrap(),
            StaggerMode::Half,
            None,
        );
        let layout = engine.compute(&request).unwrap();

        assert_eq!((layout.row_count(0), layout.row_count(1)), (even, odd));
        assert!(approx_eq!(f64, layout.x.margin, 17.0, epsilon = EPS));
        let reserved = match policy.reserves_offset() {
            true => layout.row_offset(1),
            false => 0.0,
        };
        assert!(approx_eq!(f64, layout.x.stagger_extra, reserved, epsilon = EPS));
        assert!(assertions::cells_are_centered(&layout));
        assert!(assertions::cells_within_sheet(&layout));
    }

    #[test]
    fn reserved_room_is_half_the_final_pitch() {
        let layout = compute_layout(
            500.0,
            313.0,
            ShapeSpec::square(10.0).unwrap(),
            SpacingPolicy::try_new(10.0, None, MarginBand::at_least(5.0).unwrap()).unwrap(),
            StaggerMode::Half,
            None,
        )
        .unwrap();
        //without reservation the margin of 5 cannot hold the shifted rows: 24 columns, 10 + 23 * 20 + 10 = 480
        assert_eq!(layout.count_x(), 24);
        assert_eq!(layout.x.pitch, 20.0);
        assert_eq!(layout.x.stagger_extra, 10.0);
        assert_eq!(layout.x.margin, 10.0);
        assert_eq!(layout.row_count(1), 24);
        assert!(assertions::cells_are_centered(&layout));
    }

    #[test]
    fn banded_layout_of_squares() {
        init_logger();
        let spacing = SpacingPolicy::try_new(5.0, None, MarginBand::try_new(15.0, 30.0).unwrap())
            .unwrap();
        let group = GroupSpec::try_new(8, Some(12), 40.0).unwrap();
        let layout = compute_layout(
            1000.0,
            500.0,
            ShapeSpec::square(10.0).unwrap(),
            spacing,
            StaggerMode::None,
            Some(group),
        )
        .unwrap();

        let groups = layout.groups.unwrap();
        assert_eq!((groups.columns_per_group, groups.groups), (11, 5));
        assert_eq!(layout.x.margin, 20.0);
        assert_eq!(layout.count_x(), 55);
        assert_eq!(layout.count_y(), 31);
        assert_eq!(layout.n_shapes(), 55 * 31);

        //first shape of the second group sits one group width and one inter group gap further
        let cell = layout.cells().nth(11).unwrap();
        assert_eq!(cell.row, 0);
        assert!(approx_eq!(f64, cell.center.0, 20.0 + 200.0 + 5.0, epsilon = EPS));
        assert!(assertions::cells_within_sheet(&layout));
    }

    #[test]
    fn equal_margins_on_both_axes() {
        init_logger();
        let engine = LayoutEngine::new(SolverConfig {
            margin_mode: MarginMode::Equal,
            ..SolverConfig::default()
        });
        let spacing = SpacingPolicy::try_new(10.0, None, MarginBand::at_least(17.0).unwrap())
            .unwrap();
        let request = LayoutRequest::new(
            500.0,
            310.0,
            ShapeSpec::square(10.0).unwrap(),
            spacing,
            StaggerMode::None,
            None,
        );

        let independent = LayoutEngine::default().compute(&request).unwrap();
        assert_eq!(independent.x.margin, 25.0);
        assert_eq!(independent.y.margin, 20.0);

        let layout = engine.compute(&request).unwrap();
        assert!(approx_eq!(f64, layout.x.margin, 25.0, epsilon = EPS));
        assert!(approx_eq!(f64, layout.y.margin, 25.0, epsilon = EPS));
        assert_eq!(layout.count_y(), 13);
        assert!(assertions::cells_are_centered(&layout));
    }

    #[test]
    fn equal_margins_recompute_the_reserved_room() {
        init_logger();
        let engine = LayoutEngine::new(SolverConfig {
            margin_mode: MarginMode::Equal,
            ..SolverConfig::default()
        });
        let spacing =
            SpacingPolicy::try_new(10.0, None, MarginBand::at_least(5.0).unwrap()).unwrap();
        let request = LayoutRequest::new(
            500.0,
            313.0,
            ShapeSpec::square(10.0).unwrap(),
            spacing,
            StaggerMode::Half,
            None,
        );
        let layout = engine.compute(&request).unwrap();

        //Y: 15 rows, 10 + 14 * 20 = 290, margin 11.5
        assert!(approx_eq!(f64, layout.y.margin, 11.5, epsilon = EPS));
        assert!(approx_eq!(f64, layout.x.margin, 11.5, epsilon = EPS));
        //X: 467 left for 22.5 pitches
        assert_eq!(layout.count_x(), 23);
        assert!(approx_eq!(f64, layout.x.pitch, 467.0 / 22.5, epsilon = EPS));
        assert!(approx_eq!(f64, layout.x.stagger_extra, layout.x.pitch / 2.0, epsilon = EPS));
        assert!(assertions::layout_is_centered(&layout));
        assert!(assertions::cells_are_centered(&layout));
    }

    #[test]
    fn equal_margins_beyond_max_gap() {
        let engine = LayoutEngine::new(SolverConfig {
            margin_mode: MarginMode::Equal,
            ..SolverConfig::default()
        });
        let spacing =
            SpacingPolicy::try_new(10.0, Some(10.0), MarginBand::at_least(17.0).unwrap()).unwrap();
        let request = LayoutRequest::new(
            500.0,
            310.0,
            ShapeSpec::square(10.0).unwrap(),
            spacing,
            StaggerMode::None,
            None,
        );
        assert_eq!(
            engine.compute(&request).unwrap_err(),
            LayoutError::MarginUnreachable {
                axis: Axis::Y,
                margin: 25.0
            }
        );
    }

    #[test_case(ShapeKind::Square; "square")]
    #[test_case(ShapeKind::Diamond; "diamond")]
    #[test_case(ShapeKind::Circle; "circle")]
    #[test_case(ShapeKind::Slot; "slot")]
    fn every_kind_is_laid_out(kind: ShapeKind) {
        let shape = ShapeSpec::try_new(kind, 12.0, Some(4.0)).unwrap();
        let spacing = SpacingPolicy::stretch_to_margin(6.0, 15.0).unwrap();
        for stagger in [StaggerMode::None, StaggerMode::Half] {
            let layout = compute_layout(800.0, 600.0, shape, spacing, stagger, None).unwrap();
            assert!(layout.n_shapes() > 0);
            assert_eq!(layout.cells().count(), layout.n_shapes());
            assert!(assertions::layout_is_centered(&layout));
            assert!(assertions::cells_are_centered(&layout));
            assert!(assertions::cells_within_sheet(&layout));
        }
    }

    #[test]
    fn repeated_requests_give_identical_layouts() {
        let engine = LayoutEngine::default();
        let request = LayoutRequest::new(
            1234.5,
            678.9,
            ShapeSpec::circle(7.5).unwrap(),
            SpacingPolicy::try_new(3.0, Some(6.0), MarginBand::try_new(10.0, 20.0).unwrap())
                .unwrap(),
            StaggerMode::Half,
            None,
        );
        assert_eq!(engine.compute(&request), engine.compute(&request));
    }

    #[test_case(0.0, 300.0; "zero width")]
    #[test_case(500.0, -1.0; "negative height")]
    #[test_case(f64::NAN, 300.0; "nan width")]
    fn invalid_sheet(width: f64, height: f64) {
        let err = compute_layout(
            width,
            height,
            ShapeSpec::square(10.0).unwrap(),
            SpacingPolicy::stretch_to_margin(10.0, 17.0).unwrap(),
            StaggerMode::None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSheet(_)));
    }

    #[test]
    fn invalid_spacing_is_rejected_before_solving() {
        let err = SpacingPolicy::try_new(12.0, Some(8.0), MarginBand::at_least(5.0).unwrap())
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSpacingPolicy(_)));
        assert!(matches!(
            MarginBand::try_new(20.0, 10.0),
            Err(LayoutError::InvalidSpacingPolicy(_))
        ));
    }
}
