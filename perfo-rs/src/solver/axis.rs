use std::cmp::Ordering;

use log::{debug, trace};

use crate::LayoutError;
use crate::entities::{MarginScore, SpacingPolicy};
use crate::geometry::Axis;
use crate::solver::iteration_cap;
use crate::util::{FPA, SolverConfig};

/// Shape count, pitch and margin along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisSolution {
    pub count: usize,
    /// Center-to-center distance between consecutive shapes
    pub pitch: f64,
    /// Distance between each sheet edge and the tiled block, identical on both sides
    pub margin: f64,
    /// Extra length reserved for staggered rows.
    ///
    /// Whatever was passed to [`solve_axis`], or exactly `pitch / 2` for [`StaggerRoom::HalfPitch`].
    /// Only in the latter case do shifted rows end on the far margin.
    pub stagger_extra: f64,
}

impl AxisSolution {
    /// Length covered by the tiled block, reserved stagger room included
    pub fn occupied(&self, item_size: f64) -> f64 {
        item_size + self.count.saturating_sub(1) as f64 * self.pitch + self.stagger_extra
    }
}

/// Room an axis reserves behind its last shape for rows shifted along it
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StaggerRoom {
    /// A length known before solving
    Fixed(f64),
    /// Half of the pitch being solved for
    HalfPitch,
}

impl StaggerRoom {
    pub const NONE: StaggerRoom = StaggerRoom::Fixed(0.0);

    /// Reserved length at `pitch`
    pub fn at_pitch(&self, pitch: f64) -> f64 {
        match self {
            StaggerRoom::Fixed(extra) => *extra,
            StaggerRoom::HalfPitch => pitch / 2.0,
        }
    }

    /// Part of the reservation that does not scale with the pitch
    fn fixed(&self) -> f64 {
        match self {
            StaggerRoom::Fixed(extra) => *extra,
            StaggerRoom::HalfPitch => 0.0,
        }
    }

    /// Number of pitches spanned by `count` shapes and the reservation
    fn pitches_spanned(&self, count: usize) -> f64 {
        let steps = count.saturating_sub(1) as f64;
        match self {
            StaggerRoom::Fixed(_) => steps,
            StaggerRoom::HalfPitch => steps + 0.5,
        }
    }
}

/// Reasons an axis solver can come back empty-handed
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SolverFailure {
    /// No count >= 1 keeps the margin above the floor
    SheetTooSmall { available: f64, required: f64 },
    /// A margin fixed by the caller cannot be realised within the allowed pitches
    MarginUnreachable { margin: f64 },
}

impl SolverFailure {
    pub fn on_axis(self, axis: Axis) -> LayoutError {
        match self {
            SolverFailure::SheetTooSmall {
                available,
                required,
            } => LayoutError::SheetTooSmall {
                axis,
                available,
                required,
            },
            SolverFailure::MarginUnreachable { margin } => {
                LayoutError::MarginUnreachable { axis, margin }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    count: usize,
    pitch: f64,
    margin: f64,
    score: MarginScore,
}

impl Candidate {
    /// Better margin first, then more shapes, then the tighter pitch
    fn cmp_preference(&self, other: &Candidate) -> Ordering {
        self.score
            .compare(&other.score)
            .then_with(|| other.count.cmp(&self.count))
            .then_with(|| {
                FPA(self.pitch)
                    .partial_cmp(&FPA(other.pitch))
                    .unwrap_or(Ordering::Equal)
            })
    }
}

/// Evaluates `(count, pitch)` pairs on a single axis and keeps the preferred one.
struct AxisSearch<'a> {
    available: f64,
    item_size: f64,
    room: StaggerRoom,
    policy: &'a SpacingPolicy,
    best: Option<Candidate>,
    n_evaluated: usize,
}

impl AxisSearch<'_> {
    fn margin_of(&self, count: usize, pitch: f64) -> f64 {
        let occupied =
            self.item_size + self.room.pitches_spanned(count) * pitch + self.room.fixed();
        (self.available - occupied) / 2.0
    }

    fn offer(&mut self, count: usize, pitch: f64) {
        self.n_evaluated += 1;
        let band = &self.policy.margin_band;
        let margin = self.margin_of(count, pitch);
        if FPA(margin) < FPA(band.min) {
            return;
        }
        let candidate = Candidate {
            count,
            pitch,
            margin,
            score: band.score(margin),
        };
        let improves = match &self.best {
            None => true,
            Some(best) => candidate.cmp_preference(best) == Ordering::Less,
        };
        if improves {
            trace!(
                "[AXIS] better: count {count}, pitch {pitch:.4}, margin {margin:.4} (in band: {})",
                candidate.score.in_band
            );
            self.best = Some(candidate);
        }
    }
}

/// Evenly spaced pitches covering `[p_min, p_max]`, both ends included.
fn pitch_sweep(p_min: f64, p_max: f64, config: &SolverConfig) -> impl Iterator<Item = f64> {
    let n_steps = match FPA(p_max) > FPA(p_min) {
        false => 0,
        true => {
            let wanted = ((p_max - p_min) / config.gap_step).ceil() as usize;
            wanted.clamp(1, config.max_pitch_candidates.max(2) - 1)
        }
    };
    (0..=n_steps).map(move |i| match n_steps {
        0 => p_min,
        _ => p_min + (p_max - p_min) * i as f64 / n_steps as f64,
    })
}

/// Number of whole pitches fitting in `room`, tolerant to rounding
fn whole_pitches(room: f64, pitch: f64) -> usize {
    (room / pitch + FPA::EPSILON).floor().max(0.0) as usize
}

/// Solves a single axis: the `(count, pitch, margin)` whose margin fits `policy.margin_band` best.
///
/// Candidates are every count at every pitch of a bounded sweep over `[item + min_gap, item + max_gap]`,
/// plus, for every count, the pitch that puts the margin exactly on the band's target (when that pitch is allowed).
/// Candidates with a margin below the floor are rejected. Of the rest, an in-band margin closest to the target
/// wins, otherwise the smallest margin above the band. Ties go to the larger count.
pub fn solve_axis(
    available_length: f64,
    item_size: f64,
    policy: &SpacingPolicy,
    stagger_extra: f64,
    config: &SolverConfig,
) -> Result<AxisSolution, SolverFailure> {
    solve_axis_with_room(
        available_length,
        item_size,
        policy,
        StaggerRoom::Fixed(stagger_extra),
        config,
    )
}

/// [`solve_axis`] for a block whose shifted rows keep every shape: half of the chosen pitch is reserved,
/// so the shifted rows end exactly on the far margin.
pub fn solve_staggered_axis(
    available_length: f64,
    item_size: f64,
    policy: &SpacingPolicy,
    config: &SolverConfig,
) -> Result<AxisSolution, SolverFailure> {
    solve_axis_with_room(
        available_length,
        item_size,
        policy,
        StaggerRoom::HalfPitch,
        config,
    )
}

fn solve_axis_with_room(
    available_length: f64,
    item_size: f64,
    policy: &SpacingPolicy,
    room: StaggerRoom,
    config: &SolverConfig,
) -> Result<AxisSolution, SolverFailure> {
    let band = policy.margin_band;
    let (p_min, p_max) = policy.pitch_range(item_size);
    let required = item_size + room.at_pitch(p_min) + 2.0 * band.min;
    if FPA(available_length) < FPA(required) {
        debug!("[AXIS] {available_length} available, {required} required for a single shape");
        return Err(SolverFailure::SheetTooSmall {
            available: available_length,
            required,
        });
    }

    let cap = iteration_cap(available_length, p_min);

    let mut search = AxisSearch {
        available: available_length,
        item_size,
        room,
        policy,
        best: None,
        n_evaluated: 0,
    };

    for pitch in pitch_sweep(p_min, p_max, config) {
        //length left for the (count - 1) pitches once the first shape, the stagger room and both minimal margins are placed
        let slack = available_length - item_size - room.at_pitch(pitch) - 2.0 * band.min;
        if FPA(slack) < FPA(0.0) {
            continue;
        }
        let max_count = usize::min(whole_pitches(slack.max(0.0), pitch) + 1, cap);
        for count in 1..=max_count {
            search.offer(count, pitch);
        }
    }

    //pitches landing the margin exactly on the target
    let stretch_limit = match policy.allows_stretch() {
        true => f64::INFINITY,
        false => p_max,
    };
    if FPA(stretch_limit) > FPA(p_min) {
        let span = available_length - item_size - room.fixed() - 2.0 * band.target();
        if FPA(span) > FPA(0.0) {
            //a single shape only has a pitch when its shifted copy is part of the block
            let first_count = match room {
                StaggerRoom::Fixed(_) => 2,
                StaggerRoom::HalfPitch => 1,
            };
            for count in first_count..=cap {
                let pitch = span / room.pitches_spanned(count);
                if FPA(pitch) < FPA(p_min) {
                    break;
                }
                if FPA(pitch) <= FPA(stretch_limit) {
                    search.offer(count, pitch.max(p_min));
                }
            }
        }
    }

    let n_evaluated = search.n_evaluated;
    match search.best {
        Some(Candidate {
            count,
            pitch,
            margin,
            ..
        }) => {
            debug!(
                "[AXIS] length {available_length}, item {item_size}: count {count}, pitch {pitch:.4}, margin {margin:.4} ({n_evaluated} candidates)"
            );
            Ok(AxisSolution {
                count,
                pitch,
                margin,
                stagger_extra: room.at_pitch(pitch),
            })
        }
        None => Err(SolverFailure::SheetTooSmall {
            available: available_length,
            required,
        }),
    }
}

/// Solves a single axis for a margin fixed at `margin`.
///
/// The count is the largest one that fits at the minimum pitch, the pitch is then stretched so the block
/// (including the stagger `room`) fills the space between both margins exactly. Fails with
/// [`SolverFailure::MarginUnreachable`] when the stretched pitch exceeds the policy's maximum gap,
/// or when a single shape leaves more than `margin` on each side.
pub fn solve_axis_fixed_margin(
    available_length: f64,
    item_size: f64,
    policy: &SpacingPolicy,
    margin: f64,
    room: StaggerRoom,
) -> Result<AxisSolution, SolverFailure> {
    let (p_min, p_max) = policy.pitch_range(item_size);
    let required = item_size + room.at_pitch(p_min) + 2.0 * margin;
    if FPA(available_length) < FPA(required) {
        return Err(SolverFailure::SheetTooSmall {
            available: available_length,
            required,
        });
    }
    let steps = usize::min(
        whole_pitches((available_length - required).max(0.0), p_min),
        iteration_cap(available_length, p_min) - 1,
    );
    let count = steps + 1;
    //length the pitches have to fill
    let span = (available_length - item_size - room.fixed() - 2.0 * margin).max(0.0);

    let pitch = match (room, count) {
        (StaggerRoom::Fixed(_), 1) if FPA(span) == FPA(0.0) => p_min,
        (StaggerRoom::Fixed(_), 1) => return Err(SolverFailure::MarginUnreachable { margin }),
        _ => {
            let pitch = (span / room.pitches_spanned(count)).max(p_min);
            if policy.max_gap.is_some() && FPA(pitch) > FPA(p_max) {
                debug!("[AXIS] margin {margin} needs pitch {pitch:.4}, above the maximum {p_max:.4}");
                return Err(SolverFailure::MarginUnreachable { margin });
            }
            pitch
        }
    };

    let stagger_extra = room.at_pitch(pitch);
    let occupied = item_size + (count - 1) as f64 * pitch + stagger_extra;
    Ok(AxisSolution {
        count,
        pitch,
        margin: (available_length - occupied) / 2.0,
        stagger_extra,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MarginBand;
    use float_cmp::approx_eq;

    fn policy(min_gap: f64, max_gap: Option<f64>, min: f64, max: f64) -> SpacingPolicy {
        SpacingPolicy::try_new(min_gap, max_gap, MarginBand::try_new(min, max).unwrap()).unwrap()
    }

    fn centered(available: f64, item: f64, sol: &AxisSolution) -> bool {
        approx_eq!(
            f64,
            sol.margin,
            (available - sol.occupied(item)) / 2.0,
            epsilon = 1e-9
        )
    }

    #[test]
    fn stretch_to_target_hits_the_margin_exactly() {
        let config = SolverConfig::default();
        let p = SpacingPolicy::stretch_to_margin(10.0, 17.0).unwrap();
        let sol = solve_axis(500.0, 10.0, &p, 0.0, &config).unwrap();
        assert_eq!(sol.count, 23);
        assert!(approx_eq!(f64, sol.margin, 17.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, 10.0 + 22.0 * sol.pitch, 466.0, epsilon = 1e-9));
        assert!(sol.pitch >= 20.0);
    }

    #[test]
    fn floor_only_band_maximises_the_count() {
        let config = SolverConfig::default();
        let p = SpacingPolicy::try_new(10.0, None, MarginBand::at_least(17.0).unwrap()).unwrap();
        let sol = solve_axis(500.0, 10.0, &p, 0.0, &config).unwrap();
        //10 + 22 * 20 = 450 <= 466, 23 shapes
        assert_eq!(sol.count, 23);
        assert_eq!(sol.pitch, 20.0);
        assert_eq!(sol.margin, 25.0);
    }

    #[test]
    fn gap_sweep_lands_in_band() {
        let config = SolverConfig::default();
        let p = policy(8.5, Some(13.0), 18.0, 27.0);
        let sol = solve_axis(1000.0, 40.0, &p, 0.0, &config).unwrap();
        assert!(sol.margin >= 18.0 && sol.margin <= 27.0);
        assert!(sol.pitch >= 48.5 && sol.pitch <= 53.0);
        assert!(centered(1000.0, 40.0, &sol));
    }

    #[test]
    fn fixed_gap_falls_back_to_tightest_margin_above_band() {
        let config = SolverConfig::default();
        //pitch 20, margins for counts 1..: 245, 235, ... each 10 apart, band [3, 4] unreachable
        let p = policy(10.0, None, 3.0, 4.0);
        let sol = solve_axis(500.0, 10.0, &p, 0.0, &config).unwrap();
        //count 25: 10 + 24 * 20 = 490, margin 5
        assert_eq!(sol.count, 25);
        assert_eq!(sol.margin, 5.0);
    }

    #[test]
    fn exact_fit_counts_one() {
        let config = SolverConfig::default();
        let p = policy(10.0, None, 17.0, 30.0);
        let sol = solve_axis(44.0, 10.0, &p, 0.0, &config).unwrap();
        assert_eq!(sol.count, 1);
        assert_eq!(sol.margin, 17.0);
    }

    #[test]
    fn too_small_sheet_fails() {
        let config = SolverConfig::default();
        let p = SpacingPolicy::stretch_to_margin(10.0, 17.0).unwrap();
        let err = solve_axis(20.0, 10.0, &p, 0.0, &config).unwrap_err();
        assert_eq!(
            err,
            SolverFailure::SheetTooSmall {
                available: 20.0,
                required: 44.0
            }
        );
    }

    #[test]
    fn stagger_extra_is_part_of_the_block() {
        let config = SolverConfig::default();
        let p = policy(10.0, None, 5.0, f64::INFINITY);
        let sol = solve_axis(100.0, 10.0, &p, 10.0, &config).unwrap();
        //10 + 3 * 20 + 10 = 80 <= 90
        assert_eq!(sol.count, 4);
        assert_eq!(sol.margin, 10.0);
        assert!(centered(100.0, 10.0, &sol));
    }

    #[test]
    fn half_pitch_room_follows_the_chosen_pitch() {
        let config = SolverConfig::default();
        let p = SpacingPolicy::stretch_to_margin(10.0, 17.0).unwrap();
        let sol = solve_staggered_axis(500.0, 10.0, &p, &config).unwrap();
        //456 = 22.5 pitches
        assert_eq!(sol.count, 23);
        assert!(approx_eq!(f64, sol.pitch, 456.0 / 22.5, epsilon = 1e-9));
        assert_eq!(sol.stagger_extra, sol.pitch / 2.0);
        assert!(approx_eq!(f64, sol.margin, 17.0, epsilon = 1e-9));
        assert!(centered(500.0, 10.0, &sol));
    }

    #[test]
    fn half_pitch_room_needs_space_for_the_shift() {
        let config = SolverConfig::default();
        let p = policy(10.0, None, 5.0, f64::INFINITY);
        //one shape and its shifted copy: 10 + 10 + 2 * 5
        assert!(solve_staggered_axis(30.0, 10.0, &p, &config).is_ok());
        assert_eq!(
            solve_staggered_axis(29.0, 10.0, &p, &config).unwrap_err(),
            SolverFailure::SheetTooSmall {
                available: 29.0,
                required: 30.0
            }
        );
    }

    #[test]
    fn huge_sheets_with_tiny_pitch_terminate() {
        let config = SolverConfig::default();
        let p = policy(0.0, Some(1000.0), 0.0, 1.0);
        let sol = solve_axis(1e4, 0.01, &p, 0.0, &config).unwrap();
        assert!(sol.count >= 1);
        assert!(centered(1e4, 0.01, &sol));
    }

    #[test]
    fn fixed_margin_fills_the_space() {
        let p = policy(10.0, None, 0.0, f64::INFINITY);
        let sol = solve_axis_fixed_margin(300.0, 10.0, &p, 25.0, StaggerRoom::NONE).unwrap();
        //room 240, 12 whole pitches of 20
        assert_eq!(sol.count, 13);
        assert!(approx_eq!(f64, sol.pitch, 20.0));
        assert!(approx_eq!(f64, sol.margin, 25.0));

        let sol = solve_axis_fixed_margin(300.0, 10.0, &p, 24.0, StaggerRoom::NONE).unwrap();
        assert_eq!(sol.count, 13);
        assert!(approx_eq!(f64, sol.pitch, 242.0 / 12.0));
        assert!(approx_eq!(f64, sol.margin, 24.0, epsilon = 1e-9));
    }

    #[test]
    fn fixed_margin_recomputes_half_pitch_room() {
        let p = policy(10.0, None, 0.0, f64::INFINITY);
        let sol = solve_axis_fixed_margin(300.0, 10.0, &p, 25.0, StaggerRoom::HalfPitch).unwrap();
        //240 left: 11.5 pitches of at least 20
        assert_eq!(sol.count, 12);
        assert!(approx_eq!(f64, sol.pitch, 240.0 / 11.5, epsilon = 1e-9));
        assert_eq!(sol.stagger_extra, sol.pitch / 2.0);
        assert!(approx_eq!(f64, sol.margin, 25.0, epsilon = 1e-9));
    }

    #[test]
    fn fixed_margin_respects_gap_ceiling() {
        let p = policy(10.0, Some(10.5), 0.0, f64::INFINITY);
        //room 30 at pitch >= 20: 1 step of 30, gap 20 > 10.5
        let err = solve_axis_fixed_margin(60.0, 10.0, &p, 10.0, StaggerRoom::NONE).unwrap_err();
        assert_eq!(err, SolverFailure::MarginUnreachable { margin: 10.0 });
    }

    #[test]
    fn fixed_margin_single_shape_needs_exact_room() {
        let p = policy(10.0, None, 0.0, f64::INFINITY);
        assert_eq!(
            solve_axis_fixed_margin(30.0, 10.0, &p, 8.0, StaggerRoom::NONE).unwrap_err(),
            SolverFailure::MarginUnreachable { margin: 8.0 }
        );
        let sol = solve_axis_fixed_margin(30.0, 10.0, &p, 10.0, StaggerRoom::NONE).unwrap();
        assert_eq!((sol.count, sol.margin), (1, 10.0));
    }
}
