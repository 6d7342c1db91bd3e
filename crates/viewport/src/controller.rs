//! Explicit viewport state for a geofenced map.
//!
//! The controller owns the authoritative region and at most one in-flight
//! animated transition. Each viewport-change event is clamped; when the
//! center had to move, a transition from the reported view toward the clamped
//! region starts and replaces whatever transition was running. There is no
//! animation queue: the newest target always wins.

use foundation::{GeofenceBounds, Region, ValidationError, ensure_finite};
use tracing::debug;

use crate::clamp::clamp;

/// Recentering animation length (seconds).
pub const DEFAULT_ANIMATION_DURATION_S: f64 = 0.5;

/// A linear transition between two regions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transition {
    pub from: Region,
    pub to: Region,
    pub elapsed_s: f64,
    pub duration_s: f64,
}

impl Transition {
    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        (self.elapsed_s / self.duration_s).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn current(&self) -> Region {
        self.from.lerp(&self.to, self.progress())
    }
}

/// What the map layer must do after a viewport-change event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportUpdate {
    /// New authoritative region.
    pub region: Region,
    pub animation_required: bool,
    /// An in-flight transition was dropped in favor of this event.
    pub superseded: bool,
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    bounds: GeofenceBounds,
    max_delta: f64,
    animation_duration_s: f64,

    /// Last clamped region; the target of any running transition.
    region: Region,

    /// What the map currently shows.
    displayed: Region,

    transition: Option<Transition>,
}

impl ViewportController {
    /// The initial region is clamped without animating.
    pub fn new(
        initial: Region,
        bounds: GeofenceBounds,
        max_delta: f64,
        animation_duration_s: f64,
    ) -> Result<Self, ValidationError> {
        let animation_duration_s =
            ensure_finite("animationDuration", animation_duration_s)?.max(0.0);
        let start = clamp(&initial, &bounds, max_delta)?.region;
        Ok(Self {
            bounds,
            max_delta,
            animation_duration_s,
            region: start,
            displayed: start,
            transition: None,
        })
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn displayed_region(&self) -> Region {
        self.displayed
    }

    pub fn bounds(&self) -> &GeofenceBounds {
        &self.bounds
    }

    pub fn max_delta(&self) -> f64 {
        self.max_delta
    }

    pub fn animation_duration_s(&self) -> f64 {
        self.animation_duration_s
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Handle a viewport reported by the map. On error the state is unchanged.
    pub fn on_region_change(
        &mut self,
        candidate: Region,
    ) -> Result<ViewportUpdate, ValidationError> {
        let out = clamp(&candidate, &self.bounds, self.max_delta)?;
        let superseded = self.transition.take().is_some();
        self.region = out.region;

        if out.animation_required && self.animation_duration_s > 0.0 {
            let target = out.region;
            if superseded {
                debug!(?target, "newer target supersedes in-flight transition");
            } else {
                debug!(?target, "recentering into geofence");
            }
            self.displayed = candidate;
            self.transition = Some(Transition {
                from: candidate,
                to: out.region,
                elapsed_s: 0.0,
                duration_s: self.animation_duration_s,
            });
        } else {
            self.displayed = out.region;
        }

        Ok(ViewportUpdate {
            region: out.region,
            animation_required: out.animation_required,
            superseded,
        })
    }

    /// Advance the running transition by `dt_s` seconds and return the
    /// displayed region.
    pub fn update(&mut self, dt_s: f64) -> Region {
        let dt_s = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
        if let Some(t) = self.transition.as_mut() {
            t.elapsed_s += dt_s;
            if t.is_finished() {
                self.displayed = t.to;
                self.transition = None;
            } else {
                self.displayed = t.current();
            }
        }
        self.displayed
    }

    /// Finish any running transition immediately.
    pub fn stop_animation(&mut self) {
        if self.transition.take().is_some() {
            self.displayed = self.region;
        }
    }
}

#[cfg(test)]
mod tests {
    use foundation::{DEFAULT_MAX_DELTA, Region, ValidationError, yala_bounds};
    use pretty_assertions::assert_eq;

    use super::{DEFAULT_ANIMATION_DURATION_S, ViewportController};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn yala() -> ViewportController {
        ViewportController::new(
            Region::yala_initial(),
            yala_bounds(),
            DEFAULT_MAX_DELTA,
            DEFAULT_ANIMATION_DURATION_S,
        )
        .unwrap()
    }

    #[test]
    fn initial_region_is_clamped_without_animation() {
        let c = ViewportController::new(
            Region::new(8.0, 81.4, 0.5, 0.5),
            yala_bounds(),
            DEFAULT_MAX_DELTA,
            DEFAULT_ANIMATION_DURATION_S,
        )
        .unwrap();
        assert_eq!(c.region(), Region::new(6.515, 81.4, 0.1, 0.1));
        assert_eq!(c.displayed_region(), c.region());
        assert!(!c.is_animating());
    }

    #[test]
    fn in_bounds_pan_is_applied_directly() {
        let mut c = yala();
        let r = Region::new(6.40, 81.50, 0.05, 0.05);
        let update = c.on_region_change(r).unwrap();
        assert!(!update.animation_required);
        assert_eq!(c.region(), r);
        assert_eq!(c.displayed_region(), r);
        assert!(!c.is_animating());
    }

    #[test]
    fn out_of_bounds_pan_animates_back() {
        let mut c = yala();
        let candidate = Region::new(6.615, 81.45, 0.1, 0.1);
        let update = c.on_region_change(candidate).unwrap();
        assert!(update.animation_required);
        assert!(!update.superseded);
        assert_eq!(c.region().latitude, 6.515);
        assert_eq!(c.displayed_region(), candidate);
        assert!(c.is_animating());

        let mid = c.update(0.25);
        assert_close(mid.latitude, 6.565, 1e-9);
        assert!(c.is_animating());

        let end = c.update(0.25);
        assert_eq!(end, c.region());
        assert!(!c.is_animating());
    }

    #[test]
    fn newer_event_supersedes_running_transition() {
        let mut c = yala();
        c.on_region_change(Region::new(7.0, 81.45, 0.1, 0.1)).unwrap();
        c.update(0.1);
        let update = c.on_region_change(Region::new(6.0, 81.45, 0.1, 0.1)).unwrap();
        assert!(update.superseded);
        let t = c.transition().unwrap();
        assert_eq!(t.to.latitude, 6.37);
        assert_eq!(t.elapsed_s, 0.0);
        c.update(1.0);
        assert_eq!(c.displayed_region().latitude, 6.37);
    }

    #[test]
    fn in_bounds_event_cancels_running_transition() {
        let mut c = yala();
        c.on_region_change(Region::new(7.0, 81.45, 0.1, 0.1)).unwrap();
        let r = Region::new(6.45, 81.45, 0.02, 0.02);
        let update = c.on_region_change(r).unwrap();
        assert!(update.superseded);
        assert!(!c.is_animating());
        assert_eq!(c.displayed_region(), r);
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let mut c =
            ViewportController::new(Region::yala_initial(), yala_bounds(), DEFAULT_MAX_DELTA, 0.0)
                .unwrap();
        let update = c.on_region_change(Region::new(7.0, 81.45, 0.1, 0.1)).unwrap();
        assert!(update.animation_required);
        assert!(!c.is_animating());
        assert_eq!(c.displayed_region(), c.region());
    }

    #[test]
    fn invalid_event_leaves_state_untouched() {
        let mut c = yala();
        c.on_region_change(Region::new(7.0, 81.45, 0.1, 0.1)).unwrap();
        let before_region = c.region();
        let before_transition = c.transition().copied();
        let err = c
            .on_region_change(Region::new(6.4, f64::INFINITY, 0.1, 0.1))
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { .. }));
        assert_eq!(c.region(), before_region);
        assert_eq!(c.transition().copied(), before_transition);
    }

    #[test]
    fn negative_or_nan_dt_does_not_advance() {
        let mut c = yala();
        c.on_region_change(Region::new(7.0, 81.45, 0.1, 0.1)).unwrap();
        c.update(-1.0);
        c.update(f64::NAN);
        assert_eq!(c.transition().unwrap().elapsed_s, 0.0);
    }

    #[test]
    fn stop_animation_snaps_to_target() {
        let mut c = yala();
        c.on_region_change(Region::new(7.0, 81.45, 0.1, 0.1)).unwrap();
        c.stop_animation();
        assert!(!c.is_animating());
        assert_eq!(c.displayed_region(), c.region());
    }

    #[test]
    fn nan_duration_is_rejected() {
        assert!(
            ViewportController::new(
                Region::yala_initial(),
                yala_bounds(),
                DEFAULT_MAX_DELTA,
                f64::NAN
            )
            .is_err()
        );
    }
}
