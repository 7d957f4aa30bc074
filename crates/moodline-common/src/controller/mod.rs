//! Selection and auto-return controller.
//!
//! [`state::transition`] is a pure `(state, event) -> (state, effects)`
//! function. [`Controller`] owns the state and a [`Scheduler`], turns
//! schedule/cancel effects into deferred actions, and hands the remaining
//! outputs (scroll commands, selection changes) back to the host.
//!
//! Time is always supplied by the caller, so a host drives it from a real
//! clock and tests drive it from a virtual one.

mod state;

use std::time::Instant;

use chrono::NaiveDate;
use tracing::debug;

use crate::scheduler::{Scheduler, TimerKey};
use crate::timeline::Timeline;

pub use state::{mount, transition, Context, Effect, Event, Output, Phase, ScrollCommand, State};

pub struct Controller {
    ctx: Context,
    state: State,
    scheduler: Scheduler,
    scroll_target: Option<ScrollCommand>,
}

impl Controller {
    pub fn new(ctx: Context, selected: NaiveDate, suppress: bool, now: Instant) -> Self {
        let (state, effects) = state::mount(&ctx, selected, suppress);
        let mut controller = Self {
            ctx,
            state,
            scheduler: Scheduler::new(),
            scroll_target: None,
        };
        controller.apply(now, effects);
        debug!(
            anchor = %controller.state.anchor,
            selected = %selected,
            suppress,
            "controller mounted"
        );
        controller
    }

    /// The host changed the selection (navigation, "go to today", ...)
    pub fn on_external_date_change(
        &mut self,
        now: Instant,
        date: NaiveDate,
        suppress: bool,
    ) -> Vec<Output> {
        self.handle(now, Event::ExternalDateChange { date, suppress })
    }

    pub fn on_user_tap_date(&mut self, now: Instant, date: NaiveDate) -> Vec<Output> {
        self.handle(now, Event::UserTap(date))
    }

    pub fn on_drag_begin(&mut self, now: Instant) -> Vec<Output> {
        self.handle(now, Event::DragBegin)
    }

    pub fn on_drag_end(&mut self, now: Instant) -> Vec<Output> {
        self.handle(now, Event::DragEnd)
    }

    pub fn on_momentum_end(&mut self, now: Instant) -> Vec<Output> {
        self.handle(now, Event::MomentumEnd)
    }

    pub fn on_layout_ready(&mut self, now: Instant) -> Vec<Output> {
        self.handle(now, Event::LayoutReady)
    }

    /// Cancel everything; later calls produce no outputs
    pub fn unmount(&mut self, now: Instant) {
        self.dispatch(now, Event::Unmount);
        debug!("controller unmounted");
    }

    /// Fire overdue actions first so events apply in delivery order
    pub fn handle(&mut self, now: Instant, event: Event) -> Vec<Output> {
        let mut outputs = self.advance(now);
        outputs.extend(self.dispatch(now, event));
        outputs
    }

    /// Run every action due at or before `now`, each at its own deadline
    pub fn advance(&mut self, now: Instant) -> Vec<Output> {
        let mut outputs = Vec::new();
        while let Some((key, due)) = self.scheduler.pop_due(now) {
            debug!(timer = key.label(), "timer fired");
            outputs.extend(self.dispatch(due, Event::TimerFired(key)));
        }
        outputs
    }

    fn dispatch(&mut self, now: Instant, event: Event) -> Vec<Output> {
        let (next, effects) = state::transition(&self.ctx, &self.state, event);
        if next != self.state {
            debug!(
                ?event,
                selected = %next.selected,
                phase = next.phase.label(),
                interacting = next.interacting,
                "state changed"
            );
        }
        self.state = next;
        self.apply(now, effects)
    }

    fn apply(&mut self, now: Instant, effects: Vec<Effect>) -> Vec<Output> {
        let mut outputs = Vec::new();
        for effect in effects {
            match effect {
                Effect::Schedule { key, delay } => self.scheduler.schedule(key, now + delay),
                Effect::Cancel(key) => {
                    self.scheduler.cancel(key);
                }
                Effect::CancelAll => self.scheduler.cancel_all(),
                Effect::Emit(output) => {
                    if let Output::ScrollTo(command) = output {
                        self.scroll_target = Some(command);
                    }
                    outputs.push(output);
                }
            }
        }
        outputs
    }

    pub fn timeline(&self) -> &Timeline {
        &self.ctx.timeline
    }

    pub fn anchor(&self) -> NaiveDate {
        self.state.anchor
    }

    pub fn selected(&self) -> NaiveDate {
        self.state.selected
    }

    /// `None` when the selection lies outside the window
    pub fn selected_index(&self) -> Option<usize> {
        self.ctx.timeline.index_of(&self.state.selected)
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_interacting(&self) -> bool {
        self.state.interacting
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    pub fn is_mounted(&self) -> bool {
        self.state.mounted
    }

    pub fn suppressed(&self) -> bool {
        self.state.suppress_auto_return
    }

    /// Last scroll command issued
    pub fn scroll_target(&self) -> Option<ScrollCommand> {
        self.scroll_target
    }

    pub fn pending(&self) -> Vec<TimerKey> {
        self.scheduler.keys()
    }

    pub fn deadline(&self, key: TimerKey) -> Option<Instant> {
        self.scheduler.deadline(key)
    }

    /// Earliest pending deadline, for sizing a host's poll timeout
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Geometry;
    use crate::timings::Timings;
    use std::time::Duration;

    const ANCHOR_INDEX: usize = 7;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn anchor() -> NaiveDate {
        day(15)
    }

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    fn controller(selected: NaiveDate, suppress: bool) -> (Controller, Instant) {
        let ctx = Context::new(
            Timeline::new(anchor(), 7).unwrap(),
            Geometry::default(),
            Timings::default(),
        );
        let t0 = Instant::now();
        (Controller::new(ctx, selected, suppress, t0), t0)
    }

    /// Mount on the anchor and run the first-layout centering
    fn initialized() -> (Controller, Instant) {
        let (mut c, t0) = controller(anchor(), false);
        c.on_layout_ready(t0);
        c.advance(at(t0, 150));
        assert!(c.is_initialized());
        (c, at(t0, 150))
    }

    fn scrolls(outputs: &[Output]) -> Vec<ScrollCommand> {
        outputs
            .iter()
            .filter_map(|o| match o {
                Output::ScrollTo(cmd) => Some(*cmd),
                _ => None,
            })
            .collect()
    }

    fn selections(outputs: &[Output]) -> Vec<NaiveDate> {
        outputs
            .iter()
            .filter_map(|o| match o {
                Output::SelectionChanged(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn first_layout_centers_without_animation_once() {
        let (mut c, t0) = controller(day(12), true);
        let mut outputs = c.on_layout_ready(t0);
        outputs.extend(c.on_layout_ready(at(t0, 10)));
        outputs.extend(c.advance(at(t0, 149)));
        assert!(outputs.is_empty());

        outputs.extend(c.advance(at(t0, 150)));
        outputs.extend(c.on_layout_ready(at(t0, 200)));
        outputs.extend(c.advance(at(t0, 1000)));

        assert_eq!(
            scrolls(&outputs),
            vec![ScrollCommand {
                index: 4,
                offset: 28.0,
                animated: false
            }]
        );
        assert!(c.is_initialized());
    }

    #[test]
    fn external_change_recenters_after_short_delay() {
        let (mut c, t) = initialized();
        let outputs = c.on_external_date_change(t, day(18), true);
        assert!(outputs.is_empty());
        assert_eq!(c.selected(), day(18));

        let outputs = c.advance(at(t, 50));
        assert_eq!(
            scrolls(&outputs),
            vec![ScrollCommand {
                index: 10,
                offset: 70.0,
                animated: true
            }]
        );
        assert_eq!(c.scroll_target().map(|s| s.index), Some(10));
    }

    #[test]
    fn repeated_external_change_is_idempotent() {
        for suppress in [false, true] {
            let (mut once, t1) = initialized();
            once.on_external_date_change(t1, day(11), suppress);
            once.advance(at(t1, 100));

            let (mut twice, t2) = initialized();
            twice.on_external_date_change(t2, day(11), suppress);
            twice.on_external_date_change(t2, day(11), suppress);
            twice.advance(at(t2, 100));

            assert_eq!(once.selected(), twice.selected());
            assert_eq!(once.scroll_target(), twice.scroll_target());
        }
    }

    #[test]
    fn auto_return_fires_on_clean_idle_path() {
        let (mut c, t) = initialized();
        let mut outputs = c.on_external_date_change(t, day(9), false);
        outputs.extend(c.advance(at(t, 5999)));
        assert_eq!(c.selected(), day(9));
        assert!(selections(&outputs).is_empty());

        outputs.extend(c.advance(at(t, 6000)));
        assert_eq!(c.selected(), anchor());
        outputs.extend(c.advance(at(t, 30_000)));

        let anchor_scrolls: Vec<_> = scrolls(&outputs)
            .into_iter()
            .filter(|s| s.index == ANCHOR_INDEX)
            .collect();
        assert_eq!(anchor_scrolls.len(), 1);
        assert!(anchor_scrolls[0].animated);
        assert_eq!(selections(&outputs), vec![anchor()]);
        assert!(c.pending().is_empty());
    }

    #[test]
    fn auto_return_waits_for_drag_and_grace() {
        let (mut c, t) = initialized();
        c.on_external_date_change(t, day(20), false);
        c.on_drag_begin(at(t, 1000));
        assert_eq!(c.phase(), Phase::Dragging);

        c.advance(at(t, 20_000));
        assert_eq!(c.selected(), day(20));

        c.on_drag_end(at(t, 20_000));
        assert_eq!(c.phase(), Phase::Settling);
        c.advance(at(t, 20_500));
        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.is_interacting());

        c.advance(at(t, 26_499));
        assert_eq!(c.selected(), day(20));
        let outputs = c.advance(at(t, 26_500));
        assert_eq!(c.selected(), anchor());
        assert_eq!(selections(&outputs), vec![anchor()]);
    }

    #[test]
    fn momentum_end_extends_grace() {
        let (mut c, t) = initialized();
        c.on_external_date_change(t, day(20), false);
        c.on_drag_begin(at(t, 100));
        c.on_drag_end(at(t, 200));
        c.on_momentum_end(at(t, 600));
        c.advance(at(t, 700));
        assert!(c.is_interacting());

        c.advance(at(t, 1100));
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.deadline(TimerKey::AutoReturn), Some(at(t, 7100)));
    }

    #[test]
    fn suppression_blocks_auto_return() {
        let (mut c, t) = initialized();
        c.on_external_date_change(t, day(3), true);
        c.advance(at(t, 60_000));
        assert_eq!(c.selected(), day(3));
        assert!(!c.pending().contains(&TimerKey::AutoReturn));
    }

    #[test]
    fn lifting_suppression_rearms() {
        let (mut c, t) = initialized();
        c.on_external_date_change(t, day(3), true);
        c.on_external_date_change(at(t, 1000), day(3), false);
        c.advance(at(t, 6999));
        assert_eq!(c.selected(), day(3));
        c.advance(at(t, 7000));
        assert_eq!(c.selected(), anchor());
    }

    #[test]
    fn tap_selects_and_centers_synchronously() {
        let (mut c, t) = initialized();
        c.on_external_date_change(t, day(19), true);

        let outputs = c.on_user_tap_date(at(t, 1), day(12));
        assert_eq!(c.selected(), day(12));
        assert_eq!(
            outputs,
            vec![
                Output::ScrollTo(ScrollCommand {
                    index: 4,
                    offset: 28.0,
                    animated: true
                }),
                Output::SelectionChanged(day(12)),
            ]
        );
        assert!(c.is_interacting());
        assert!(!c.pending().contains(&TimerKey::Recenter));
    }

    #[test]
    fn tap_grace_delays_auto_return() {
        let (mut c, t) = initialized();
        c.on_user_tap_date(t, day(16));
        assert!(!c.pending().contains(&TimerKey::AutoReturn));

        c.advance(at(t, 400));
        assert!(!c.is_interacting());
        assert_eq!(c.deadline(TimerKey::AutoReturn), Some(at(t, 6400)));
    }

    #[test]
    fn second_change_cancels_first_timer() {
        let (mut c, t) = initialized();
        let mut outputs = c.on_external_date_change(t, day(10), false);
        outputs.extend(c.on_external_date_change(at(t, 3000), day(11), false));

        outputs.extend(c.advance(at(t, 6000)));
        assert_eq!(c.selected(), day(11));

        outputs.extend(c.advance(at(t, 9000)));
        outputs.extend(c.advance(at(t, 60_000)));
        assert_eq!(c.selected(), anchor());
        assert_eq!(selections(&outputs), vec![anchor()]);
    }

    #[test]
    fn drag_inside_recenter_window_skips_then_catches_up() {
        let (mut c, t) = initialized();
        c.on_external_date_change(t, day(17), true);
        let outputs = c.on_drag_begin(at(t, 20));
        assert!(outputs.is_empty());
        assert!(!c.pending().contains(&TimerKey::Recenter));

        let outputs = c.advance(at(t, 50));
        assert!(scrolls(&outputs).is_empty());

        c.on_drag_end(at(t, 300));
        let outputs = c.advance(at(t, 800));
        assert!(scrolls(&outputs).is_empty());
        assert!(c.pending().contains(&TimerKey::Recenter));

        let outputs = c.advance(at(t, 850));
        assert_eq!(scrolls(&outputs).len(), 1);
        assert_eq!(scrolls(&outputs)[0].index, 9);
    }

    #[test]
    fn plain_drag_does_not_snap_back() {
        let (mut c, t) = initialized();
        c.on_drag_begin(t);
        c.on_drag_end(at(t, 100));
        let outputs = c.advance(at(t, 10_000));
        assert!(outputs.is_empty());
    }

    #[test]
    fn out_of_window_selection_is_not_centered() {
        let (mut c, t) = initialized();
        let far = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        c.on_external_date_change(t, far, true);
        let outputs = c.advance(at(t, 100));
        assert!(outputs.is_empty());
        assert_eq!(c.selected(), far);
        assert_eq!(c.selected_index(), None);
    }

    #[test]
    fn out_of_window_selection_still_returns_home() {
        let (mut c, t) = initialized();
        let far = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        c.on_external_date_change(t, far, false);
        let outputs = c.advance(at(t, 6050));
        assert_eq!(c.selected(), anchor());
        assert_eq!(scrolls(&outputs).len(), 1);
    }

    #[test]
    fn timers_after_unmount_are_silent() {
        let (mut c, t) = initialized();
        c.on_external_date_change(t, day(8), false);
        c.unmount(at(t, 10));
        assert!(c.pending().is_empty());

        let mut outputs = c.advance(at(t, 60_000));
        outputs.extend(c.on_user_tap_date(at(t, 60_001), day(9)));
        assert!(outputs.is_empty());
        assert_eq!(c.selected(), day(8));
        assert!(!c.is_mounted());
    }

    #[test]
    fn mounting_away_from_anchor_returns_home() {
        let (mut c, t0) = controller(day(14), false);
        let outputs = c.advance(at(t0, 6000));
        assert_eq!(c.selected(), anchor());
        assert_eq!(selections(&outputs), vec![anchor()]);
    }

    #[test]
    fn late_advance_runs_timers_at_their_deadline() {
        let (mut c, t) = initialized();
        c.on_drag_begin(t);
        c.on_external_date_change(at(t, 10), day(13), false);
        c.on_drag_end(at(t, 100));

        // Grace releases at 600, auto-return is therefore due at 6600
        c.advance(at(t, 6599));
        assert_eq!(c.selected(), day(13));
        c.advance(at(t, 6600));
        assert_eq!(c.selected(), anchor());
    }
}
