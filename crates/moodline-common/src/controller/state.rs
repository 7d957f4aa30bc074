use std::time::Duration;

use chrono::NaiveDate;
use tracing::trace;

use crate::scheduler::TimerKey;
use crate::timeline::{Geometry, Timeline};
use crate::timings::Timings;

/// What the scroll surface is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Dragging => "dragging",
            Phase::Settling => "settling",
        }
    }
}

/// Fixed inputs shared by every transition
#[derive(Debug, Clone)]
pub struct Context {
    pub timeline: Timeline,
    pub geometry: Geometry,
    pub timings: Timings,
}

impl Context {
    pub fn new(timeline: Timeline, geometry: Geometry, timings: Timings) -> Self {
        Self {
            timeline,
            geometry,
            timings,
        }
    }
}

/// Scroll the surface so the item at `index` sits under its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub index: usize,
    pub offset: f32,
    pub animated: bool,
}

/// Effects visible to the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Output {
    ScrollTo(ScrollCommand),
    SelectionChanged(NaiveDate),
}

/// Everything a transition can ask for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Emit(Output),
    Schedule { key: TimerKey, delay: Duration },
    Cancel(TimerKey),
    CancelAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    ExternalDateChange { date: NaiveDate, suppress: bool },
    UserTap(NaiveDate),
    DragBegin,
    DragEnd,
    MomentumEnd,
    LayoutReady,
    TimerFired(TimerKey),
    Unmount,
}

/// The controller's whole mutable state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub anchor: NaiveDate,
    pub selected: NaiveDate,
    pub suppress_auto_return: bool,
    pub phase: Phase,
    /// Set by taps and drags, cleared by the grace release
    pub interacting: bool,
    /// Latched by the first-layout centering
    pub initialized: bool,
    pub layout_requested: bool,
    /// A centering was skipped because the user was busy
    pub recenter_owed: bool,
    /// A `Recenter` timer is armed
    pub recenter_pending: bool,
    pub mounted: bool,
}

impl State {
    pub fn new(anchor: NaiveDate, selected: NaiveDate, suppress_auto_return: bool) -> Self {
        Self {
            anchor,
            selected,
            suppress_auto_return,
            phase: Phase::Idle,
            interacting: false,
            initialized: false,
            layout_requested: false,
            recenter_owed: false,
            recenter_pending: false,
            mounted: true,
        }
    }

    pub fn can_recenter(&self) -> bool {
        self.initialized && self.phase == Phase::Idle && !self.interacting
    }

    pub fn auto_return_blocked(&self) -> bool {
        self.suppress_auto_return
            || self.selected == self.anchor
            || self.interacting
            || self.phase != Phase::Idle
    }

    fn auto_return_inputs(&self) -> (NaiveDate, bool, Phase, bool) {
        (
            self.selected,
            self.interacting,
            self.phase,
            self.suppress_auto_return,
        )
    }
}

/// Initial state plus the auto-return decision for it
pub fn mount(ctx: &Context, selected: NaiveDate, suppress: bool) -> (State, Vec<Effect>) {
    let state = State::new(ctx.timeline.anchor(), selected, suppress);
    let mut effects = Vec::new();
    if !state.auto_return_blocked() {
        effects.push(Effect::Schedule {
            key: TimerKey::AutoReturn,
            delay: ctx.timings.auto_return(),
        });
    }
    (state, effects)
}

pub fn transition(ctx: &Context, state: &State, event: Event) -> (State, Vec<Effect>) {
    let mut next = *state;
    let mut effects = Vec::new();

    if !state.mounted {
        trace!(?event, "ignored after unmount");
        return (next, effects);
    }

    match event {
        Event::ExternalDateChange { date, suppress } => {
            next.selected = date;
            next.suppress_auto_return = suppress;
            request_recenter(ctx, &mut next, &mut effects);
        }
        Event::UserTap(date) => {
            next.selected = date;
            next.interacting = true;
            next.recenter_owed = false;
            next.recenter_pending = false;
            effects.push(Effect::Cancel(TimerKey::AutoReturn));
            effects.push(Effect::Cancel(TimerKey::Recenter));
            effects.extend(center(ctx, &next, true));
            effects.push(Effect::Schedule {
                key: TimerKey::GraceRelease,
                delay: ctx.timings.tap_grace(),
            });
            effects.push(Effect::Emit(Output::SelectionChanged(date)));
        }
        Event::DragBegin => {
            next.phase = Phase::Dragging;
            next.interacting = true;
            effects.push(Effect::Cancel(TimerKey::AutoReturn));
            effects.push(Effect::Cancel(TimerKey::GraceRelease));
            if next.recenter_pending {
                next.recenter_pending = false;
                next.recenter_owed = true;
                effects.push(Effect::Cancel(TimerKey::Recenter));
            }
        }
        Event::DragEnd | Event::MomentumEnd => {
            next.phase = Phase::Settling;
            next.interacting = true;
            effects.push(Effect::Schedule {
                key: TimerKey::GraceRelease,
                delay: ctx.timings.drag_grace(),
            });
        }
        Event::LayoutReady => {
            if !next.initialized && !next.layout_requested {
                next.layout_requested = true;
                effects.push(Effect::Schedule {
                    key: TimerKey::FirstLayout,
                    delay: ctx.timings.first_layout(),
                });
            }
        }
        Event::TimerFired(key) => fire(ctx, &mut next, key, &mut effects),
        Event::Unmount => {
            next.mounted = false;
            next.recenter_pending = false;
            effects.push(Effect::CancelAll);
            return (next, effects);
        }
    }

    rearm_auto_return(ctx, state, &next, &mut effects);
    (next, effects)
}

/// Scheduled actions re-check their guards against the state they wake up to
fn fire(ctx: &Context, next: &mut State, key: TimerKey, effects: &mut Vec<Effect>) {
    match key {
        TimerKey::FirstLayout => {
            if !next.initialized {
                next.initialized = true;
                next.recenter_owed = false;
                effects.extend(center(ctx, next, false));
            }
        }
        TimerKey::Recenter => {
            next.recenter_pending = false;
            if next.can_recenter() {
                effects.extend(center(ctx, next, true));
            } else {
                next.recenter_owed = true;
            }
        }
        TimerKey::GraceRelease => {
            next.interacting = false;
            if next.phase == Phase::Settling {
                next.phase = Phase::Idle;
            }
            if next.recenter_owed {
                request_recenter(ctx, next, effects);
            }
        }
        TimerKey::AutoReturn => {
            if next.auto_return_blocked() {
                trace!("auto-return woke up blocked");
                return;
            }
            next.selected = next.anchor;
            next.recenter_owed = false;
            next.recenter_pending = false;
            effects.push(Effect::Cancel(TimerKey::Recenter));
            effects.extend(center(ctx, next, true));
            effects.push(Effect::Emit(Output::SelectionChanged(next.anchor)));
        }
    }
}

fn request_recenter(ctx: &Context, next: &mut State, effects: &mut Vec<Effect>) {
    if next.can_recenter() {
        next.recenter_owed = false;
        next.recenter_pending = true;
        effects.push(Effect::Schedule {
            key: TimerKey::Recenter,
            delay: ctx.timings.recenter(),
        });
    } else if next.initialized {
        next.recenter_owed = true;
    }
}

fn rearm_auto_return(ctx: &Context, prev: &State, next: &State, effects: &mut Vec<Effect>) {
    if prev.auto_return_inputs() == next.auto_return_inputs() {
        return;
    }
    effects.push(Effect::Cancel(TimerKey::AutoReturn));
    if !next.auto_return_blocked() {
        effects.push(Effect::Schedule {
            key: TimerKey::AutoReturn,
            delay: ctx.timings.auto_return(),
        });
    }
}

/// Dates outside the window have nothing to center on
fn center(ctx: &Context, state: &State, animated: bool) -> Option<Effect> {
    let Some(index) = ctx.timeline.index_of(&state.selected) else {
        trace!(selected = %state.selected, "selection outside window, not centering");
        return None;
    };
    Some(Effect::Emit(Output::ScrollTo(ScrollCommand {
        index,
        offset: ctx.geometry.offset_for(index),
        animated,
    })))
}
