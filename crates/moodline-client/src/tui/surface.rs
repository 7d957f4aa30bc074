use std::time::{Duration, Instant};

use moodline_common::{Geometry, ScrollCommand};

/// Horizontal movement (in cells) before a press becomes a drag
const DRAG_THRESHOLD: f32 = 1.0;
/// Duration of an animated scroll
const TWEEN_DURATION: Duration = Duration::from_millis(240);
/// Momentum stops below this speed, in cells per second
const MIN_VELOCITY: f32 = 4.0;
const MAX_VELOCITY: f32 = 240.0;
/// Exponential decay rate of momentum per second
const FRICTION: f32 = 5.0;

/// Gestures the surface reports to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceSignal {
    DragBegin,
    DragEnd,
    MomentumEnd,
    /// Press and release on the same item without dragging
    Tap(usize),
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f32,
    to: f32,
    start: Instant,
}

impl Tween {
    fn sample(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        let t = (elapsed / TWEEN_DURATION.as_secs_f32()).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * smoothstep(t)
    }

    fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= TWEEN_DURATION
    }
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: f32,
    start_offset: f32,
    last_x: f32,
    last_at: Instant,
    /// Offset change per second
    velocity: f32,
    moved: bool,
}

#[derive(Debug, Clone, Copy)]
struct Momentum {
    velocity: f32,
    last_at: Instant,
}

/// The scrollable strip: owns the live offset, animates scroll commands and
/// turns pointer input into drag, momentum and tap signals.
#[derive(Debug)]
pub struct ScrollSurface {
    geometry: Geometry,
    len: usize,
    width: f32,
    offset: f32,
    tween: Option<Tween>,
    drag: Option<Drag>,
    momentum: Option<Momentum>,
    /// Command that arrived mid-drag, applied on release
    deferred: Option<ScrollCommand>,
}

impl ScrollSurface {
    pub fn new(geometry: Geometry, len: usize) -> Self {
        Self {
            geometry,
            len,
            width: 0.0,
            offset: 0.0,
            tween: None,
            drag: None,
            momentum: None,
            deferred: None,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = f32::from(width);
    }

    pub fn leading_padding(&self) -> f32 {
        self.geometry.leading_padding(self.width)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some_and(|d| d.moved)
    }

    /// Screen column (relative to the surface) of the left edge of `index`
    pub fn item_x(&self, index: usize) -> f32 {
        self.leading_padding() + self.geometry.offset_for(index) - self.offset
    }

    /// Item under a surface-relative column, margins included
    pub fn index_at_column(&self, column: u16) -> Option<usize> {
        let pitch = self.geometry.pitch();
        if pitch <= 0.0 {
            return None;
        }
        let content = f32::from(column) - self.leading_padding() + self.offset;
        let slot = ((content + self.geometry.item_margin) / pitch).floor();
        if slot < 0.0 {
            return None;
        }
        let index = slot as usize;
        (index < self.len).then_some(index)
    }

    fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.geometry.max_offset(self.len))
    }

    /// Apply a command from the controller. Mid-drag the latest one waits
    /// for the release.
    pub fn scroll_to(&mut self, command: ScrollCommand, now: Instant) {
        if self.is_dragging() {
            self.deferred = Some(command);
            return;
        }
        self.momentum = None;
        let target = self.clamp(command.offset);
        if command.animated {
            self.tween = Some(Tween {
                from: self.offset,
                to: target,
                start: now,
            });
        } else {
            self.tween = None;
            self.offset = target;
        }
    }

    /// Pointer down. Stops any animation; interrupting momentum ends it.
    pub fn press(&mut self, column: u16, now: Instant) -> Vec<SurfaceSignal> {
        let mut signals = Vec::new();
        if self.momentum.take().is_some() {
            signals.push(SurfaceSignal::MomentumEnd);
        }
        self.tween = None;
        let x = f32::from(column);
        self.drag = Some(Drag {
            start_x: x,
            start_offset: self.offset,
            last_x: x,
            last_at: now,
            velocity: 0.0,
            moved: false,
        });
        signals
    }

    pub fn drag_to(&mut self, column: u16, now: Instant) -> Vec<SurfaceSignal> {
        let mut signals = Vec::new();
        let Some(mut drag) = self.drag else {
            return signals;
        };
        let x = f32::from(column);
        if !drag.moved && (x - drag.start_x).abs() >= DRAG_THRESHOLD {
            drag.moved = true;
            signals.push(SurfaceSignal::DragBegin);
        }
        if drag.moved {
            let dt = now.saturating_duration_since(drag.last_at).as_secs_f32();
            if dt > 0.0 {
                let instant_velocity = -(x - drag.last_x) / dt;
                drag.velocity = 0.6 * instant_velocity + 0.4 * drag.velocity;
            }
            self.offset = self.clamp(drag.start_offset - (x - drag.start_x));
        }
        drag.last_x = x;
        drag.last_at = now;
        self.drag = Some(drag);
        signals
    }

    /// Pointer up: a drag ends (possibly into momentum), a still press taps
    pub fn release(&mut self, column: u16, now: Instant) -> Vec<SurfaceSignal> {
        let mut signals = Vec::new();
        let Some(drag) = self.drag.take() else {
            return signals;
        };
        if drag.moved {
            signals.push(SurfaceSignal::DragEnd);
            let velocity = drag.velocity.clamp(-MAX_VELOCITY, MAX_VELOCITY);
            if let Some(command) = self.deferred.take() {
                self.scroll_to(command, now);
            } else if velocity.abs() >= MIN_VELOCITY {
                self.momentum = Some(Momentum {
                    velocity,
                    last_at: now,
                });
            } else {
                self.snap(now);
            }
        } else if let Some(index) = self.index_at_column(column) {
            signals.push(SurfaceSignal::Tap(index));
        }
        signals
    }

    /// Ease onto the nearest item so none is left half off its slot
    fn snap(&mut self, now: Instant) {
        let Some(index) = self.geometry.index_at_offset(self.offset, self.len) else {
            return;
        };
        let target = self.clamp(self.geometry.offset_for(index));
        if target != self.offset {
            self.tween = Some(Tween {
                from: self.offset,
                to: target,
                start: now,
            });
        }
    }

    /// Wheel notch: a drag of one item with no momentum
    pub fn wheel(&mut self, direction: i8) -> Vec<SurfaceSignal> {
        self.tween = None;
        let mut signals = Vec::new();
        if self.momentum.take().is_some() {
            signals.push(SurfaceSignal::MomentumEnd);
        }
        self.offset = self.clamp(self.offset + f32::from(direction) * self.geometry.pitch());
        signals.push(SurfaceSignal::DragBegin);
        signals.push(SurfaceSignal::DragEnd);
        signals
    }

    /// Advance animation and momentum to `now`
    pub fn tick(&mut self, now: Instant) -> Vec<SurfaceSignal> {
        let mut signals = Vec::new();

        if let Some(tween) = self.tween {
            self.offset = tween.sample(now);
            if tween.is_done(now) {
                self.offset = tween.to;
                self.tween = None;
            }
        }

        if let Some(mut momentum) = self.momentum {
            let dt = now.saturating_duration_since(momentum.last_at).as_secs_f32();
            let unclamped = self.offset + momentum.velocity * dt;
            self.offset = self.clamp(unclamped);
            momentum.velocity *= (-FRICTION * dt).exp();
            momentum.last_at = now;

            let hit_edge = self.offset != unclamped;
            if hit_edge || momentum.velocity.abs() < MIN_VELOCITY {
                self.momentum = None;
                self.snap(now);
                signals.push(SurfaceSignal::MomentumEnd);
            } else {
                self.momentum = Some(momentum);
            }
        }

        signals
    }
}
