use std::time::{Duration, Instant};

use chrono::{Days, NaiveDate};
use ratatui::layout::Rect;
use tracing::info;

use moodline_common::{Context, Controller, Output, Phase, TimerKey, Timeline};

use crate::config::Config;
use crate::error::Result;
use crate::mood_log::{Mood, MoodLog};

use super::surface::{ScrollSurface, SurfaceSignal};
use super::theme::TuiTheme;

/// Main application state
pub struct App {
    /// Selection and auto-return engine
    pub controller: Controller,
    /// The scrollable strip the controller drives
    pub surface: ScrollSurface,
    /// The host's own view of the selected day
    pub selected: NaiveDate,
    /// Moods recorded this session
    pub moods: MoodLog,
    /// Mood looked up for `selected` on the last selection change
    pub current_mood: Option<Mood>,
    /// Active popup/dialog state
    pub popup: Option<PopupState>,
    /// Status message (success/error feedback)
    pub status_message: Option<StatusMessage>,
    /// Application running flag
    pub running: bool,
    /// Theme colors for rendering
    pub theme: TuiTheme,
    /// Configuration
    pub config: Config,
    /// Last known terminal size
    pub screen: Rect,
    layout_reported: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Help,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Info,
}

impl App {
    pub fn new(
        config: Config,
        anchor: NaiveDate,
        selected: NaiveDate,
        suppress: bool,
        now: Instant,
    ) -> Result<Self> {
        let timeline = Timeline::new(anchor, config.half_width)?;
        let surface = ScrollSurface::new(config.geometry, timeline.len());
        let ctx = Context::new(timeline, config.geometry, config.timings);
        let controller = Controller::new(ctx, selected, suppress, now);
        let theme = TuiTheme::from(&config.theme.resolve());

        Ok(Self {
            controller,
            surface,
            selected,
            moods: MoodLog::new(),
            current_mood: None,
            popup: None,
            status_message: None,
            running: true,
            theme,
            config,
            screen: Rect::default(),
            layout_reported: false,
        })
    }

    pub fn timeline(&self) -> &Timeline {
        self.controller.timeline()
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    /// True when the selection came from deliberate navigation
    pub fn suppressed(&self) -> bool {
        self.controller.suppressed()
    }

    /// How long the event loop may wait before a timer falls due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let tick = Duration::from_millis(self.config.tick_rate.max(1));
        match self.controller.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(tick),
            None => tick,
        }
    }

    /// Terminal size changed; the strip re-derives its padding from it
    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
        self.surface.set_width(width);
    }

    /// Called after every draw; only the first one reaches the controller
    pub fn after_draw(&mut self, now: Instant) {
        if !self.layout_reported {
            self.layout_reported = true;
            let outputs = self.controller.on_layout_ready(now);
            self.apply_outputs(outputs, now);
        }
    }

    /// Carry out controller outputs
    pub fn apply_outputs(&mut self, outputs: Vec<Output>, now: Instant) {
        for output in outputs {
            match output {
                Output::ScrollTo(command) => self.surface.scroll_to(command, now),
                Output::SelectionChanged(date) => self.on_selection_changed(date),
            }
        }
    }

    /// The controller moved the selection. The host mirrors it and runs its
    /// own side effects but does not feed it back as an external change.
    fn on_selection_changed(&mut self, date: NaiveDate) {
        self.selected = date;
        self.current_mood = self.moods.get(date);
        info!(date = %date, mood = ?self.current_mood, "selection changed");
    }

    /// Forward surface gestures to the controller
    pub fn apply_signals(&mut self, signals: Vec<SurfaceSignal>, now: Instant) {
        for signal in signals {
            let outputs = match signal {
                SurfaceSignal::DragBegin => self.controller.on_drag_begin(now),
                SurfaceSignal::DragEnd => self.controller.on_drag_end(now),
                SurfaceSignal::MomentumEnd => self.controller.on_momentum_end(now),
                SurfaceSignal::Tap(index) => match self.timeline().get(index) {
                    Some(date) => self.controller.on_user_tap_date(now, date),
                    None => Vec::new(),
                },
            };
            self.apply_outputs(outputs, now);
        }
    }

    /// Keyboard stand-in for tapping the neighbouring day
    pub fn tap_relative(&mut self, delta: isize, now: Instant) {
        let timeline = self.timeline();
        let current = self
            .controller
            .selected_index()
            .unwrap_or_else(|| timeline.anchor_index());
        let last = timeline.len().saturating_sub(1);
        let target = timeline.get(current.saturating_add_signed(delta).min(last));
        if let Some(date) = target {
            let outputs = self.controller.on_user_tap_date(now, date);
            self.apply_outputs(outputs, now);
        }
    }

    /// Deliberate navigation from elsewhere in the app
    pub fn navigate_to(&mut self, date: NaiveDate, suppress: bool, now: Instant) {
        self.selected = date;
        self.current_mood = self.moods.get(date);
        let outputs = self
            .controller
            .on_external_date_change(now, date, suppress);
        self.apply_outputs(outputs, now);
    }

    /// Jump a week from the current selection, as a navigation action
    pub fn navigate_weeks(&mut self, weeks: i64, now: Instant) {
        let days = Days::new(weeks.unsigned_abs() * 7);
        let target = if weeks < 0 {
            self.selected.checked_sub_days(days)
        } else {
            self.selected.checked_add_days(days)
        };
        if let Some(date) = target {
            self.navigate_to(date, true, now);
            let text = if self.timeline().contains(&date) {
                format!("Jumped to {}", date.format("%a %b %d"))
            } else {
                format!("{} is outside the window", date.format("%a %b %d"))
            };
            self.set_status(text, StatusKind::Info, now);
        }
    }

    /// Deliberate navigation too, so auto-return stays suppressed
    pub fn go_to_today(&mut self, now: Instant) {
        let anchor = self.controller.anchor();
        self.navigate_to(anchor, true, now);
        self.set_status("Back to today".to_string(), StatusKind::Info, now);
    }

    /// Flip the suppression input and re-feed the host state
    pub fn toggle_suppress(&mut self, now: Instant) {
        let suppress = !self.suppressed();
        self.navigate_to(self.selected, suppress, now);
        let text = if suppress {
            "Auto-return suppressed"
        } else {
            "Auto-return enabled"
        };
        self.set_status(text.to_string(), StatusKind::Info, now);
    }

    pub fn record_mood(&mut self, rating: u8, now: Instant) {
        let Some(mood) = Mood::from_rating(rating) else {
            return;
        };
        let date = self.controller.selected();
        self.moods.record(date, mood);
        if date == self.selected {
            self.current_mood = Some(mood);
        }
        info!(date = %date, rating, "mood recorded");
        self.set_status(
            format!("Recorded {} for {}", mood.label(), date.format("%a %b %d")),
            StatusKind::Success,
            now,
        );
    }

    /// Time until the pending auto-return, if armed
    pub fn auto_return_in(&self, now: Instant) -> Option<Duration> {
        self.controller
            .deadline(TimerKey::AutoReturn)
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Set status message
    pub fn set_status(&mut self, text: String, kind: StatusKind, now: Instant) {
        self.status_message = Some(StatusMessage {
            text,
            kind,
            expires_at: now + Duration::from_secs(3),
        });
    }

    /// Tick - fire due timers, step animation, expire status messages
    pub fn tick(&mut self, now: Instant) {
        let outputs = self.controller.advance(now);
        self.apply_outputs(outputs, now);

        let signals = self.surface.tick(now);
        self.apply_signals(signals, now);

        if let Some(ref msg) = self.status_message {
            if now >= msg.expires_at {
                self.status_message = None;
            }
        }
    }

    /// Quit the application; pending timers are dropped with the controller state
    pub fn quit(&mut self, now: Instant) {
        self.controller.unmount(now);
        self.running = false;
    }
}
