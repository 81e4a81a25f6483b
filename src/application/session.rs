// src/application/session.rs
use crate::constants::{
    USAGE_LEAF_WIDTH_PX, USAGE_MAX_LEAVES, USAGE_REST_MINUTES, USAGE_STEP_MINUTES,
};
use chrono::{Local, NaiveDateTime, Timelike};

/// Source of local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Navbar clock text, 24-hour `HH:MM:SS`.
pub fn clock_text(now: NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Home screen greeting for the hour of day.
pub fn greeting(now: NaiveDateTime) -> &'static str {
    match now.hour() {
        h if h < 12 => "🌞 早上好",
        h if h < 18 => "☀️ 中午好",
        _ => "🌙 晚上好",
    }
}

/// The navbar's usage indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageIndicator {
    Leaves(Vec<&'static str>),
    Rest,
}

impl UsageIndicator {
    /// Derive the indicator from minutes spent in this session.
    pub fn for_minutes(minutes: i64) -> Self {
        if minutes >= USAGE_REST_MINUTES {
            return UsageIndicator::Rest;
        }
        let count = usize::try_from(minutes.max(0) / USAGE_STEP_MINUTES).unwrap_or(0);
        UsageIndicator::Leaves(
            (0..count.min(USAGE_MAX_LEAVES))
                .map(|i| if (i + 1) % 3 == 0 { "🍂🍃" } else { "🍃" })
                .collect(),
        )
    }

    pub fn text(&self) -> String {
        match self {
            UsageIndicator::Leaves(items) => items.concat(),
            UsageIndicator::Rest => "休息一下吧".to_string(),
        }
    }

    /// Rendered width; `None` means sized to content.
    pub fn width_px(&self) -> Option<usize> {
        match self {
            UsageIndicator::Leaves(items) => {
                let leaves: usize = items.iter().map(|i| i.chars().count()).sum();
                Some(leaves * USAGE_LEAF_WIDTH_PX)
            }
            UsageIndicator::Rest => None,
        }
    }
}

/// Elapsed-time bookkeeping for the usage indicator.
#[derive(Debug, Clone)]
pub struct Session {
    started: NaiveDateTime,
    last_step: Option<i64>,
    indicator: UsageIndicator,
}

impl Session {
    pub fn start(now: NaiveDateTime) -> Self {
        Self {
            started: now,
            last_step: None,
            indicator: UsageIndicator::for_minutes(0),
        }
    }

    pub fn indicator(&self) -> &UsageIndicator {
        &self.indicator
    }

    /// Periodic check. Returns true when the indicator changed and the navbar
    /// needs a redraw; the result depends only on elapsed time.
    pub fn tick(&mut self, now: NaiveDateTime) -> bool {
        let minutes = (now - self.started).num_minutes();
        let step = minutes / USAGE_STEP_MINUTES;
        if self.last_step.is_some_and(|last| step <= last) {
            return false;
        }
        self.last_step = Some(step);
        self.indicator = UsageIndicator::for_minutes(minutes);
        true
    }
}
