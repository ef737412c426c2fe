//! Business-hours gate and the clock it reads.
//!
//! The gate is a pure function of the local wall-clock time. It keeps no
//! state and is evaluated again on every mutating action.

use crate::error::ComandaError;
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Minutes in a day; the close threshold may equal this (midnight).
const MINUTES_PER_DAY: u16 = 24 * 60;

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that always reports a chosen instant until moved.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, now: NaiveDateTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
            .lock()
            .map(|guard| *guard)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

/// Opening hours as a half-open interval of minutes since local midnight.
///
/// `open` is inside the interval, `close` is not: at exactly the closing
/// minute the shop is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HoursSpec", into = "HoursSpec")]
pub struct BusinessHours {
    open: u16,
    close: u16,
}

impl BusinessHours {
    /// Create from minutes since midnight.
    pub fn new(open: u16, close: u16) -> Result<Self, ComandaError> {
        if close > MINUTES_PER_DAY {
            return Err(ComandaError::InvalidHours(format!(
                "closing minute {} is past midnight",
                close
            )));
        }
        if open >= close {
            return Err(ComandaError::InvalidHours(format!(
                "opening {} is not before closing {}",
                format_minutes(open),
                format_minutes(close)
            )));
        }
        Ok(Self { open, close })
    }

    /// Parse from "HH:MM" strings, e.g. `("07:30", "17:00")`.
    pub fn parse(open: &str, close: &str) -> Result<Self, ComandaError> {
        Self::new(parse_minutes(open)?, parse_minutes(close)?)
    }

    /// Opening threshold in minutes since midnight.
    pub fn open_minute(&self) -> u16 {
        self.open
    }

    /// Closing threshold in minutes since midnight.
    pub fn close_minute(&self) -> u16 {
        self.close
    }

    /// Whether orders are accepted at `now`.
    pub fn is_open(&self, now: NaiveDateTime) -> bool {
        self.is_open_at(now.time())
    }

    /// Whether orders are accepted at a time of day.
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        let minute = (time.hour() * 60 + time.minute()) as u16;
        minute >= self.open && minute < self.close
    }

    /// Refuse with [`ComandaError::Closed`] when outside business hours.
    pub fn ensure_open(&self, now: NaiveDateTime) -> Result<(), ComandaError> {
        if self.is_open(now) {
            Ok(())
        } else {
            tracing::warn!(%now, hours = %self, "Refused: closed");
            Err(self.closed_error())
        }
    }

    /// The error returned for actions attempted while closed.
    pub fn closed_error(&self) -> ComandaError {
        ComandaError::Closed {
            opens: format_minutes(self.open),
            closes: format_minutes(self.close),
        }
    }

    /// Human-readable schedule, e.g. "7:30 AM - 5:00 PM".
    pub fn label(&self) -> String {
        format!("{} - {}", format_12h(self.open), format_12h(self.close))
    }
}

impl Default for BusinessHours {
    /// 7:30 to 17:00.
    fn default() -> Self {
        Self {
            open: 7 * 60 + 30,
            close: 17 * 60,
        }
    }
}

impl fmt::Display for BusinessHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_minutes(self.open), format_minutes(self.close))
    }
}

/// Config-file shape of [`BusinessHours`].
///
/// A missing field falls back to the default hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursSpec {
    #[serde(default = "default_open")]
    pub open: String,
    #[serde(default = "default_close")]
    pub close: String,
}

fn default_open() -> String {
    format_minutes(BusinessHours::default().open)
}

fn default_close() -> String {
    format_minutes(BusinessHours::default().close)
}

impl TryFrom<HoursSpec> for BusinessHours {
    type Error = ComandaError;

    fn try_from(spec: HoursSpec) -> Result<Self, Self::Error> {
        BusinessHours::parse(&spec.open, &spec.close)
    }
}

impl From<BusinessHours> for HoursSpec {
    fn from(hours: BusinessHours) -> Self {
        Self {
            open: format_minutes(hours.open),
            close: format_minutes(hours.close),
        }
    }
}

fn parse_minutes(s: &str) -> Result<u16, ComandaError> {
    let invalid = || ComandaError::InvalidHours(format!("expected HH:MM, got {:?}", s));
    let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u16 = h.parse().map_err(|_| invalid())?;
    let minutes: u16 = m.parse().map_err(|_| invalid())?;
    if minutes >= 60 || hours > 24 || (hours == 24 && minutes != 0) {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn format_12h(minutes: u16) -> String {
    let h = (minutes / 60) % 24;
    let m = minutes % 60;
    let suffix = if h < 12 { "AM" } else { "PM" };
    let h12 = match h % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", h12, m, suffix)
}
