use crate::domain::ports::Clock;
use chrono::{Local, NaiveDateTime};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
