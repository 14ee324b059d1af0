//! # Until Time
//!
//! Temporary mode carries the moment it ends in three bytes with the date
//! bit-sliced across them:
//!
//! ```text
//! b0: MMMD DDDD   (month bits 3..1, day)
//! b1: MxYY YYYY   (month bit 0, year since 2000)
//! b2: xxTT TTTT   (half-hour slot of the day)
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Date and half-hour slot at which a temporary setting expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UntilTime {
    /// Years since 2000
    pub year: u8,
    pub month: u8,
    pub day: u8,
    /// Time of day in 30-minute increments
    pub half_hour_slot: u8,
}

impl UntilTime {
    pub const ENCODED_LEN: usize = 3;

    /// Decode from the first three bytes of `buf`; `None` if fewer are given.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let &[b0, b1, b2] = buf.get(..Self::ENCODED_LEN)? else {
            return None;
        };
        Some(Self {
            year: b1 & 0x3F,
            month: ((b0 & 0xE0) >> 4) | (b1 >> 7),
            day: b0 & 0x1F,
            half_hour_slot: b2 & 0x3F,
        })
    }

    pub fn full_year(&self) -> u16 {
        2000 + u16::from(self.year)
    }

    pub fn hour(&self) -> u8 {
        self.half_hour_slot / 2
    }

    pub fn minute(&self) -> u8 {
        if self.half_hour_slot % 2 == 1 {
            30
        } else {
            0
        }
    }

    /// Calendar form; `None` if the fields do not name a real date and time.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            i32::from(self.full_year()),
            u32::from(self.month),
            u32::from(self.day),
        )?
        .and_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
    }
}

impl fmt::Display for UntilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}.{:02}.{:02} {:02}:{:02}",
            self.full_year(),
            self.month,
            self.day,
            self.hour(),
            self.minute()
        )
    }
}
