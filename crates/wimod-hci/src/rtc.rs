//! Real time clock word.
//!
//! The module carries calendar time as one 32-bit word, sent little-endian.
//! Field layout, most significant bits first:
//!
//! ```text
//! bits  31..26  25..21  20..16  15..12  11..6   5..0
//!       year    day     hour    month   minute  second
//!       -2000
//! ```

use std::fmt;

use crate::error::{HciError, HciResult};

const YEAR_SHIFT: u32 = 26;
const YEAR_MASK: u32 = 0xFC00_0000;
const DAY_SHIFT: u32 = 21;
const DAY_MASK: u32 = 0x03E0_0000;
const HOUR_SHIFT: u32 = 16;
const HOUR_MASK: u32 = 0x001F_0000;
const MONTH_SHIFT: u32 = 12;
const MONTH_MASK: u32 = 0x0000_F000;
const MINUTE_SHIFT: u32 = 6;
const MINUTE_MASK: u32 = 0x0000_0FC0;
const SECOND_MASK: u32 = 0x0000_003F;

/// First year representable in the RTC word.
pub const RTC_BASE_YEAR: u16 = 2000;
/// Last year representable in the RTC word.
pub const RTC_MAX_YEAR: u16 = RTC_BASE_YEAR + 63;

/// Calendar time as held by the module's RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RtcTime {
    /// Full year (2000-2063).
    pub year: u16,
    /// Month (1-12).
    pub month: u8,
    /// Day of month (1-31).
    pub day: u8,
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
    /// Second (0-59).
    pub second: u8,
}

impl RtcTime {
    /// Create a time, checking every field against its range.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> HciResult<Self> {
        let time = RtcTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        time.validate()?;
        Ok(time)
    }

    fn validate(&self) -> HciResult<()> {
        let in_range = (RTC_BASE_YEAR..=RTC_MAX_YEAR).contains(&self.year)
            && (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && self.hour <= 23
            && self.minute <= 59
            && self.second <= 59;
        if !in_range {
            return Err(HciError::InvalidArgument(format!("rtc time out of range: {}", self)));
        }
        Ok(())
    }

    /// Pack into the RTC word.
    pub fn pack(&self) -> HciResult<u32> {
        self.validate()?;
        let year = u32::from(self.year - RTC_BASE_YEAR);
        Ok((year << YEAR_SHIFT)
            | (u32::from(self.day) << DAY_SHIFT)
            | (u32::from(self.hour) << HOUR_SHIFT)
            | (u32::from(self.month) << MONTH_SHIFT)
            | (u32::from(self.minute) << MINUTE_SHIFT)
            | u32::from(self.second))
    }

    /// Unpack an RTC word. Fields are taken as-is, without range checks.
    pub fn unpack(word: u32) -> Self {
        RtcTime {
            year: RTC_BASE_YEAR + ((word & YEAR_MASK) >> YEAR_SHIFT) as u16,
            month: ((word & MONTH_MASK) >> MONTH_SHIFT) as u8,
            day: ((word & DAY_MASK) >> DAY_SHIFT) as u8,
            hour: ((word & HOUR_MASK) >> HOUR_SHIFT) as u8,
            minute: ((word & MINUTE_MASK) >> MINUTE_SHIFT) as u8,
            second: (word & SECOND_MASK) as u8,
        }
    }

    /// Pack into the 4 wire bytes (little-endian word).
    pub fn to_bytes(&self) -> HciResult<[u8; 4]> {
        Ok(self.pack()?.to_le_bytes())
    }

    /// Unpack from 4 wire bytes.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::unpack(u32::from_le_bytes(bytes))
    }
}

impl fmt::Display for RtcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_known_value() {
        let time = RtcTime::new(2018, 5, 20, 12, 30, 30).unwrap();
        let word = time.pack().unwrap();
        assert_eq!(word, (18 << 26) | (20 << 21) | (12 << 16) | (5 << 12) | (30 << 6) | 30);
        assert_eq!(RtcTime::unpack(word), time);
        assert_eq!(time.to_string(), "2018-05-20 12:30:30");
    }

    #[test]
    fn test_round_trip_dates() {
        for year in RTC_BASE_YEAR..=RTC_MAX_YEAR {
            for month in 1..=12 {
                for day in 1..=31 {
                    let time = RtcTime::new(year, month, day, 23, 59, 59).unwrap();
                    assert_eq!(RtcTime::from_bytes(time.to_bytes().unwrap()), time);
                }
            }
        }
    }

    #[test]
    fn test_round_trip_times() {
        for hour in 0..=23 {
            for minute in 0..=59 {
                for second in 0..=59 {
                    let time = RtcTime::new(2063, 12, 31, hour, minute, second).unwrap();
                    assert_eq!(RtcTime::unpack(time.pack().unwrap()), time);
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(RtcTime::new(1999, 1, 1, 0, 0, 0).is_err());
        assert!(RtcTime::new(2064, 1, 1, 0, 0, 0).is_err());
        assert!(RtcTime::new(2020, 13, 1, 0, 0, 0).is_err());
        assert!(RtcTime::new(2020, 1, 0, 0, 0, 0).is_err());
        assert!(RtcTime::new(2020, 1, 1, 24, 0, 0).is_err());
        assert!(RtcTime::new(2020, 1, 1, 0, 60, 0).is_err());

        let time = RtcTime {
            second: 60,
            ..RtcTime::default()
        };
        assert!(matches!(time.pack(), Err(HciError::InvalidArgument(_))));
    }

    #[test]
    fn test_unpack_little_endian_bytes() {
        let word: u32 = (18 << 26) | (20 << 21) | (12 << 16) | (5 << 12) | (30 << 6) | 30;
        let time = RtcTime::from_bytes(word.to_le_bytes());
        assert_eq!((time.year, time.month, time.day), (2018, 5, 20));
        assert_eq!((time.hour, time.minute, time.second), (12, 30, 30));
    }
}
