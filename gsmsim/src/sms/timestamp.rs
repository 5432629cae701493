// gsmsim-rs/gsmsim/src/sms/timestamp.rs

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Weekday};
use log::debug;

use crate::protocol::parser::ensure_len;
use crate::{Error, Result};

/// Octets in a TP-SCTS field: six swapped BCD pairs and the time zone.
pub const TIMESTAMP_LEN: usize = 7;

/// Service-centre timestamp of a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmsTimestamp {
    /// Wall-clock time at the service centre
    pub local: NaiveDateTime,
    /// Offset from UTC in minutes
    pub offset_minutes: i32,
}

fn bcd_pair(b: u8, field: &str) -> Result<u32> {
    let (lo, hi) = ((b & 0x0F) as u32, (b >> 4) as u32);
    if lo > 9 || hi > 9 {
        return Err(Error::InvalidTimestamp(format!("{} octet {:02X} is not BCD", field, b)));
    }
    Ok(lo * 10 + hi)
}

impl SmsTimestamp {
    /// Decode the 7-octet timestamp. Two-digit years from 80 up are taken
    /// as 19xx, the rest as 20xx.
    pub fn decode(octets: &[u8]) -> Result<Self> {
        ensure_len(octets, TIMESTAMP_LEN)?;

        let yy = bcd_pair(octets[0], "year")?;
        let year = if yy >= 80 { 1900 + yy } else { 2000 + yy } as i32;
        let month = bcd_pair(octets[1], "month")?;
        let day = bcd_pair(octets[2], "day")?;
        let hour = bcd_pair(octets[3], "hour")?;
        let minute = bcd_pair(octets[4], "minute")?;
        let second = bcd_pair(octets[5], "second")?;

        let local = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .ok_or_else(|| {
                Error::InvalidTimestamp(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02} is not a valid date",
                    year, month, day, hour, minute, second
                ))
            })?;

        // Time zone in quarter hours; bit 3 of the first nibble is the sign.
        let tz = octets[6];
        let quarters = match bcd_pair(tz & 0xF7, "time zone") {
            Ok(q) => q as i32,
            Err(_) => {
                debug!("ignoring malformed time zone octet {:02X}", tz);
                0
            }
        };
        let sign = if tz & 0x08 != 0 { -1 } else { 1 };

        Ok(Self {
            local,
            offset_minutes: sign * quarters * 15,
        })
    }

    pub fn weekday(&self) -> Weekday {
        self.local.weekday()
    }

    /// The timestamp with its UTC offset attached.
    pub fn with_offset(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.offset_minutes * 60)?;
        self.local.and_local_timezone(offset).single()
    }

    /// `asctime` layout, e.g. `Thu Jan  5 07:43:41 2012`.
    pub fn asctime(&self) -> String {
        self.local.format("%a %b %e %H:%M:%S %Y").to_string()
    }
}

impl fmt::Display for SmsTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.asctime())
    }
}
