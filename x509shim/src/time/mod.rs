// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate validity times.
//!
//! UTCTime values follow RFC 5280: years 50-99 are 1950-1999 and years
//! 00-49 are 2000-2049. Dates from 2050 on are GeneralizedTime.

use core::cmp::Ordering;
use core::time::Duration;
use der::{
    asn1::{GeneralizedTime, UtcTime},
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Result, Tag, Writer,
};

/// First second of 2050-01-01T00:00:00Z, where UTCTime stops being usable.
const UTC_TIME_LIMIT_SECS: u64 = 2_524_608_000;

/// A timestamp that can be either UTCTime or GeneralizedTime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Time {
    /// UTCTime format (YYMMDDHHMMSSZ)
    UtcTime(UtcTime),
    /// GeneralizedTime format (YYYYMMDDHHMMSSZ)
    GeneralizedTime(GeneralizedTime),
}

impl Time {
    /// Time at `secs` after the Unix epoch, using the encoding RFC 5280
    /// prescribes for that date.
    pub fn from_unix_secs(secs: u64) -> Result<Self> {
        let duration = Duration::from_secs(secs);
        if secs < UTC_TIME_LIMIT_SECS {
            Ok(Time::UtcTime(UtcTime::from_unix_duration(duration)?))
        } else {
            Ok(Time::GeneralizedTime(GeneralizedTime::from_unix_duration(
                duration,
            )?))
        }
    }

    /// Duration since the Unix epoch.
    pub fn unix_duration(&self) -> Duration {
        match self {
            Time::UtcTime(utc) => utc.to_unix_duration(),
            Time::GeneralizedTime(gen) => gen.to_unix_duration(),
        }
    }

    /// Whole seconds since the Unix epoch.
    pub fn unix_secs(&self) -> u64 {
        self.unix_duration().as_secs()
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unix_duration().cmp(&other.unix_duration())
    }
}

impl<'a> DecodeValue<'a> for Time {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> Result<Self> {
        match header.tag {
            Tag::UtcTime => Ok(Time::UtcTime(UtcTime::decode_value(reader, header)?)),
            Tag::GeneralizedTime => Ok(Time::GeneralizedTime(GeneralizedTime::decode_value(
                reader, header,
            )?)),
            tag => Err(der::Error::from(der::ErrorKind::TagUnexpected {
                expected: Some(Tag::UtcTime),
                actual: tag,
            })),
        }
    }
}

impl<'a> Decode<'a> for Time {
    fn decode<R: Reader<'a>>(reader: &mut R) -> Result<Self> {
        let header = Header::decode(reader)?;
        Self::decode_value(reader, header)
    }
}

impl Encode for Time {
    fn encoded_len(&self) -> Result<Length> {
        match self {
            Time::UtcTime(utc) => utc.encoded_len(),
            Time::GeneralizedTime(gen) => gen.encoded_len(),
        }
    }

    fn encode(&self, writer: &mut impl Writer) -> Result<()> {
        match self {
            Time::UtcTime(utc) => utc.encode(writer),
            Time::GeneralizedTime(gen) => gen.encode(writer),
        }
    }
}

/// Certificate validity period.
///
/// ```text
/// Validity ::= SEQUENCE {
///     notBefore      Time,
///     notAfter       Time
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    pub not_before: Time,
    pub not_after: Time,
}

impl Validity {
    pub const fn new(not_before: Time, not_after: Time) -> Self {
        Validity {
            not_before,
            not_after,
        }
    }

    /// Validity window between two Unix timestamps.
    pub fn from_unix_secs(not_before: u64, not_after: u64) -> Result<Self> {
        Ok(Self::new(
            Time::from_unix_secs(not_before)?,
            Time::from_unix_secs(not_after)?,
        ))
    }

    /// Whether `at` lies inside the window, bounds included.
    pub fn contains(&self, at: &Time) -> bool {
        self.not_before <= *at && *at <= self.not_after
    }
}

impl<'a> DecodeValue<'a> for Validity {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> Result<Self> {
        reader.read_nested(header.length, |reader| {
            let not_before = Time::decode(reader)?;
            let not_after = Time::decode(reader)?;
            Ok(Validity {
                not_before,
                not_after,
            })
        })
    }
}

impl EncodeValue for Validity {
    fn value_len(&self) -> Result<Length> {
        self.not_before.encoded_len()? + self.not_after.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> Result<()> {
        self.not_before.encode(writer)?;
        self.not_after.encode(writer)
    }
}

impl der::Sequence<'_> for Validity {}
