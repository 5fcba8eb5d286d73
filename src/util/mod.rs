//
//  turso-cli
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Functions
//!
//! Small parsing helpers used across the crate.
//!
//! ## Example
//!
//! ```rust
//! use turso_cli::util::parse_duration;
//!
//! let duration = parse_duration("1h30m").unwrap();
//! assert_eq!(duration.num_minutes(), 90);
//!
//! assert!(parse_duration("2030-01-01").is_err());
//! ```

use anyhow::{bail, Result};
use chrono::Duration;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;
const NANOS_PER_DAY: u64 = 24 * NANOS_PER_HOUR;
const NANOS_PER_WEEK: u64 = 7 * NANOS_PER_DAY;

/// Fraction digits past this many are ignored.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parses a relative duration expression into a [`Duration`].
///
/// The expression is a sequence of decimal numbers, each with an optional
/// fraction and a mandatory unit suffix, optionally preceded by a sign.
/// Components are summed, so `"1h30m"` is ninety minutes.
///
/// # Supported Units
///
/// | Suffix | Unit |
/// |--------|------|
/// | `ns` | nanoseconds |
/// | `us`, `µs`, `μs` | microseconds |
/// | `ms` | milliseconds |
/// | `s` | seconds |
/// | `m` | minutes |
/// | `h` | hours |
/// | `d` | days |
/// | `w` | weeks |
///
/// # Parameters
///
/// * `input` - The duration expression (e.g. `"12w"`, `"1h30m"`, `"1.5d"`)
///
/// # Returns
///
/// Returns the parsed duration, or an error if the expression is empty, has a
/// component without a unit, uses an unknown unit, or overflows.
///
/// # Example
///
/// ```rust
/// use turso_cli::util::parse_duration;
///
/// assert_eq!(parse_duration("12w").unwrap().num_weeks(), 12);
/// assert_eq!(parse_duration("1d12h").unwrap().num_hours(), 36);
/// assert_eq!(parse_duration("0").unwrap().num_seconds(), 0);
/// assert!(parse_duration("").is_err());
/// assert!(parse_duration("10").is_err());
/// ```
///
/// # Notes
///
/// - A lone `"0"` is accepted without a unit.
/// - Whitespace is not permitted anywhere in the expression.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::zero());
    }

    if rest.is_empty() {
        bail!("invalid duration {:?}", input);
    }

    let out_of_range = || anyhow::anyhow!("invalid duration {:?}: out of range", input);
    let mut total_nanos: u64 = 0;

    while !rest.is_empty() {
        let int_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let int_part = &rest[..int_end];
        rest = &rest[int_end..];

        let mut frac_part = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_end = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            frac_part = &after_dot[..frac_end];
            rest = &after_dot[frac_end..];
        }

        if int_part.is_empty() && frac_part.is_empty() {
            bail!("invalid duration {:?}", input);
        }

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];

        let scale = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SECOND,
            "m" => NANOS_PER_MINUTE,
            "h" => NANOS_PER_HOUR,
            "d" => NANOS_PER_DAY,
            "w" => NANOS_PER_WEEK,
            "" => bail!("missing unit in duration {:?}", input),
            other => bail!("unknown unit {:?} in duration {:?}", other, input),
        };

        let whole: u64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| out_of_range())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(out_of_range)?;

        if !frac_part.is_empty() {
            let digits = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS)];
            let numerator: u64 = digits.parse().map_err(|_| out_of_range())?;
            let denominator = 10_u64.pow(digits.len() as u32);
            let fraction = (numerator as f64 * (scale as f64 / denominator as f64)) as u64;
            nanos = nanos.checked_add(fraction).ok_or_else(out_of_range)?;
        }

        total_nanos = total_nanos.checked_add(nanos).ok_or_else(out_of_range)?;
    }

    let nanos = i64::try_from(total_nanos).map_err(|_| out_of_range())?;
    Ok(Duration::nanoseconds(if negative { -nanos } else { nanos }))
}
