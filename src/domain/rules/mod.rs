// Domain rules - Parameter grammars and the checks that need probed metadata

use crate::domain::errors::*;
use crate::domain::model::*;

/// Requested and current frame rates closer than this are treated as equal
pub const FPS_TOLERANCE: f64 = 0.1;

/// Slowest accepted speed factor
pub const MIN_SPEED: f64 = 0.01;
/// Fastest accepted speed factor
pub const MAX_SPEED: f64 = 100.0;

/// Parse the raw parameter according to the grammar of `action`
pub fn parse_parameter(action: Action, raw: &str) -> DomainResult<ParsedParameter> {
    match action {
        Action::Convert => parse_format(raw).map(ParsedParameter::Format),
        Action::Vol => parse_ratio(raw, false).map(ParsedParameter::Ratio),
        Action::Resize | Action::Fps => parse_ratio(raw, true).map(ParsedParameter::Ratio),
        Action::Speed => parse_speed(raw).map(ParsedParameter::Ratio),
        Action::Capture => parse_seconds(raw).map(ParsedParameter::Seconds),
        Action::Clip => parse_time_range(raw).map(ParsedParameter::TimeRange),
        Action::Crop => parse_crop(raw).map(ParsedParameter::Crop),
        Action::Mute | Action::Tosdr => Ok(ParsedParameter::Ignored),
    }
}

/// Parse `HH:MM:SS`, every field exactly two ASCII digits.
///
/// Fields are read as plain base-10 so `08` and `09` are valid.
pub fn parse_timestamp(raw: &str) -> DomainResult<Timestamp> {
    let fields: Vec<&str> = raw.split(':').collect();
    let [h, m, s] = fields.as_slice() else {
        return Err(DomainError::validation(format!(
            "'{}' is not a HH:MM:SS time",
            raw
        )));
    };

    let hours = two_digit_field(h, "hours", raw)?;
    let minutes = two_digit_field(m, "minutes", raw)?;
    let seconds = two_digit_field(s, "seconds", raw)?;

    if minutes >= 60 || seconds >= 60 {
        return Err(DomainError::validation(format!(
            "'{}': minutes and seconds must be below 60",
            raw
        )));
    }

    Ok(Timestamp {
        hours,
        minutes,
        seconds,
    })
}

fn two_digit_field(field: &str, name: &str, raw: &str) -> DomainResult<u32> {
    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::validation(format!(
            "'{}': {} must be exactly two digits",
            raw, name
        )));
    }
    field
        .parse::<u32>()
        .map_err(|e| DomainError::validation(format!("'{}': {}", raw, e)))
}

/// Parse `HH:MM:SS-HH:MM:SS`
pub fn parse_time_range(raw: &str) -> DomainResult<TimeRange> {
    let (start, end) = split_once_strict(raw, '-').ok_or_else(|| {
        DomainError::validation(format!(
            "'{}' is not a time range, expected HH:MM:SS-HH:MM:SS",
            raw
        ))
    })?;

    TimeRange::new(parse_timestamp(start)?, parse_timestamp(end)?)
}

/// Parse `x:y-w:h`
pub fn parse_crop(raw: &str) -> DomainResult<CropRegion> {
    let bad = || {
        DomainError::validation(format!(
            "'{}' is not a crop region, expected x:y-w:h",
            raw
        ))
    };

    let (offset, size) = split_once_strict(raw, '-').ok_or_else(bad)?;
    let (x, y) = split_once_strict(offset, ':').ok_or_else(bad)?;
    let (w, h) = split_once_strict(size, ':').ok_or_else(bad)?;

    CropRegion::new(
        unsigned_integer(x, raw)?,
        unsigned_integer(y, raw)?,
        unsigned_integer(w, raw)?,
        unsigned_integer(h, raw)?,
    )
}

/// Parse an unsigned decimal (`2`, `0.75`, `1.50`).
///
/// With `strictly_positive` a value of zero is rejected.
pub fn parse_ratio(raw: &str, strictly_positive: bool) -> DomainResult<Ratio> {
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (raw, None),
    };

    let digits_only = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits_only(int_part) || !frac_part.map_or(true, digits_only) {
        return Err(DomainError::validation(format!(
            "'{}' is not an unsigned decimal number",
            raw
        )));
    }

    let value: f64 = raw
        .parse()
        .map_err(|e| DomainError::validation(format!("'{}': {}", raw, e)))?;

    if !value.is_finite() {
        return Err(DomainError::validation(format!("'{}' is out of range", raw)));
    }
    if strictly_positive && value <= 0.0 {
        return Err(DomainError::validation(format!(
            "'{}' must be greater than zero",
            raw
        )));
    }

    Ok(Ratio::new(raw.to_string(), value))
}

/// Parse a speed factor, bounded so the tempo chain stays short
pub fn parse_speed(raw: &str) -> DomainResult<Ratio> {
    let ratio = parse_ratio(raw, true)?;
    if !(MIN_SPEED..=MAX_SPEED).contains(&ratio.value()) {
        return Err(DomainError::validation(format!(
            "speed '{}' must be between {} and {}",
            raw, MIN_SPEED, MAX_SPEED
        )));
    }
    Ok(ratio)
}

/// Parse a whole number of seconds
pub fn parse_seconds(raw: &str) -> DomainResult<u64> {
    unsigned_integer(raw, raw)
}

/// Validate a target container name
pub fn parse_format(raw: &str) -> DomainResult<String> {
    if raw.is_empty() {
        return Err(DomainError::validation("format must not be empty"));
    }
    if raw.starts_with('.') {
        return Err(DomainError::validation(format!(
            "format '{}' must be given without a leading dot",
            raw
        )));
    }
    if raw
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(DomainError::validation(format!(
            "format '{}' must not contain path separators or whitespace",
            raw
        )));
    }
    Ok(raw.to_string())
}

/// Fail unless the crop rectangle lies fully inside the source frame
pub fn check_crop_bounds(region: &CropRegion, source: &MediaDimensions) -> DomainResult<()> {
    let fits_x = region.x < source.width
        && u64::from(region.x) + u64::from(region.w) <= u64::from(source.width);
    let fits_y = region.y < source.height
        && u64::from(region.y) + u64::from(region.h) <= u64::from(source.height);

    if fits_x && fits_y {
        return Ok(());
    }

    Err(DomainError::Bounds {
        x: region.x,
        y: region.y,
        w: region.w,
        h: region.h,
        width: source.width,
        height: source.height,
        max_width: source.width.saturating_sub(region.x),
        max_height: source.height.saturating_sub(region.y),
    })
}

/// Whether the source already plays at `target` frames per second
pub fn is_already_at_rate(current: FrameRate, target: &Ratio) -> bool {
    (current.value() - target.value()).abs() < FPS_TOLERANCE
}

/// Read a frame rate reported as `30000/1001` or `29.97`
pub fn parse_frame_rate(raw: &str) -> Option<FrameRate> {
    let raw = raw.trim();
    let fps = match raw.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => raw.parse().ok()?,
    };

    (fps.is_finite() && fps > 0.0).then(|| FrameRate::new(fps))
}

/// Split on exactly one occurrence of `sep`
fn split_once_strict(raw: &str, sep: char) -> Option<(&str, &str)> {
    let (left, right) = raw.split_once(sep)?;
    if right.contains(sep) {
        return None;
    }
    Some((left, right))
}

fn unsigned_integer<T: std::str::FromStr>(field: &str, raw: &str) -> DomainResult<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::validation(format!(
            "'{}': '{}' is not a non-negative integer",
            raw, field
        )));
    }
    field.parse::<T>().map_err(|_| {
        DomainError::validation(format!("'{}': '{}' is out of range", raw, field))
    })
}
