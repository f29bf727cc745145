//! Output file naming
//!
//! `{input without extension}_{tag}.{ext}`, next to the input file.

use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Extension used when the input has none
pub const FALLBACK_EXTENSION: &str = "mp4";

/// Derive the output path for `action` applied to `input`
pub fn output_path(input: &Path, action: Action, param: &ParsedParameter) -> DomainResult<PathBuf> {
    let (tag, extension) = tag_and_extension(input, action, param)?;

    let mut name = input.with_extension("").into_os_string();
    name.push(format!("_{}.{}", tag, extension));
    Ok(PathBuf::from(name))
}

fn tag_and_extension(
    input: &Path,
    action: Action,
    param: &ParsedParameter,
) -> DomainResult<(String, String)> {
    let source_ext = || source_extension(input);

    let pair = match (action, param) {
        (Action::Convert, ParsedParameter::Format(format)) => {
            ("converted".to_string(), format.clone())
        }
        (Action::Vol, ParsedParameter::Ratio(_)) => ("vol_changed".to_string(), source_ext()),
        (Action::Resize, ParsedParameter::Ratio(_)) => ("resized".to_string(), source_ext()),
        (Action::Mute, _) => ("muted".to_string(), source_ext()),
        (Action::Capture, ParsedParameter::Seconds(at)) => {
            (format!("frame_at_{}s", at), "jpg".to_string())
        }
        (Action::Clip, ParsedParameter::TimeRange(range)) => (
            format!("clip_{}-{}", range.start().compact(), range.end().compact()),
            source_ext(),
        ),
        (Action::Crop, ParsedParameter::Crop(region)) => (
            format!("crop_{}x{}-{}x{}", region.x, region.y, region.w, region.h),
            source_ext(),
        ),
        (Action::Speed, ParsedParameter::Ratio(factor)) => (format!("{}x", factor), source_ext()),
        (Action::Tosdr, _) => ("SDR".to_string(), "mp4".to_string()),
        (Action::Fps, ParsedParameter::Ratio(rate)) => (format!("{}fps", rate), source_ext()),
        (action, param) => return Err(mismatch(action, param)),
    };

    Ok(pair)
}

fn source_extension(input: &Path) -> String {
    input
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

pub(crate) fn mismatch(action: Action, param: &ParsedParameter) -> DomainError {
    DomainError::validation(format!(
        "parameter {:?} does not apply to action '{}'",
        param, action
    ))
}
