//! ffmpeg command planning
//!
//! Turns a validated [`Invocation`] into an [`OutputSpec`]: the output file
//! name plus the exact ffmpeg argument vector. Planning is pure; nothing here
//! touches the filesystem or spawns processes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;

pub mod naming;
pub mod speed;

pub use speed::SpeedFilters;

/// HDR to SDR chain: linearise, move to BT.709 primaries, Hable tone-map,
/// then tag as BT.709 limited range 4:2:0
pub const TONEMAP_CHAIN: &str = "zscale=t=linear:npl=100,format=gbrpf32le,zscale=p=bt709,\
tonemap=tonemap=hable:desat=0,zscale=t=bt709:m=bt709:r=tv,format=yuv420p";

/// Software encoder used by tosdr
pub const SDR_ENCODER: &str = "libx264";

/// How clip cuts the range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipMode {
    /// Stream copy (fast, cuts snap to keyframes)
    #[default]
    Copy,
    /// Full re-encode (slow, frame accurate)
    Reencode,
}

impl std::str::FromStr for ClipMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "copy" => Ok(ClipMode::Copy),
            "reencode" => Ok(ClipMode::Reencode),
            other => Err(DomainError::Config(format!(
                "invalid clip mode '{}', expected copy or reencode",
                other
            ))),
        }
    }
}

/// Knobs that shape the generated commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Pass `-y` (overwrite) instead of `-n`
    pub overwrite: bool,
    pub clip_mode: ClipMode,
    /// Round resized dimensions down to even numbers
    pub even_dimensions: bool,
    /// CRF for the tosdr re-encode
    pub sdr_crf: u8,
    /// x264 preset for the tosdr re-encode
    pub sdr_preset: String,
    /// JPEG qscale for capture (1 best .. 31 worst)
    pub capture_quality: u8,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            overwrite: true,
            clip_mode: ClipMode::Copy,
            even_dimensions: true,
            sdr_crf: 18,
            sdr_preset: "slow".to_string(),
            capture_quality: 2,
        }
    }
}

/// Builds output specs from validated invocations
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    options: BuildOptions,
}

impl CommandBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Produce the output path and ffmpeg arguments for one action
    pub fn build(&self, invocation: &Invocation, param: &ParsedParameter) -> DomainResult<OutputSpec> {
        let action = invocation.action;
        let output = naming::output_path(invocation.input(), action, param)?;
        let input = invocation.input().to_string_lossy().into_owned();
        let input = input.as_str();
        let overwrite_flag = if self.options.overwrite { "-y" } else { "-n" };

        let mut args: Vec<String> = vec!["-hide_banner".into(), overwrite_flag.into()];

        match (action, param) {
            (Action::Convert, ParsedParameter::Format(_)) => {
                push_all(&mut args, ["-i", input, "-c:a", "copy"]);
            }
            (Action::Vol, ParsedParameter::Ratio(gain)) => {
                push_all(&mut args, ["-i", input, "-filter:a"]);
                args.push(format!("volume={}", gain));
            }
            (Action::Resize, ParsedParameter::Ratio(ratio)) => {
                push_all(&mut args, ["-i", input, "-vf"]);
                args.push(self.scale_filter(ratio));
                push_all(&mut args, ["-c:a", "copy"]);
            }
            (Action::Mute, _) => {
                push_all(&mut args, ["-i", input, "-an"]);
            }
            (Action::Capture, ParsedParameter::Seconds(at)) => {
                args.push("-ss".into());
                args.push(at.to_string());
                push_all(&mut args, ["-i", input, "-frames:v", "1", "-q:v"]);
                args.push(self.options.capture_quality.to_string());
            }
            (Action::Clip, ParsedParameter::TimeRange(range)) => {
                self.push_clip(&mut args, input, range);
            }
            (Action::Crop, ParsedParameter::Crop(region)) => {
                push_all(&mut args, ["-i", input, "-vf"]);
                args.push(format!(
                    "crop={}:{}:{}:{}",
                    region.w, region.h, region.x, region.y
                ));
                push_all(&mut args, ["-c:a", "copy"]);
            }
            (Action::Speed, ParsedParameter::Ratio(factor)) => {
                let filters = SpeedFilters::compile(factor.value());
                debug!(stages = ?filters.audio_stages, "compiled tempo chain");
                push_all(&mut args, ["-i", input, "-filter_complex"]);
                args.push(filters.filter_complex());
                push_all(&mut args, ["-map", "[v]", "-map", "[a]"]);
            }
            (Action::Tosdr, _) => {
                push_all(&mut args, ["-i", input, "-vf", TONEMAP_CHAIN, "-c:v", SDR_ENCODER, "-crf"]);
                args.push(self.options.sdr_crf.to_string());
                args.push("-preset".into());
                args.push(self.options.sdr_preset.clone());
                push_all(&mut args, ["-c:a", "copy"]);
            }
            (Action::Fps, ParsedParameter::Ratio(rate)) => {
                push_all(&mut args, ["-i", input, "-vf"]);
                args.push(format!("fps={}", rate));
                push_all(&mut args, ["-c:a", "copy"]);
            }
            (action, param) => return Err(naming::mismatch(action, param)),
        }

        args.push(output.to_string_lossy().into_owned());

        Ok(OutputSpec {
            path: output,
            tool_args: args,
        })
    }

    fn scale_filter(&self, ratio: &Ratio) -> String {
        if self.options.even_dimensions {
            format!(
                "scale=trunc(iw*{r}/2)*2:trunc(ih*{r}/2)*2",
                r = ratio
            )
        } else {
            format!("scale=iw*{r}:ih*{r}", r = ratio)
        }
    }

    fn push_clip(&self, args: &mut Vec<String>, input: &str, range: &TimeRange) {
        let start = range.start().to_string();
        let duration = range.duration_seconds().to_string();

        match self.options.clip_mode {
            // Input seeking plus stream copy: fast, snaps to the previous keyframe
            ClipMode::Copy => {
                push_all(args, ["-ss", start.as_str(), "-i", input, "-t", duration.as_str(), "-c", "copy"]);
            }
            // Output seeking with a full decode/encode: exact frames
            ClipMode::Reencode => {
                push_all(args, ["-i", input, "-ss", start.as_str(), "-t", duration.as_str()]);
            }
        }
    }
}

fn push_all<const N: usize>(args: &mut Vec<String>, items: [&str; N]) {
    args.extend(items.iter().map(|s| s.to_string()));
}
