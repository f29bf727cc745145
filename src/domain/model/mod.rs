// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// The closed set of verbs the dispatcher understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Convert,
    Vol,
    Resize,
    Mute,
    Capture,
    Clip,
    Crop,
    Speed,
    Tosdr,
    Fps,
}

impl Action {
    /// Every action, in usage-table order
    pub const ALL: [Action; 10] = [
        Action::Convert,
        Action::Vol,
        Action::Resize,
        Action::Mute,
        Action::Capture,
        Action::Clip,
        Action::Crop,
        Action::Speed,
        Action::Tosdr,
        Action::Fps,
    ];

    /// Name as typed on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Convert => "convert",
            Action::Vol => "vol",
            Action::Resize => "resize",
            Action::Mute => "mute",
            Action::Capture => "capture",
            Action::Clip => "clip",
            Action::Crop => "crop",
            Action::Speed => "speed",
            Action::Tosdr => "tosdr",
            Action::Fps => "fps",
        }
    }

    /// Shape of the parameter, for the usage table
    pub fn param_hint(&self) -> &'static str {
        match self {
            Action::Convert => "<format>",
            Action::Vol => "<multiplier>",
            Action::Resize => "<ratio>",
            Action::Mute => "-",
            Action::Capture => "<seconds>",
            Action::Clip => "HH:MM:SS-HH:MM:SS",
            Action::Crop => "x:y-w:h",
            Action::Speed => "<factor>",
            Action::Tosdr => "-",
            Action::Fps => "<rate>",
        }
    }

    /// One-line summary, for the usage table
    pub fn summary(&self) -> &'static str {
        match self {
            Action::Convert => "Re-encode into another container (mp4, mkv, webm, ...)",
            Action::Vol => "Scale audio volume (1.5 = +50%, 0.5 = half)",
            Action::Resize => "Scale both dimensions by a ratio (0.5 = half size)",
            Action::Mute => "Drop every audio stream",
            Action::Capture => "Save the frame at the given second as a JPEG",
            Action::Clip => "Cut out a time range without re-encoding",
            Action::Crop => "Crop a w x h rectangle whose top-left corner is at x,y",
            Action::Speed => "Change playback speed of video and audio together",
            Action::Tosdr => "Tone-map HDR video down to SDR (always writes .mp4)",
            Action::Fps => "Convert to a different frame rate",
        }
    }

    /// Whether the action needs metadata from the probe before building
    pub fn needs_probe(&self) -> bool {
        matches!(self, Action::Crop | Action::Fps)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| DomainError::UnsupportedAction(s.to_string()))
    }
}

/// One run of the tool: what to do, with what parameter, to which file
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub action: Action,
    pub parameter: String,
    pub input_path: PathBuf,
}

impl Invocation {
    /// Build from the three raw positional arguments
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, DomainError> {
        let [action, parameter, input] = args else {
            return Err(DomainError::Usage(format!(
                "expected 3 arguments (action, parameter, file), got {}",
                args.len()
            )));
        };

        Ok(Self {
            action: action.as_ref().parse()?,
            parameter: parameter.as_ref().to_string(),
            input_path: PathBuf::from(input.as_ref()),
        })
    }

    pub fn input(&self) -> &Path {
        &self.input_path
    }
}

/// Wall-clock position written as HH:MM:SS
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Timestamp {
    /// Total seconds: h*3600 + m*60 + s
    pub fn as_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    /// HHMMSS, safe for file names
    pub fn compact(&self) -> String {
        format!("{:02}{:02}{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Start/end pair where end is strictly later than start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, DomainError> {
        if end.as_seconds() <= start.as_seconds() {
            return Err(DomainError::validation(format!(
                "end time must exceed start time ({} is not after {})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Length of the range in seconds
    pub fn duration_seconds(&self) -> u64 {
        self.end.as_seconds() - self.start.as_seconds()
    }
}

/// Pixel rectangle: offset (x, y), size (w, h)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Result<Self, DomainError> {
        if w == 0 || h == 0 {
            return Err(DomainError::validation(format!(
                "crop width and height must be greater than zero (got {}x{})",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }
}

/// Unsigned decimal as typed by the user plus its numeric value.
///
/// The text is kept so file names and filter arguments echo the user's input
/// exactly (`1.50` stays `1.50`).
#[derive(Debug, Clone, PartialEq)]
pub struct Ratio {
    text: String,
    value: f64,
}

impl Ratio {
    pub(crate) fn new(text: String, value: f64) -> Self {
        Self { text, value }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A parameter after it has passed its action's grammar
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedParameter {
    /// Target container, used verbatim as the output extension
    Format(String),
    /// Volume, resize, speed or fps factor
    Ratio(Ratio),
    /// Whole seconds into the input
    Seconds(u64),
    TimeRange(TimeRange),
    Crop(CropRegion),
    /// Action takes no parameter (mute, tosdr)
    Ignored,
}

/// Pixel size of the first video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaDimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for MediaDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Frames per second, normalised to two decimal places
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FrameRate(f64);

impl FrameRate {
    pub fn new(fps: f64) -> Self {
        Self((fps * 100.0).round() / 100.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Everything needed to launch ffmpeg for one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub path: PathBuf,
    pub tool_args: Vec<String>,
}

/// How a dispatch ended when it did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// ffmpeg ran and wrote the file
    Produced(OutputSpec),
    /// Source already plays at the requested rate; nothing was written
    AlreadyAtTarget { current: FrameRate, target: Ratio },
}

#[cfg(test)]
mod tests;
