//! Speed filter compilation
//!
//! ffmpeg's `atempo` only accepts factors in `[0.5, 2.0]`, so larger and
//! smaller speed changes are expressed as a chain of stages whose product is
//! the requested factor. Video is retimed with a single `setpts` expression.

/// Lower bound of a single `atempo` stage
pub const TEMPO_MIN: f64 = 0.5;
/// Upper bound of a single `atempo` stage
pub const TEMPO_MAX: f64 = 2.0;
/// Cap on bound stages in one direction
pub const MAX_BOUND_STAGES: usize = 16;

/// Filters for one speed change
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedFilters {
    /// `setpts=<1/F>*PTS`
    pub video: String,
    /// Tempo factors, applied in order
    pub audio_stages: Vec<f64>,
}

impl SpeedFilters {
    /// Compile filters for speed factor `factor` (must be > 0)
    pub fn compile(factor: f64) -> Self {
        Self {
            video: video_expr(factor),
            audio_stages: tempo_chain(factor),
        }
    }

    /// `atempo=a,atempo=b,...`
    pub fn audio_expr(&self) -> String {
        self.audio_stages
            .iter()
            .map(|stage| format!("atempo={}", format_stage(*stage)))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Graph for `-filter_complex`, producing `[v]` and `[a]` pads
    pub fn filter_complex(&self) -> String {
        format!("[0:v]{}[v];[0:a]{}[a]", self.video, self.audio_expr())
    }
}

/// Timestamp scaling for the video stream, six fractional digits
pub fn video_expr(factor: f64) -> String {
    format!("setpts={:.6}*PTS", 1.0 / factor)
}

/// Split `factor` into `atempo` stages that each stay within range.
///
/// Stages at the bound are emitted first; the remainder goes last. At most
/// [`MAX_BOUND_STAGES`] bound stages are emitted, so a factor outside the
/// accepted speed range yields an out-of-range remainder rather than looping.
pub fn tempo_chain(factor: f64) -> Vec<f64> {
    let mut stages = Vec::new();
    let mut remaining = factor;

    while remaining > TEMPO_MAX && stages.len() < MAX_BOUND_STAGES {
        stages.push(TEMPO_MAX);
        remaining /= TEMPO_MAX;
    }
    while remaining < TEMPO_MIN && remaining > 0.0 && stages.len() < MAX_BOUND_STAGES {
        stages.push(TEMPO_MIN);
        remaining /= TEMPO_MIN;
    }
    stages.push(remaining);

    stages
}

/// Six decimals, trailing zeros trimmed, at least one fractional digit
fn format_stage(stage: f64) -> String {
    let fixed = format!("{:.6}", stage);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}
