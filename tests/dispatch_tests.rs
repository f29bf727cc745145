//! Dispatcher tests against in-memory probe and execution ports

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use ffverb::app::DispatchInteractor;
use ffverb::domain::model::{FrameRate, MediaDimensions};
use ffverb::ports::{ExecutePort, ExitReport, ProbePort};
use ffverb::{BuildOptions, CommandBuilder, DispatchOutcome, DomainError, OutputSpec};

/// Probe that answers from fixed values and counts queries
struct FakeProbe {
    dimensions: MediaDimensions,
    frame_rate: FrameRate,
    calls: AtomicUsize,
}

impl FakeProbe {
    fn new(width: u32, height: u32, fps: f64) -> Self {
        Self {
            dimensions: MediaDimensions { width, height },
            frame_rate: FrameRate::new(fps),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProbePort for FakeProbe {
    async fn probe_dimensions(&self, _file_path: &Path) -> Result<MediaDimensions, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.dimensions)
    }

    async fn probe_frame_rate(&self, _file_path: &Path) -> Result<FrameRate, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.frame_rate)
    }
}

/// Execution port that records every spec instead of spawning ffmpeg
struct RecordingExec {
    available: bool,
    exit_code: Option<i32>,
    availability_checks: AtomicUsize,
    runs: Mutex<Vec<OutputSpec>>,
}

impl RecordingExec {
    fn succeeding() -> Self {
        Self::with(true, Some(0))
    }

    fn with(available: bool, exit_code: Option<i32>) -> Self {
        Self {
            available,
            exit_code,
            availability_checks: AtomicUsize::new(0),
            runs: Mutex::new(Vec::new()),
        }
    }

    fn runs(&self) -> Vec<OutputSpec> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutePort for RecordingExec {
    fn tool_name(&self) -> &str {
        "ffmpeg"
    }

    async fn ensure_available(&self) -> Result<(), DomainError> {
        self.availability_checks.fetch_add(1, Ordering::SeqCst);
        if self.available {
            Ok(())
        } else {
            Err(DomainError::ToolUnavailable("ffmpeg".to_string()))
        }
    }

    async fn run(&self, spec: &OutputSpec) -> Result<ExitReport, DomainError> {
        self.runs.lock().unwrap().push(spec.clone());
        Ok(ExitReport {
            code: self.exit_code,
        })
    }
}

struct Harness {
    _dir: TempDir,
    input: PathBuf,
    probe: Arc<FakeProbe>,
    exec: Arc<RecordingExec>,
    interactor: DispatchInteractor,
}

impl Harness {
    fn new(probe: FakeProbe, exec: RecordingExec) -> Self {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("source.mp4");
        std::fs::write(&input, b"not really a video").unwrap();

        let probe = Arc::new(probe);
        let exec = Arc::new(exec);
        let interactor = DispatchInteractor::new(
            Arc::clone(&probe) as Arc<dyn ProbePort>,
            Arc::clone(&exec) as Arc<dyn ExecutePort>,
            CommandBuilder::new(BuildOptions::default()),
        );

        Self {
            _dir: dir,
            input,
            probe,
            exec,
            interactor,
        }
    }

    fn hd() -> Self {
        Self::new(FakeProbe::new(1920, 1080, 30.0), RecordingExec::succeeding())
    }

    async fn dispatch(&self, action: &str, param: &str) -> Result<DispatchOutcome, DomainError> {
        let input = self.input.to_string_lossy().into_owned();
        self.interactor.dispatch(&[action, param, input.as_str()]).await
    }

    fn sibling(&self, name: &str) -> PathBuf {
        self.input.with_file_name(name)
    }
}

#[tokio::test]
async fn test_clip_runs_ffmpeg_with_duration() {
    let h = Harness::hd();
    let outcome = h.dispatch("clip", "00:01:23-00:02:45").await.unwrap();

    let runs = h.exec.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(outcome, DispatchOutcome::Produced(runs[0].clone()));
    assert_eq!(runs[0].path, h.sibling("source_clip_000123-000245.mp4"));

    let args = &runs[0].tool_args;
    let t = args.iter().position(|a| a == "-t").unwrap();
    assert_eq!(args[t + 1], "82");
    assert_eq!(h.probe.calls(), 0, "clip must not probe");
}

#[tokio::test]
async fn test_inverted_clip_never_spawns() {
    let h = Harness::hd();
    let err = h.dispatch("clip", "00:02:45-00:01:23").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(h.exec.runs().is_empty());
}

#[tokio::test]
async fn test_crop_inside_frame_succeeds() {
    let h = Harness::hd();
    let outcome = h.dispatch("crop", "100:50-1280:720").await.unwrap();

    match outcome {
        DispatchOutcome::Produced(spec) => {
            assert!(spec.tool_args.contains(&"crop=1280:720:100:50".to_string()));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(h.probe.calls(), 1);
}

#[tokio::test]
async fn test_crop_outside_frame_reports_max_width() {
    let h = Harness::new(FakeProbe::new(1000, 1080, 30.0), RecordingExec::succeeding());
    let err = h.dispatch("crop", "100:50-1280:720").await.unwrap_err();

    match err {
        DomainError::Bounds { max_width, .. } => assert_eq!(max_width, 900),
        other => panic!("expected bounds error, got {:?}", other),
    }
    assert!(err_message_mentions_900(&h).await);
    assert!(h.exec.runs().is_empty());
}

async fn err_message_mentions_900(h: &Harness) -> bool {
    let err = h.dispatch("crop", "100:50-1280:720").await.unwrap_err();
    err.to_string().contains("max width from this offset is 900")
}

#[tokio::test]
async fn test_fps_already_at_target_skips_encode() {
    let h = Harness::new(FakeProbe::new(1920, 1080, 30000.0 / 1001.0), RecordingExec::succeeding());
    let outcome = h.dispatch("fps", "30").await.unwrap();

    assert!(matches!(outcome, DispatchOutcome::AlreadyAtTarget { .. }));
    assert!(h.exec.runs().is_empty());
    assert!(!h.sibling("source_30fps.mp4").exists());
}

#[tokio::test]
async fn test_fps_conversion_runs() {
    let h = Harness::new(FakeProbe::new(1920, 1080, 25.0), RecordingExec::succeeding());
    h.dispatch("fps", "60").await.unwrap();

    let runs = h.exec.runs();
    assert_eq!(runs.len(), 1);
    assert!(runs[0].tool_args.contains(&"fps=60".to_string()));
    assert_eq!(runs[0].path, h.sibling("source_60fps.mp4"));
}

#[tokio::test]
async fn test_speed_four_builds_two_tempo_stages() {
    let h = Harness::hd();
    h.dispatch("speed", "4").await.unwrap();

    let runs = h.exec.runs();
    assert!(runs[0]
        .tool_args
        .iter()
        .any(|a| a.contains("atempo=2.0,atempo=2.0")));
}

#[tokio::test]
async fn test_unknown_action_touches_nothing() {
    let h = Harness::hd();
    let err = h.dispatch("explode", "1").await.unwrap_err();

    assert_eq!(err.to_string(), "Unsupported action: explode");
    assert_eq!(h.exec.availability_checks.load(Ordering::SeqCst), 0);
    assert!(h.exec.runs().is_empty());
    assert_eq!(h.probe.calls(), 0);
}

#[tokio::test]
async fn test_wrong_argument_count_is_usage_error() {
    let h = Harness::hd();
    let err = h.interactor.dispatch(&["clip", "00:00:01-00:00:02"]).await.unwrap_err();
    assert!(err.wants_usage());
}

#[tokio::test]
async fn test_missing_tool_fails_before_parsing() {
    let h = Harness::new(FakeProbe::new(1920, 1080, 30.0), RecordingExec::with(false, Some(0)));
    let err = h.dispatch("speed", "not-a-number").await.unwrap_err();
    assert!(matches!(err, DomainError::ToolUnavailable(_)));
}

#[tokio::test]
async fn test_missing_input_file() {
    let h = Harness::hd();
    let err = h
        .interactor
        .dispatch(&["mute", "-", "/definitely/not/here.mp4"])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
    assert!(h.exec.runs().is_empty());
}

#[tokio::test]
async fn test_non_zero_exit_is_external_failure() {
    let h = Harness::new(FakeProbe::new(1920, 1080, 30.0), RecordingExec::with(true, Some(1)));
    let err = h.dispatch("mute", "-").await.unwrap_err();

    match err {
        DomainError::ExternalFailure { tool, code } => {
            assert_eq!(tool, "ffmpeg");
            assert_eq!(code, Some(1));
        }
        other => panic!("expected external failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_repeat_dispatch_builds_identical_specs() {
    let h = Harness::hd();
    for (action, param) in [("resize", "0.5"), ("vol", "2"), ("capture", "10"), ("convert", "mkv")] {
        h.dispatch(action, param).await.unwrap();
        h.dispatch(action, param).await.unwrap();
    }

    let runs = h.exec.runs();
    assert_eq!(runs.len(), 8);
    for pair in runs.chunks(2) {
        assert_eq!(pair[0], pair[1]);
    }
}
