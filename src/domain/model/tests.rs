// Unit tests for domain models

use super::*;

#[test]
fn test_action_round_trips_through_its_name() {
    for action in Action::ALL {
        assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
    }
}

#[test]
fn test_unknown_action_is_rejected() {
    let err = "explode".parse::<Action>().unwrap_err();
    assert!(matches!(err, DomainError::UnsupportedAction(ref name) if name == "explode"));
    assert_eq!(err.to_string(), "Unsupported action: explode");
}

#[test]
fn test_action_names_are_case_sensitive() {
    assert!("Clip".parse::<Action>().is_err());
}

#[test]
fn test_only_crop_and_fps_need_probe() {
    let probing: Vec<Action> = Action::ALL.into_iter().filter(|a| a.needs_probe()).collect();
    assert_eq!(probing, vec![Action::Crop, Action::Fps]);
}

#[test]
fn test_invocation_from_three_args() {
    let inv = Invocation::from_args(&["speed", "2", "/videos/a.mp4"]).unwrap();
    assert_eq!(inv.action, Action::Speed);
    assert_eq!(inv.parameter, "2");
    assert_eq!(inv.input(), Path::new("/videos/a.mp4"));
}

#[test]
fn test_invocation_wrong_arg_count() {
    let err = Invocation::from_args(&["speed", "2"]).unwrap_err();
    assert!(err.wants_usage());

    let err = Invocation::from_args(&["a", "b", "c", "d"]).unwrap_err();
    assert!(matches!(err, DomainError::Usage(_)));

    let empty: [&str; 0] = [];
    assert!(Invocation::from_args(&empty).is_err());
}

#[test]
fn test_timestamp_seconds_and_compact_form() {
    let ts = Timestamp { hours: 1, minutes: 2, seconds: 3 };
    assert_eq!(ts.as_seconds(), 3723);
    assert_eq!(ts.compact(), "010203");
    assert_eq!(ts.to_string(), "01:02:03");
}

#[test]
fn test_time_range_requires_end_after_start() {
    let a = Timestamp { hours: 0, minutes: 1, seconds: 23 };
    let b = Timestamp { hours: 0, minutes: 2, seconds: 45 };

    let range = TimeRange::new(a, b).unwrap();
    assert_eq!(range.duration_seconds(), 82);

    let err = TimeRange::new(b, a).unwrap_err();
    assert!(err.to_string().contains("end time must exceed start time"));
    assert!(TimeRange::new(a, a).is_err());
}

#[test]
fn test_crop_region_rejects_zero_size() {
    assert!(CropRegion::new(0, 0, 0, 10).is_err());
    assert!(CropRegion::new(0, 0, 10, 0).is_err());
    assert_eq!(
        CropRegion::new(5, 6, 7, 8).unwrap(),
        CropRegion { x: 5, y: 6, w: 7, h: 8 }
    );
}

#[test]
fn test_frame_rate_normalised_to_two_places() {
    let rate = FrameRate::new(30000.0 / 1001.0);
    assert_eq!(rate.value(), 29.97);
    assert_eq!(rate.to_string(), "29.97");
    assert_eq!(FrameRate::new(25.0).to_string(), "25.00");
}

#[test]
fn test_media_dimensions_display() {
    let dims = MediaDimensions { width: 1920, height: 1080 };
    assert_eq!(dims.to_string(), "1920x1080");
}
