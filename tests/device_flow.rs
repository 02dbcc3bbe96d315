//! End-to-end tests for the default-device change flow.
//!
//! The audio service runs against [`common::FakePactl`], which answers in
//! the control tool's own text format, so these tests exercise runner,
//! parser, validator and state machine together.

#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use std::sync::Arc;

use common::{FakeDevice, FakePactl, FakeState};
use resona::services::audio::{
    AudioConfigService, AudioError, ChangeOutcome, ChangePhase, ChangeRequest, ConfigurationError,
    DeviceRole, ValidationError,
};

fn service(fake: &Arc<FakePactl>) -> AudioConfigService {
    AudioConfigService::with_runner(fake.clone(), "pactl")
}

fn sink_request(target: &str) -> ChangeRequest {
    ChangeRequest {
        target: target.to_owned(),
        role: DeviceRole::Sink,
    }
}

#[tokio::test]
async fn successful_change_commits_with_new_default() {
    let fake = Arc::new(FakePactl::with_four_sinks());

    let outcome = service(&fake).set_default_device(&sink_request("dev-B")).await;

    match outcome {
        ChangeOutcome::Committed { configuration } => {
            assert_eq!(configuration.default_for(DeviceRole::Sink), Some("dev-B"));
        }
        other => panic!("expected Committed, got {other:?}"),
    }
    assert_eq!(fake.default_sink().as_deref(), Some("dev-B"));
    assert_eq!(
        fake.set_calls(),
        [("set-default-sink".to_owned(), "dev-B".to_owned())]
    );
}

#[tokio::test]
async fn apply_failure_never_alters_server_state() {
    let fake = Arc::new(FakePactl::with_four_sinks());
    fake.mutate(|state| state.fail_set_default = true);

    let outcome = service(&fake).set_default_device(&sink_request("dev-B")).await;

    match outcome {
        ChangeOutcome::Failed { phase, cause } => {
            assert_eq!(phase, ChangePhase::Applying);
            assert!(matches!(
                cause,
                AudioError::Configuration(ConfigurationError::ApplyFailed(_))
            ));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    // The mutating call was issued once and rejected; the default is intact.
    assert_eq!(fake.set_calls().len(), 1);
    assert_eq!(fake.default_sink().as_deref(), Some("dev-A"));
}

#[tokio::test]
async fn silently_ignored_apply_triggers_exactly_one_rollback() {
    let fake = Arc::new(FakePactl::with_four_sinks());
    fake.mutate(|state| state.ignore_set_default = true);

    let outcome = service(&fake).set_default_device(&sink_request("dev-B")).await;

    match outcome {
        ChangeOutcome::RolledBack { restored, cause } => {
            assert_eq!(restored.default_for(DeviceRole::Sink), Some("dev-A"));
            assert!(matches!(
                cause,
                AudioError::Configuration(ConfigurationError::VerifyFailed)
            ));
        }
        other => panic!("expected RolledBack, got {other:?}"),
    }
    // One apply, one rollback targeting the pre-change snapshot, no loop.
    assert_eq!(
        fake.set_calls(),
        [
            ("set-default-sink".to_owned(), "dev-B".to_owned()),
            ("set-default-sink".to_owned(), "dev-A".to_owned()),
        ]
    );
}

#[tokio::test]
async fn hijacked_change_is_rolled_back_to_snapshot() {
    let fake = Arc::new(FakePactl::with_four_sinks());
    fake.mutate(|state| state.hijack_next_set = Some("dev-C".to_owned()));

    let outcome = service(&fake).set_default_device(&sink_request("dev-B")).await;

    assert!(matches!(outcome, ChangeOutcome::RolledBack { .. }));
    assert_eq!(fake.default_sink().as_deref(), Some("dev-A"));
}

#[tokio::test]
async fn failing_rollback_surfaces_original_cause() {
    let fake = Arc::new(FakePactl::with_four_sinks());
    fake.mutate(|state| {
        state.hijack_next_set = Some("dev-C".to_owned());
        state.fail_set_default_after_first = true;
    });

    let outcome = service(&fake).set_default_device(&sink_request("dev-B")).await;

    match outcome {
        ChangeOutcome::Failed { phase, cause } => {
            assert_eq!(phase, ChangePhase::RollingBack);
            match cause {
                AudioError::Configuration(ConfigurationError::RollbackFailed { original }) => {
                    assert!(matches!(*original, ConfigurationError::VerifyFailed));
                }
                other => panic!("expected RollbackFailed, got {other:?}"),
            }
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    // Exactly two mutating calls: the apply and the single rollback attempt.
    assert_eq!(fake.set_calls().len(), 2);
}

#[tokio::test]
async fn missing_prior_default_makes_rollback_impossible() {
    let fake = Arc::new(FakePactl::with_four_sinks());
    fake.mutate(|state| {
        state.default_sink = None;
        state.ignore_set_default = true;
    });

    let outcome = service(&fake).set_default_device(&sink_request("dev-B")).await;

    match outcome {
        ChangeOutcome::Failed { phase, cause } => {
            assert_eq!(phase, ChangePhase::RollingBack);
            assert!(matches!(
                cause,
                AudioError::Configuration(ConfigurationError::RollbackFailed { .. })
            ));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(fake.set_calls().len(), 1);
}

#[tokio::test]
async fn malformed_target_id_fails_validation_without_side_effects() {
    let fake = Arc::new(FakePactl::with_four_sinks());

    let outcome = service(&fake)
        .set_default_device(&sink_request("../etc/passwd"))
        .await;

    match outcome {
        ChangeOutcome::Failed { phase, cause } => {
            assert_eq!(phase, ChangePhase::Validating);
            assert!(matches!(
                cause,
                AudioError::Validation(ValidationError::PathTraversal)
            ));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(fake.set_calls().is_empty());
}

#[tokio::test]
async fn well_formed_but_unknown_target_fails_distinctly() {
    let fake = Arc::new(FakePactl::with_four_sinks());

    let outcome = service(&fake).set_default_device(&sink_request("dev-Z")).await;

    match outcome {
        ChangeOutcome::Failed { phase, cause } => {
            assert_eq!(phase, ChangePhase::Validating);
            assert!(matches!(
                cause,
                AudioError::Configuration(ConfigurationError::TargetNotFound)
            ));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(fake.set_calls().is_empty());
}

#[tokio::test]
async fn unreachable_tool_fails_in_reading_phase() {
    let fake = Arc::new(FakePactl::with_four_sinks());
    fake.mutate(|state| state.tool_missing = true);

    let outcome = service(&fake).set_default_device(&sink_request("dev-B")).await;

    match outcome {
        ChangeOutcome::Failed { phase, cause } => {
            assert_eq!(phase, ChangePhase::Reading);
            assert!(matches!(cause, AudioError::Command(_)));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(fake.set_calls().is_empty());
}

#[tokio::test]
async fn source_changes_use_source_subcommands() {
    let fake = Arc::new(FakePactl::new(FakeState {
        sources: vec![
            FakeDevice::new("mic-internal", "Built-in Microphone"),
            FakeDevice::new("mic-usb", "USB Microphone"),
        ],
        default_source: Some("mic-internal".to_owned()),
        ..FakeState::default()
    }));

    let request = ChangeRequest {
        target: "mic-usb".to_owned(),
        role: DeviceRole::Source,
    };
    let outcome = service(&fake).set_default_device(&request).await;

    assert!(matches!(outcome, ChangeOutcome::Committed { .. }));
    assert_eq!(fake.default_source().as_deref(), Some("mic-usb"));
    assert_eq!(
        fake.set_calls(),
        [("set-default-source".to_owned(), "mic-usb".to_owned())]
    );
}

#[tokio::test]
async fn device_listing_marks_single_default_in_server_order() {
    let fake = Arc::new(FakePactl::with_four_sinks());

    let devices = service(&fake)
        .list_devices(DeviceRole::Sink)
        .await
        .unwrap();

    let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["dev-A", "dev-B", "dev-C", "dev-D"]);
    let defaults: Vec<&str> = devices
        .iter()
        .filter(|d| d.is_default)
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(defaults, ["dev-A"]);
}
