//! Default-device change orchestration.
//!
//! A change runs through an explicit state machine:
//!
//! ```text
//! Reading -> Validating -> Applying -> Verifying -> Committed
//!                                          |
//!                                          v
//!                                     RollingBack -> RolledBack | Failed
//! ```
//!
//! Each transition is a single arm of [`AudioConfigService::step`], so the
//! "rollback exactly once" invariant is structurally visible: no transition
//! re-enters `RollingBack`. The server is the only shared mutable resource
//! and it is external, so correctness against concurrent mutation comes
//! from verify-after-write rather than locking.

use std::fmt;

use tracing::{debug, warn};

use super::{
    error::{AudioError, ConfigurationError},
    service::AudioConfigService,
    types::{ChangeRequest, DeviceConfiguration},
    validate::validate_device_id,
};

/// Phase of a default-device change, named in failure reports so an
/// operator can tell "device doesn't exist" from "the tool is broken"
/// from "we changed it but couldn't verify".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangePhase {
    /// Capturing the pre-change snapshot
    Reading,
    /// Checking the target id and its presence on the server
    Validating,
    /// Issuing the set-default command
    Applying,
    /// Re-reading state to confirm the change took effect
    Verifying,
    /// Re-issuing the set-default command with the snapshot id
    RollingBack,
}

impl fmt::Display for ChangePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangePhase::Reading => "reading",
            ChangePhase::Validating => "validating",
            ChangePhase::Applying => "applying",
            ChangePhase::Verifying => "verifying",
            ChangePhase::RollingBack => "rolling back",
        };
        write!(f, "{name}")
    }
}

/// Terminal result of a default-device change.
#[derive(Debug)]
pub enum ChangeOutcome {
    /// The change took effect and verification confirmed it
    Committed {
        /// Configuration observed after the change
        configuration: DeviceConfiguration,
    },
    /// The change failed verification and the previous default was restored
    RolledBack {
        /// Configuration observed after the rollback
        restored: DeviceConfiguration,
        /// The failure that triggered the rollback
        cause: AudioError,
    },
    /// The change failed; `phase` names where
    Failed {
        /// Phase that failed
        phase: ChangePhase,
        /// Underlying cause
        cause: AudioError,
    },
}

/// In-flight state of one change operation. States after `Reading` carry
/// the snapshot that serves as the rollback target.
enum ChangeState {
    Reading,
    Validating { snapshot: DeviceConfiguration },
    Applying { snapshot: DeviceConfiguration },
    Verifying { snapshot: DeviceConfiguration },
    RollingBack { snapshot: DeviceConfiguration },
}

enum Step {
    Next(ChangeState),
    Done(ChangeOutcome),
}

impl AudioConfigService {
    /// Changes the default device for the requested role.
    ///
    /// Runs strictly sequentially through reading, validating, applying and
    /// verifying; no step starts before the previous one completed. A
    /// verification failure triggers exactly one best-effort rollback to
    /// the pre-change snapshot. All failure modes are reported in the
    /// returned [`ChangeOutcome`]; this function does not error out early.
    pub async fn set_default_device(&self, request: &ChangeRequest) -> ChangeOutcome {
        let mut state = ChangeState::Reading;
        loop {
            match self.step(state, request).await {
                Step::Next(next) => state = next,
                Step::Done(outcome) => return outcome,
            }
        }
    }

    async fn step(&self, state: ChangeState, request: &ChangeRequest) -> Step {
        match state {
            ChangeState::Reading => self.read_snapshot().await,
            ChangeState::Validating { snapshot } => self.validate_target(snapshot, request).await,
            ChangeState::Applying { snapshot } => self.apply_change(snapshot, request).await,
            ChangeState::Verifying { snapshot } => self.verify_change(snapshot, request).await,
            ChangeState::RollingBack { snapshot } => {
                Step::Done(self.roll_back(snapshot, request).await)
            }
        }
    }

    /// Capture the rollback target before any mutation. A failure here
    /// aborts the operation; a write without a known-good prior state is
    /// never attempted.
    async fn read_snapshot(&self) -> Step {
        match self.current_configuration().await {
            Ok(snapshot) => {
                debug!(?snapshot, "captured pre-change configuration");
                Step::Next(ChangeState::Validating { snapshot })
            }
            Err(cause) => Step::Done(ChangeOutcome::Failed {
                phase: ChangePhase::Reading,
                cause,
            }),
        }
    }

    /// Syntactic validation plus an existence check: a well-formed id for
    /// a device the server does not know must fail distinctly, without
    /// attempting the write.
    async fn validate_target(&self, snapshot: DeviceConfiguration, request: &ChangeRequest) -> Step {
        if let Err(reason) = validate_device_id(&request.target) {
            return Step::Done(ChangeOutcome::Failed {
                phase: ChangePhase::Validating,
                cause: reason.into(),
            });
        }

        match self.list_devices(request.role).await {
            Ok(devices) if devices.iter().any(|d| d.id == request.target) => {
                Step::Next(ChangeState::Applying { snapshot })
            }
            Ok(_) => Step::Done(ChangeOutcome::Failed {
                phase: ChangePhase::Validating,
                cause: ConfigurationError::TargetNotFound.into(),
            }),
            Err(cause) => Step::Done(ChangeOutcome::Failed {
                phase: ChangePhase::Validating,
                cause,
            }),
        }
    }

    /// A failure here leaves nothing to roll back: the prior state was
    /// never touched. A target that vanished since validation surfaces
    /// here too, as the set-default command's own failure.
    async fn apply_change(&self, snapshot: DeviceConfiguration, request: &ChangeRequest) -> Step {
        match self.apply_default(request.role, &request.target).await {
            Ok(()) => Step::Next(ChangeState::Verifying { snapshot }),
            Err(cmd) => Step::Done(ChangeOutcome::Failed {
                phase: ChangePhase::Applying,
                cause: ConfigurationError::ApplyFailed(cmd).into(),
            }),
        }
    }

    /// The tool's exit code can lie about success, so the new state is
    /// re-read rather than trusted. Any default other than the requested
    /// one, stale or unexpected, triggers the rollback path. A re-read
    /// failure aborts without rollback: with no observable state there is
    /// nothing a blind write could safely restore.
    async fn verify_change(&self, snapshot: DeviceConfiguration, request: &ChangeRequest) -> Step {
        match self.current_configuration().await {
            Ok(current) if current.default_for(request.role) == Some(request.target.as_str()) => {
                debug!(device = %request.target, role = %request.role, "change verified");
                Step::Done(ChangeOutcome::Committed {
                    configuration: current,
                })
            }
            Ok(current) => {
                warn!(
                    ?current,
                    role = %request.role,
                    "default device did not change as requested, rolling back"
                );
                Step::Next(ChangeState::RollingBack { snapshot })
            }
            Err(cause) => Step::Done(ChangeOutcome::Failed {
                phase: ChangePhase::Verifying,
                cause,
            }),
        }
    }

    /// One best-effort attempt to restore the snapshot, then re-verify
    /// once. Unbounded retry of a mutation the tool does not fully control
    /// is unsafe, so whatever this attempt yields is terminal.
    async fn roll_back(
        &self,
        snapshot: DeviceConfiguration,
        request: &ChangeRequest,
    ) -> ChangeOutcome {
        let original = ConfigurationError::VerifyFailed;

        let Some(previous) = snapshot.default_for(request.role).map(str::to_owned) else {
            warn!(role = %request.role, "no previous default to roll back to");
            return rollback_failure(original);
        };

        if let Err(cmd) = self.apply_default(request.role, &previous).await {
            warn!(role = %request.role, error = %cmd, "rollback command failed");
            return rollback_failure(original);
        }

        match self.current_configuration().await {
            Ok(restored) if restored.default_for(request.role) == Some(previous.as_str()) => {
                ChangeOutcome::RolledBack {
                    restored,
                    cause: original.into(),
                }
            }
            Ok(_) => rollback_failure(original),
            Err(read_err) => {
                warn!(error = %read_err, "could not re-read state after rollback");
                rollback_failure(original)
            }
        }
    }
}

fn rollback_failure(original: ConfigurationError) -> ChangeOutcome {
    ChangeOutcome::Failed {
        phase: ChangePhase::RollingBack,
        cause: ConfigurationError::RollbackFailed {
            original: Box::new(original),
        }
        .into(),
    }
}
