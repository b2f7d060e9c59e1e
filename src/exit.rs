//! # Exit status translation.
//!
//! Maps a backend [`PodSnapshot`] to a normalized [`ExitStatus`].
//!
//! ```text
//! first container terminated?
//!   ├─ no  ─────────────────────────► ExitStatus { code: 1,   oom_killed: false }
//!   └─ yes ─► exit_code == 137 ? ───► ExitStatus { code: 137, oom_killed: true  }
//!                          else ────► ExitStatus { code: exit_code as u32, oom_killed: false }
//! ```
//!
//! 137 is 128 + SIGKILL. Backends do not reliably flag out-of-memory kills,
//! so the code convention is the signal.

use crate::backend::PodSnapshot;

/// Exit code conventionally produced by a kill for exceeding a resource limit.
pub const OOM_EXIT_CODE: i32 = 137;

/// Exit code assumed when there is no termination data to read.
pub const UNKNOWN_EXIT_CODE: u32 = 1;

/// Normalized exit outcome of a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    /// Exit code widened to `u32`.
    pub code: u32,
    /// `true` if the workload was killed for exceeding its memory limit.
    pub oom_killed: bool,
}

impl ExitStatus {
    /// The "unknown, likely failed, not OOM" outcome.
    pub const UNKNOWN: ExitStatus = ExitStatus {
        code: UNKNOWN_EXIT_CODE,
        oom_killed: false,
    };
}

/// Translates the backend's termination report into an [`ExitStatus`].
///
/// # Example
/// ```
/// use podvisor::{ContainerState, Phase, PodSnapshot, Terminated, exit};
///
/// let pod = PodSnapshot::new("srv", Phase::Failed)
///     .with_container("main", ContainerState::Terminated(Terminated::with_code(137)));
/// let st = exit::translate(&pod);
/// assert_eq!((st.code, st.oom_killed), (137, true));
/// ```
pub fn translate(pod: &PodSnapshot) -> ExitStatus {
    match pod.first_terminated() {
        None => ExitStatus::UNKNOWN,
        Some(t) if t.exit_code == OOM_EXIT_CODE => ExitStatus {
            code: OOM_EXIT_CODE as u32,
            oom_killed: true,
        },
        Some(t) => ExitStatus {
            // Two's complement reinterpretation, matching an unsigned widening of the raw code.
            code: t.exit_code as u32,
            oom_killed: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ContainerState, Phase, Terminated};

    fn terminated(code: i32) -> PodSnapshot {
        PodSnapshot::new("srv", Phase::Failed)
            .with_container("main", ContainerState::Terminated(Terminated::with_code(code)))
    }

    #[test]
    fn test_oom_code_sets_flag() {
        assert_eq!(
            translate(&terminated(137)),
            ExitStatus {
                code: 137,
                oom_killed: true
            }
        );
    }

    #[test]
    fn test_clean_exit() {
        assert_eq!(
            translate(&terminated(0)),
            ExitStatus {
                code: 0,
                oom_killed: false
            }
        );
    }

    #[test]
    fn test_other_codes_pass_through() {
        let st = translate(&terminated(143));
        assert_eq!(st.code, 143);
        assert!(!st.oom_killed);
    }

    #[test]
    fn test_negative_code_is_widened() {
        assert_eq!(translate(&terminated(-1)).code, u32::MAX);
    }

    #[test]
    fn test_still_running_is_unknown() {
        let pod = PodSnapshot::new("srv", Phase::Running).with_container("main", ContainerState::Running);
        assert_eq!(translate(&pod), ExitStatus::UNKNOWN);
    }

    #[test]
    fn test_waiting_container_is_unknown() {
        let pod = PodSnapshot::new("srv", Phase::Pending)
            .with_container(
                "main",
                ContainerState::Waiting {
                    reason: Some("ContainerCreating".into()),
                },
            )
            .with_container("sidecar", ContainerState::Terminated(Terminated::with_code(137)));
        assert_eq!(translate(&pod), ExitStatus::UNKNOWN);
    }

    #[test]
    fn test_no_container_statuses_is_unknown() {
        let pod = PodSnapshot::new("srv", Phase::Unknown);
        assert_eq!(translate(&pod), ExitStatus::UNKNOWN);
    }

    #[test]
    fn test_oom_reason_without_code_is_not_inferred() {
        let pod = PodSnapshot::new("srv", Phase::Failed).with_container(
            "main",
            ContainerState::Terminated(Terminated {
                exit_code: 1,
                signal: None,
                reason: Some("OOMKilled".into()),
            }),
        );
        assert_eq!(
            translate(&pod),
            ExitStatus {
                code: 1,
                oom_killed: false
            }
        );
    }
}
