//! Diary completion phase state machine.
//!
//! Tracks where a diary record stands in the guided completion flow.
//! The phase is fully determined by the record's facts (missing segments
//! and the reflective answer), so it is recomputed rather than stored
//! authority; the state machine guards against transitions the facts can
//! never produce.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The completion phase of a diary record.
///
/// - `CollectingInfo`: at least one time-of-day segment is still empty
/// - `AskingReflectiveQuestion`: all segments filled, answer pending
/// - `Complete`: all segments filled and the reflective question answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiaryPhase {
    /// Gathering time-of-day content from the user.
    #[default]
    CollectingInfo,

    /// All segments filled; awaiting the reflective answer.
    #[serde(rename = "asking_question")]
    AskingReflectiveQuestion,

    /// Segments and reflective answer complete; eligible for analysis.
    Complete,
}

impl DiaryPhase {
    /// Derives the phase implied by the record's facts.
    pub fn derived(all_segments_filled: bool, reflective_answered: bool) -> Self {
        if !all_segments_filled {
            DiaryPhase::CollectingInfo
        } else if !reflective_answered {
            DiaryPhase::AskingReflectiveQuestion
        } else {
            DiaryPhase::Complete
        }
    }

    /// Returns true if a pending question is meaningful in this phase.
    pub fn carries_question(&self) -> bool {
        matches!(
            self,
            DiaryPhase::CollectingInfo | DiaryPhase::AskingReflectiveQuestion
        )
    }

    /// Returns true if the reflective answer may be supplied now.
    pub fn expects_reflective_answer(&self) -> bool {
        matches!(self, DiaryPhase::AskingReflectiveQuestion)
    }

    /// Returns true if the record is eligible for analysis.
    pub fn is_complete(&self) -> bool {
        matches!(self, DiaryPhase::Complete)
    }
}

impl StateMachine for DiaryPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DiaryPhase::*;
        matches!(
            (self, target),
            // Last segment filled
            (CollectingInfo, AskingReflectiveQuestion) |
            // Last segment filled while the answer was already given
            // (possible after an edit emptied a segment post-answer)
            (CollectingInfo, Complete) |
            // Reflective answer supplied
            (AskingReflectiveQuestion, Complete) |
            // An edit emptied a segment
            (AskingReflectiveQuestion, CollectingInfo) |
            // An edit emptied a segment after completion
            (Complete, CollectingInfo)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DiaryPhase::*;
        match self {
            CollectingInfo => vec![AskingReflectiveQuestion, Complete],
            AskingReflectiveQuestion => vec![Complete, CollectingInfo],
            Complete => vec![CollectingInfo],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod phase_basics {
        use super::*;

        #[test]
        fn default_phase_is_collecting_info() {
            assert_eq!(DiaryPhase::default(), DiaryPhase::CollectingInfo);
        }

        #[test]
        fn serializes_to_wire_strings() {
            assert_eq!(
                serde_json::to_string(&DiaryPhase::CollectingInfo).unwrap(),
                "\"collecting_info\""
            );
            assert_eq!(
                serde_json::to_string(&DiaryPhase::AskingReflectiveQuestion).unwrap(),
                "\"asking_question\""
            );
            assert_eq!(
                serde_json::to_string(&DiaryPhase::Complete).unwrap(),
                "\"complete\""
            );
        }

        #[test]
        fn deserializes_from_wire_strings() {
            let phase: DiaryPhase = serde_json::from_str("\"asking_question\"").unwrap();
            assert_eq!(phase, DiaryPhase::AskingReflectiveQuestion);
        }
    }

    mod derived {
        use super::*;

        #[test]
        fn missing_segments_mean_collecting_info() {
            assert_eq!(
                DiaryPhase::derived(false, false),
                DiaryPhase::CollectingInfo
            );
            // Reflective answer does not override missing segments
            assert_eq!(DiaryPhase::derived(false, true), DiaryPhase::CollectingInfo);
        }

        #[test]
        fn filled_without_answer_means_asking() {
            assert_eq!(
                DiaryPhase::derived(true, false),
                DiaryPhase::AskingReflectiveQuestion
            );
        }

        #[test]
        fn filled_with_answer_means_complete() {
            assert_eq!(DiaryPhase::derived(true, true), DiaryPhase::Complete);
        }
    }

    mod phase_queries {
        use super::*;

        #[test]
        fn collecting_and_asking_carry_questions() {
            assert!(DiaryPhase::CollectingInfo.carries_question());
            assert!(DiaryPhase::AskingReflectiveQuestion.carries_question());
            assert!(!DiaryPhase::Complete.carries_question());
        }

        #[test]
        fn only_asking_expects_reflective_answer() {
            assert!(!DiaryPhase::CollectingInfo.expects_reflective_answer());
            assert!(DiaryPhase::AskingReflectiveQuestion.expects_reflective_answer());
            assert!(!DiaryPhase::Complete.expects_reflective_answer());
        }

        #[test]
        fn only_complete_is_complete() {
            assert!(DiaryPhase::Complete.is_complete());
            assert!(!DiaryPhase::CollectingInfo.is_complete());
        }
    }

    mod state_machine_trait {
        use super::*;

        #[test]
        fn collecting_transitions_to_asking() {
            assert!(DiaryPhase::CollectingInfo
                .can_transition_to(&DiaryPhase::AskingReflectiveQuestion));
        }

        #[test]
        fn collecting_can_jump_to_complete_after_reopened_edit() {
            assert!(DiaryPhase::CollectingInfo.can_transition_to(&DiaryPhase::Complete));
        }

        #[test]
        fn asking_transitions_to_complete() {
            assert!(
                DiaryPhase::AskingReflectiveQuestion.can_transition_to(&DiaryPhase::Complete)
            );
        }

        #[test]
        fn asking_reopens_to_collecting() {
            assert!(DiaryPhase::AskingReflectiveQuestion
                .can_transition_to(&DiaryPhase::CollectingInfo));
        }

        #[test]
        fn complete_reopens_only_to_collecting() {
            assert!(DiaryPhase::Complete.can_transition_to(&DiaryPhase::CollectingInfo));
            assert!(!DiaryPhase::Complete
                .can_transition_to(&DiaryPhase::AskingReflectiveQuestion));
            // Re-entrant by design, so not terminal
            assert!(!DiaryPhase::Complete.is_terminal());
        }

        #[test]
        fn asking_cannot_be_reached_from_complete_directly() {
            // Emptying a segment always passes through CollectingInfo first
            assert_eq!(
                DiaryPhase::Complete.valid_transitions(),
                vec![DiaryPhase::CollectingInfo]
            );
        }

        #[test]
        fn transition_to_rejects_invalid_target() {
            let result = DiaryPhase::Complete
                .transition_to(DiaryPhase::AskingReflectiveQuestion);
            assert!(result.is_err());
        }

        #[test]
        fn valid_transitions_matches_can_transition_to() {
            for phase in [
                DiaryPhase::CollectingInfo,
                DiaryPhase::AskingReflectiveQuestion,
                DiaryPhase::Complete,
            ] {
                for target in phase.valid_transitions() {
                    assert!(
                        phase.can_transition_to(&target),
                        "can_transition_to should return true for {:?} -> {:?}",
                        phase,
                        target
                    );
                }
            }
        }
    }
}
