//! Sequential start-offset resolution.
//!
//! # Invariants
//! - `start_offsets[0] == 0` for a non-empty sequence.
//! - Activity `i` only consults activity `i - 1`; there is no graph.
//! - `total_duration == 0` iff the sequence is empty.

use crate::model::activity::{Activity, DependencyType};
use serde::Serialize;

/// Start offsets and overall span of one plan sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// Whole days from the project start, one per activity, in order.
    pub start_offsets: Vec<u32>,
    /// Exclusive end offsets, `start_offsets[i] + duration[i]`.
    pub end_offsets: Vec<u32>,
    /// Latest exclusive end offset over all activities.
    pub total_duration: u32,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.start_offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start_offsets.is_empty()
    }

    pub fn start_of(&self, index: usize) -> Option<u32> {
        self.start_offsets.get(index).copied()
    }

    /// First day offset after activity `index` has finished.
    pub fn end_of(&self, index: usize) -> Option<u32> {
        self.end_offsets.get(index).copied()
    }
}

/// Resolves each activity's start offset from its predecessor.
pub fn compute_schedule(sequence: &[Activity]) -> Schedule {
    let mut start_offsets = Vec::with_capacity(sequence.len());
    let mut end_offsets = Vec::with_capacity(sequence.len());
    let mut previous: Option<(u32, u32)> = None;

    for activity in sequence {
        let start = match previous {
            None => 0,
            Some((prev_start, prev_duration)) => match activity.dependency {
                DependencyType::StartToStart => prev_start,
                DependencyType::FinishToStart => prev_start.saturating_add(prev_duration),
            },
        };
        start_offsets.push(start);
        end_offsets.push(start.saturating_add(activity.duration));
        previous = Some((start, activity.duration));
    }

    let total_duration = end_offsets.iter().copied().max().unwrap_or(0);

    Schedule {
        start_offsets,
        end_offsets,
        total_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::compute_schedule;
    use crate::model::activity::{Activity, DependencyType};
    use uuid::Uuid;

    fn activity(duration: u32, dependency: DependencyType) -> Activity {
        Activity::with_id(Uuid::new_v4(), "step", duration, dependency).unwrap()
    }

    #[test]
    fn empty_sequence_has_zero_total() {
        let schedule = compute_schedule(&[]);
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_duration, 0);
    }

    #[test]
    fn first_activity_ignores_its_own_dependency_tag() {
        let schedule = compute_schedule(&[activity(4, DependencyType::StartToStart)]);
        assert_eq!(schedule.start_offsets, vec![0]);
        assert_eq!(schedule.total_duration, 4);
    }

    #[test]
    fn longer_start_to_start_follower_extends_total() {
        let schedule = compute_schedule(&[
            activity(2, DependencyType::FinishToStart),
            activity(9, DependencyType::StartToStart),
            activity(1, DependencyType::FinishToStart),
        ]);
        // The FS follower chains off its direct predecessor only.
        assert_eq!(schedule.start_offsets, vec![0, 0, 9]);
        assert_eq!(schedule.total_duration, 10);
    }

    #[test]
    fn start_and_end_offsets_bracket_each_activity() {
        let schedule = compute_schedule(&[
            activity(5, DependencyType::FinishToStart),
            activity(3, DependencyType::StartToStart),
            activity(2, DependencyType::FinishToStart),
        ]);
        assert_eq!(schedule.start_of(1), Some(0));
        assert_eq!(schedule.end_of(1), Some(3));
        assert_eq!(schedule.start_of(2), Some(3));
        assert_eq!(schedule.end_of(2), Some(5));
        // SS follower ends before its predecessor; the total tracks the latest end.
        assert_eq!(schedule.end_of(0), Some(schedule.total_duration));
        assert_eq!(schedule.start_of(3), None);
        assert_eq!(schedule.end_of(3), None);
    }
}
