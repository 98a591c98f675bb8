//! Ordered activity store contract and in-memory implementation.
//!
//! # Responsibility
//! - Keep the caller's activity sequence in its load-bearing order.
//! - Provide insert, edit, remove, and reorder primitives by stable id.
//!
//! # Invariants
//! - Ids are unique within one store.
//! - Reordering never changes an activity's id or fields.

use crate::model::activity::{Activity, ActivityId, ActivityValidationError};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failures for activity sequence mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(ActivityValidationError),
    NotFound(ActivityId),
    DuplicateId(ActivityId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "activity not found: {id}"),
            Self::DuplicateId(id) => write!(f, "activity id already present: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<ActivityValidationError> for StoreError {
    fn from(value: ActivityValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Ordered sequence of activities addressed by stable id.
pub trait ActivityRepository {
    /// Appends one activity to the end of the sequence.
    fn insert(&mut self, activity: Activity) -> StoreResult<ActivityId>;
    /// Replaces the activity with the same id, keeping its position.
    fn update(&mut self, activity: Activity) -> StoreResult<()>;
    /// Removes one activity and returns it.
    fn remove(&mut self, id: ActivityId) -> StoreResult<Activity>;
    /// Moves one activity to `target_index`, clamped to the sequence bounds.
    ///
    /// Returns the index the activity ended up at.
    fn move_to(&mut self, id: ActivityId, target_index: usize) -> StoreResult<usize>;
    fn get(&self, id: ActivityId) -> Option<&Activity>;
    fn position(&self, id: ActivityId) -> Option<usize>;
    /// Current sequence, in order.
    fn list(&self) -> &[Activity];

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

/// Vec-backed store for one editing session.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityRepository {
    activities: Vec<Activity>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an existing sequence, validating every record.
    pub fn try_from_activities(activities: Vec<Activity>) -> StoreResult<Self> {
        let mut repo = Self::new();
        for activity in activities {
            repo.insert(activity)?;
        }
        Ok(repo)
    }

    fn require_position(&self, id: ActivityId) -> StoreResult<usize> {
        self.position(id).ok_or(StoreError::NotFound(id))
    }
}

impl ActivityRepository for InMemoryActivityRepository {
    fn insert(&mut self, activity: Activity) -> StoreResult<ActivityId> {
        activity.validate()?;
        if self.position(activity.id).is_some() {
            return Err(StoreError::DuplicateId(activity.id));
        }

        let id = activity.id;
        self.activities.push(activity);
        debug!(
            "event=activity_insert module=store status=ok id={} len={}",
            id,
            self.activities.len()
        );
        Ok(id)
    }

    fn update(&mut self, activity: Activity) -> StoreResult<()> {
        activity.validate()?;
        let index = self.require_position(activity.id)?;
        debug!(
            "event=activity_update module=store status=ok id={} index={}",
            activity.id, index
        );
        self.activities[index] = activity;
        Ok(())
    }

    fn remove(&mut self, id: ActivityId) -> StoreResult<Activity> {
        let index = self.require_position(id)?;
        let removed = self.activities.remove(index);
        debug!(
            "event=activity_remove module=store status=ok id={} index={} len={}",
            id,
            index,
            self.activities.len()
        );
        Ok(removed)
    }

    fn move_to(&mut self, id: ActivityId, target_index: usize) -> StoreResult<usize> {
        let from = self.require_position(id)?;
        let activity = self.activities.remove(from);
        let to = target_index.min(self.activities.len());
        self.activities.insert(to, activity);
        debug!(
            "event=activity_move module=store status=ok id={} from={} to={}",
            id, from, to
        );
        Ok(to)
    }

    fn get(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    fn position(&self, id: ActivityId) -> Option<usize> {
        self.activities.iter().position(|activity| activity.id == id)
    }

    fn list(&self) -> &[Activity] {
        &self.activities
    }
}
