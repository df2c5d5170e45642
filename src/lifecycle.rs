//! Cluster lifecycle conditions.
//!
//! A cluster moves through `Creating -> Created -> Updating -> Updated ->
//! Updating -> ...`, recording each transition at the head of its status
//! history. Only the head matters for admission, so the history is held as an
//! immutable snapshot read once per validation.

use jiff::Timestamp;

use crate::crd::ClusterStatusCondition;

/// Kind of a lifecycle condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Creating,
    Created,
    Updating,
    Updated,
    Deleting,
    /// A kind this crate does not know about, kept verbatim.
    Unknown(String),
}

impl ConditionKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "Creating" => ConditionKind::Creating,
            "Created" => ConditionKind::Created,
            "Updating" => ConditionKind::Updating,
            "Updated" => ConditionKind::Updated,
            "Deleting" => ConditionKind::Deleting,
            other => ConditionKind::Unknown(other.to_string()),
        }
    }

    /// Whether the cluster is in the middle of a transition.
    ///
    /// Unknown kinds are not transient: only kinds known to mean "work in
    /// progress" block a new release change.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ConditionKind::Creating | ConditionKind::Updating | ConditionKind::Deleting
        )
    }
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionKind::Creating => write!(f, "Creating"),
            ConditionKind::Created => write!(f, "Created"),
            ConditionKind::Updating => write!(f, "Updating"),
            ConditionKind::Updated => write!(f, "Updated"),
            ConditionKind::Deleting => write!(f, "Deleting"),
            ConditionKind::Unknown(kind) => write!(f, "{}", kind),
        }
    }
}

/// One entry of a cluster's lifecycle history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleCondition {
    pub kind: ConditionKind,
    /// `None` when the stored timestamp is missing or unparseable.
    pub last_transition_time: Option<Timestamp>,
}

impl LifecycleCondition {
    pub fn new(kind: ConditionKind, last_transition_time: Option<Timestamp>) -> Self {
        Self {
            kind,
            last_transition_time,
        }
    }
}

impl From<&ClusterStatusCondition> for LifecycleCondition {
    fn from(condition: &ClusterStatusCondition) -> Self {
        let last_transition_time = condition
            .last_transition_time
            .as_deref()
            .and_then(|t| t.parse::<Timestamp>().ok());
        Self::new(ConditionKind::parse(&condition.condition), last_transition_time)
    }
}

/// Lifecycle history of a cluster, most recent transition first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionHistory {
    conditions: Vec<LifecycleCondition>,
}

impl ConditionHistory {
    /// Wrap a history that is already ordered most-recent-first.
    pub fn new(conditions: Vec<LifecycleCondition>) -> Self {
        Self { conditions }
    }

    /// The most recent transition, if any was recorded.
    pub fn latest(&self) -> Option<&LifecycleCondition> {
        self.conditions.first()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LifecycleCondition> {
        self.conditions.iter()
    }

    /// Whether timestamps never increase from head to tail.
    ///
    /// Entries without a timestamp are skipped.
    pub fn is_most_recent_first(&self) -> bool {
        let stamps: Vec<Timestamp> = self
            .conditions
            .iter()
            .filter_map(|c| c.last_transition_time)
            .collect();
        stamps.windows(2).all(|w| match w {
            [newer, older] => newer >= older,
            _ => true,
        })
    }
}

impl From<Vec<LifecycleCondition>> for ConditionHistory {
    fn from(conditions: Vec<LifecycleCondition>) -> Self {
        Self::new(conditions)
    }
}

impl FromIterator<LifecycleCondition> for ConditionHistory {
    fn from_iter<I: IntoIterator<Item = LifecycleCondition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
