//! Action compatibility table.
//!
//! Each event kind declares the closed set of actions it permits, the
//! actions that demand an end time, and optional constraints on the types of
//! its `object` and `generated` entities. The standard table is built once
//! on first use and is never mutated afterwards; validators receive it by
//! reference.
//!
//! ```rust
//! use caliper::{Action, ActionTable, EventType};
//!
//! let table = ActionTable::standard();
//! assert!(table.supports(EventType::Message, Action::Posted));
//! assert!(!table.supports(EventType::Search, Action::NavigatedTo));
//! ```

use lazy_static::lazy_static;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::{Action, EntityType, EventType};

/// Conformance profile of a single event kind.
#[derive(Debug, Clone, PartialEq)]
pub struct EventProfile {
    event_type: EventType,
    actions: FxHashSet<Action>,
    end_time_required: FxHashSet<Action>,
    object_types: Option<Vec<EntityType>>,
    generated_types: Option<Vec<EntityType>>,
    start_time_required: bool,
}

impl EventProfile {
    /// Creates a profile permitting `actions`. Start times are mandatory by
    /// default; objects and generated entities are unconstrained.
    pub fn new(event_type: EventType, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            event_type,
            actions: actions.into_iter().collect(),
            end_time_required: FxHashSet::default(),
            object_types: None,
            generated_types: None,
            start_time_required: true,
        }
    }

    /// Requires `endedAtTime` when the event carries one of `actions`.
    pub fn require_end_time_for(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.end_time_required.extend(actions);
        self
    }

    /// Restricts the object to entities of (subtypes of) `types`.
    pub fn object_types(mut self, types: impl IntoIterator<Item = EntityType>) -> Self {
        self.object_types = Some(types.into_iter().collect());
        self
    }

    /// Restricts the generated entity to (subtypes of) `types`.
    pub fn generated_types(mut self, types: impl IntoIterator<Item = EntityType>) -> Self {
        self.generated_types = Some(types.into_iter().collect());
        self
    }

    /// Makes `startedAtTime` optional for this kind.
    pub fn start_time_optional(mut self) -> Self {
        self.start_time_required = false;
        self
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Returns true if `action` is permitted.
    pub fn supports(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// Permitted actions in vocabulary order.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.actions.iter().copied().collect();
        actions.sort();
        actions
    }

    /// Returns true if `action` requires an end time.
    pub fn requires_end_time(&self, action: Action) -> bool {
        self.end_time_required.contains(&action)
    }

    pub fn start_time_required(&self) -> bool {
        self.start_time_required
    }

    /// Permitted object types, if constrained.
    pub fn permitted_object_types(&self) -> Option<&[EntityType]> {
        self.object_types.as_deref()
    }

    /// Permitted generated types, if constrained.
    pub fn permitted_generated_types(&self) -> Option<&[EntityType]> {
        self.generated_types.as_deref()
    }

    /// Returns true if an object of type `t` is acceptable.
    pub fn permits_object(&self, t: EntityType) -> bool {
        permits(self.object_types.as_deref(), t)
    }

    /// Returns true if a generated entity of type `t` is acceptable.
    pub fn permits_generated(&self, t: EntityType) -> bool {
        permits(self.generated_types.as_deref(), t)
    }
}

fn permits(allowed: Option<&[EntityType]>, t: EntityType) -> bool {
    match allowed {
        None => true,
        Some(types) => types.iter().any(|allowed| t.is_a(*allowed)),
    }
}

/// Per-kind profiles, keyed by event type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionTable {
    profiles: FxHashMap<EventType, EventProfile>,
}

lazy_static! {
    static ref STANDARD_TABLE: ActionTable = standard_table();
}

impl ActionTable {
    /// Returns the process-wide standard table.
    pub fn standard() -> &'static ActionTable {
        &STANDARD_TABLE
    }

    /// Starts an empty table.
    pub fn builder() -> ActionTableBuilder {
        ActionTableBuilder::default()
    }

    /// Returns the profile registered for `event_type`.
    pub fn profile(&self, event_type: EventType) -> Option<&EventProfile> {
        self.profiles.get(&event_type)
    }

    /// Returns true if `event_type` permits `action`. Kinds without a
    /// profile permit nothing.
    pub fn supports(&self, event_type: EventType, action: Action) -> bool {
        self.profile(event_type)
            .is_some_and(|profile| profile.supports(action))
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Copies this table into a builder for extension.
    pub fn to_builder(&self) -> ActionTableBuilder {
        ActionTableBuilder {
            profiles: self.profiles.clone(),
        }
    }
}

/// Builder for an [`ActionTable`].
#[derive(Debug, Clone, Default)]
pub struct ActionTableBuilder {
    profiles: FxHashMap<EventType, EventProfile>,
}

impl ActionTableBuilder {
    /// Registers a profile, replacing any previous one for the same kind.
    pub fn profile(mut self, profile: EventProfile) -> Self {
        self.profiles.insert(profile.event_type, profile);
        self
    }

    pub fn build(self) -> ActionTable {
        ActionTable {
            profiles: self.profiles,
        }
    }
}

/// Builds the standard Caliper profiles.
fn standard_table() -> ActionTable {
    use Action::*;

    ActionTable::builder()
        .profile(EventProfile::new(EventType::Event, Action::ALL))
        .profile(EventProfile::new(
            EventType::Annotation,
            [Bookmarked, Highlighted, Shared, Tagged],
        ))
        .profile(EventProfile::new(
            EventType::Assessment,
            [Started, Paused, Resumed, Restarted, Reset, Submitted],
        ))
        .profile(EventProfile::new(
            EventType::AssessmentItem,
            [Started, Skipped, Completed],
        ))
        .profile(EventProfile::new(
            EventType::Assignable,
            [Activated, Deactivated, Started, Completed, Submitted, Reviewed],
        ))
        .profile(
            EventProfile::new(EventType::Forum, [Subscribed, Unsubscribed])
                .object_types([EntityType::Forum]),
        )
        .profile(EventProfile::new(EventType::Grade, [Graded]))
        .profile(EventProfile::new(
            EventType::Media,
            [
                Started,
                Ended,
                Paused,
                Resumed,
                Restarted,
                ForwardedTo,
                JumpedTo,
                ChangedResolution,
                ChangedSize,
                ChangedSpeed,
                ChangedVolume,
                EnabledClosedCaptioning,
                DisabledClosedCaptioning,
                EnteredFullScreen,
                ExitedFullScreen,
                Muted,
                Unmuted,
                OpenedPopout,
                ClosedPopout,
            ],
        ))
        .profile(
            EventProfile::new(EventType::Message, [MarkedAsRead, MarkedAsUnread, Posted])
                .object_types([EntityType::Message]),
        )
        .profile(EventProfile::new(EventType::Navigation, [NavigatedTo]))
        .profile(
            EventProfile::new(EventType::Search, [Searched])
                .generated_types([EntityType::SearchResponse]),
        )
        .profile(
            EventProfile::new(EventType::Session, [LoggedIn, LoggedOut, TimedOut])
                .require_end_time_for([LoggedOut, TimedOut])
                .object_types([EntityType::SoftwareApplication, EntityType::Session])
                .generated_types([EntityType::Session]),
        )
        .profile(
            EventProfile::new(EventType::Thread, [MarkedAsRead, MarkedAsUnread])
                .object_types([EntityType::Thread]),
        )
        .profile(EventProfile::new(EventType::ToolUse, [Used]))
        .profile(EventProfile::new(EventType::View, [Viewed]))
        .build()
}
