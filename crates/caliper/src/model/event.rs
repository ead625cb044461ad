//! Events and the event builder.
//!
//! An [`Event`] records that an agent performed an action on an object at a
//! point in time. Every event kind is built through [`EventBuilder`], whose
//! kind is fixed when it is created.
//!
//! ```rust
//! use caliper::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let user = AgentBuilder::person()
//!     .id("https://example.edu/users/554433")
//!     .build()
//!     .unwrap();
//! let reading = DigitalResourceBuilder::reading()
//!     .id("https://example.edu/etexts/201.epub")
//!     .build()
//!     .unwrap();
//!
//! let event = EventBuilder::view_event()
//!     .actor(user)
//!     .action(Action::Viewed)
//!     .object(reading)
//!     .started_at_time(Utc.with_ymd_and_hms(2016, 11, 15, 10, 15, 0).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(event.event_type(), EventType::View);
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ConformanceError;
use crate::model::{Action, Entity, EventType, ExtensionValue, Extensions, JsonldContext};
use crate::profile::ActionTable;
use crate::validate::{EntityValidator, EventValidator};

/// An immutable, validated event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    context: JsonldContext,
    id: Option<String>,
    event_type: EventType,
    actor: Arc<Entity>,
    action: Action,
    object: Arc<Entity>,
    target: Option<Arc<Entity>>,
    generated: Option<Arc<Entity>>,
    started_at_time: Option<DateTime<Utc>>,
    ended_at_time: Option<DateTime<Utc>>,
    duration: Option<String>,
    ed_app: Option<Arc<Entity>>,
    group: Option<Arc<Entity>>,
    membership: Option<Arc<Entity>>,
    session: Option<Arc<Entity>>,
    extensions: Extensions,
}

impl Event {
    /// The JSON-LD context the event declares.
    pub fn context(&self) -> &JsonldContext {
        &self.context
    }

    /// The event IRI, if one was assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The event kind.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// The agent who performed the action.
    pub fn actor(&self) -> &Arc<Entity> {
        &self.actor
    }

    /// The action performed.
    pub fn action(&self) -> Action {
        self.action
    }

    /// The entity the action was performed on.
    pub fn object(&self) -> &Arc<Entity> {
        &self.object
    }

    /// A segment or location within the object.
    pub fn target(&self) -> Option<&Arc<Entity>> {
        self.target.as_ref()
    }

    /// The entity produced by the action.
    pub fn generated(&self) -> Option<&Arc<Entity>> {
        self.generated.as_ref()
    }

    /// When the activity started.
    pub fn started_at_time(&self) -> Option<DateTime<Utc>> {
        self.started_at_time
    }

    /// When the activity ended.
    pub fn ended_at_time(&self) -> Option<DateTime<Utc>> {
        self.ended_at_time
    }

    /// ISO 8601 period.
    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    /// The software application in which the event occurred.
    pub fn ed_app(&self) -> Option<&Arc<Entity>> {
        self.ed_app.as_ref()
    }

    /// The organization (usually a course section) providing context.
    pub fn group(&self) -> Option<&Arc<Entity>> {
        self.group.as_ref()
    }

    /// The actor's membership in the group.
    pub fn membership(&self) -> Option<&Arc<Entity>> {
        self.membership.as_ref()
    }

    /// The session in which the event occurred.
    pub fn session(&self) -> Option<&Arc<Entity>> {
        self.session.as_ref()
    }

    /// Additional properties outside the Caliper vocabulary.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}

/// Builder for every event kind.
///
/// The kind is fixed by the constructor. `actor`, `action` and `object` are
/// required; `build()` rejects the event when one is missing.
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event_type: EventType,
    context: JsonldContext,
    id: Option<String>,
    actor: Option<Arc<Entity>>,
    action: Option<Action>,
    object: Option<Arc<Entity>>,
    target: Option<Arc<Entity>>,
    generated: Option<Arc<Entity>>,
    started_at_time: Option<DateTime<Utc>>,
    ended_at_time: Option<DateTime<Utc>>,
    duration: Option<String>,
    ed_app: Option<Arc<Entity>>,
    group: Option<Arc<Entity>>,
    membership: Option<Arc<Entity>>,
    session: Option<Arc<Entity>>,
    extensions: Extensions,
}

impl EventBuilder {
    /// Creates a builder for events of kind `event_type`.
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            context: JsonldContext::default(),
            id: None,
            actor: None,
            action: None,
            object: None,
            target: None,
            generated: None,
            started_at_time: None,
            ended_at_time: None,
            duration: None,
            ed_app: None,
            group: None,
            membership: None,
            session: None,
            extensions: Extensions::new(),
        }
    }

    /// Generic Event, accepting every action.
    pub fn generic() -> Self {
        Self::new(EventType::Event)
    }

    /// Builder for a `AnnotationEvent`.
    pub fn annotation_event() -> Self {
        Self::new(EventType::Annotation)
    }

    /// Builder for a `AssessmentEvent`.
    pub fn assessment_event() -> Self {
        Self::new(EventType::Assessment)
    }

    /// Builder for a `AssessmentItemEvent`.
    pub fn assessment_item_event() -> Self {
        Self::new(EventType::AssessmentItem)
    }

    /// Builder for a `AssignableEvent`.
    pub fn assignable_event() -> Self {
        Self::new(EventType::Assignable)
    }

    /// Builder for a `ForumEvent`.
    pub fn forum_event() -> Self {
        Self::new(EventType::Forum)
    }

    /// Builder for a `GradeEvent`.
    pub fn grade_event() -> Self {
        Self::new(EventType::Grade)
    }

    /// Builder for a `MediaEvent`.
    pub fn media_event() -> Self {
        Self::new(EventType::Media)
    }

    /// Builder for a `MessageEvent`.
    pub fn message_event() -> Self {
        Self::new(EventType::Message)
    }

    /// Builder for a `NavigationEvent`.
    pub fn navigation_event() -> Self {
        Self::new(EventType::Navigation)
    }

    /// Builder for a `SearchEvent`.
    pub fn search_event() -> Self {
        Self::new(EventType::Search)
    }

    /// Builder for a `SessionEvent`.
    pub fn session_event() -> Self {
        Self::new(EventType::Session)
    }

    /// Builder for a `ThreadEvent`.
    pub fn thread_event() -> Self {
        Self::new(EventType::Thread)
    }

    /// Builder for a `ToolUseEvent`.
    pub fn tool_use_event() -> Self {
        Self::new(EventType::ToolUse)
    }

    /// Builder for a `ViewEvent`.
    pub fn view_event() -> Self {
        Self::new(EventType::View)
    }

    /// Overrides the JSON-LD context (defaults to Caliper 1.2).
    pub fn context(mut self, context: JsonldContext) -> Self {
        self.context = context;
        self
    }

    /// Sets the event IRI.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Assigns a fresh `urn:uuid:` IRI.
    pub fn generate_id(mut self) -> Self {
        self.id = Some(format!("urn:uuid:{}", Uuid::new_v4()));
        self
    }

    /// Sets the agent who performed the action.
    pub fn actor(mut self, actor: impl Into<Arc<Entity>>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Sets the action.
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets the entity acted on.
    pub fn object(mut self, object: impl Into<Arc<Entity>>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Sets the segment or location within the object.
    pub fn target(mut self, target: impl Into<Arc<Entity>>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Sets the entity produced by the action.
    pub fn generated(mut self, generated: impl Into<Arc<Entity>>) -> Self {
        self.generated = Some(generated.into());
        self
    }

    /// Sets the start time.
    pub fn started_at_time(mut self, at: DateTime<Utc>) -> Self {
        self.started_at_time = Some(at);
        self
    }

    /// Sets the end time.
    pub fn ended_at_time(mut self, at: DateTime<Utc>) -> Self {
        self.ended_at_time = Some(at);
        self
    }

    /// Sets the ISO 8601 duration (e.g. "PT3000S").
    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Sets the software application in which the event occurred.
    pub fn ed_app(mut self, ed_app: impl Into<Arc<Entity>>) -> Self {
        self.ed_app = Some(ed_app.into());
        self
    }

    /// Sets the organization providing context.
    pub fn group(mut self, group: impl Into<Arc<Entity>>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the actor's membership in the group.
    pub fn membership(mut self, membership: impl Into<Arc<Entity>>) -> Self {
        self.membership = Some(membership.into());
        self
    }

    /// Sets the session in which the event occurred.
    pub fn session(mut self, session: impl Into<Arc<Entity>>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Adds a single extension property.
    pub fn extension(mut self, key: impl Into<String>, value: impl Into<ExtensionValue>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// Replaces the extensions with a copy of `extensions`.
    pub fn extensions(mut self, extensions: &Extensions) -> Self {
        self.extensions = extensions.clone();
        self
    }

    /// Builds and validates against the standard action table.
    pub fn build(self) -> Result<Event, ConformanceError> {
        self.build_with(ActionTable::standard())
    }

    /// Builds and validates against `table`.
    pub fn build_with(self, table: &ActionTable) -> Result<Event, ConformanceError> {
        let event_type = self.event_type;
        let action = self.action;

        let result = self.assemble().and_then(|event| {
            EventValidator::validate(&event, event_type, table)?;
            Ok(event)
        });

        match &result {
            Ok(event) => tracing::debug!(
                event_type = %event_type,
                action = %event.action,
                id = event.id.as_deref().unwrap_or(""),
                "event built"
            ),
            Err(err) => tracing::debug!(
                event_type = %event_type,
                action = ?action,
                error = %err,
                "event rejected"
            ),
        }
        result
    }

    fn assemble(self) -> Result<Event, ConformanceError> {
        let actor = EntityValidator::check_required("actor", self.actor)?;
        let action = EntityValidator::check_required("action", self.action)?;
        let object = EntityValidator::check_required("object", self.object)?;

        Ok(Event {
            context: self.context,
            id: self.id,
            event_type: self.event_type,
            actor,
            action,
            object,
            target: self.target,
            generated: self.generated,
            started_at_time: self.started_at_time,
            ended_at_time: self.ended_at_time,
            duration: self.duration,
            ed_app: self.ed_app,
            group: self.group,
            membership: self.membership,
            session: self.session,
            extensions: self.extensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builder::{
        AgentBuilder, DigitalResourceBuilder, EntityDraft, IntervalDraft, MessageBuilder,
        SessionBuilder, SoftwareApplicationBuilder,
    };
    use crate::model::EntityType;
    use crate::profile::EventProfile;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 11, 15, hour, minute, 0).unwrap()
    }

    fn user() -> Arc<Entity> {
        Arc::new(
            AgentBuilder::person()
                .id("https://example.edu/users/554433")
                .build()
                .unwrap(),
        )
    }

    fn app() -> Arc<Entity> {
        Arc::new(
            SoftwareApplicationBuilder::new()
                .id("https://example.edu")
                .version("v2")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_type_fixed_by_constructor() {
        let builders = [
            (EventBuilder::generic(), EventType::Event),
            (EventBuilder::session_event(), EventType::Session),
            (EventBuilder::tool_use_event(), EventType::ToolUse),
            (EventBuilder::message_event(), EventType::Message),
        ];
        for (builder, expected) in builders {
            assert_eq!(builder.event_type, expected);
        }

        let event = EventBuilder::tool_use_event()
            .started_at_time(at(10, 15))
            .object(app())
            .action(Action::Used)
            .actor(user())
            .build()
            .unwrap();
        assert_eq!(event.event_type(), EventType::ToolUse);
        assert_eq!(event.context(), &JsonldContext::V1p2);
    }

    #[test]
    fn test_required_participants() {
        let err = EventBuilder::view_event()
            .action(Action::Viewed)
            .object(app())
            .build()
            .unwrap_err();
        assert_eq!(err, ConformanceError::MissingRequiredField { field: "actor" });

        let err = EventBuilder::view_event()
            .actor(user())
            .object(app())
            .build()
            .unwrap_err();
        assert_eq!(err, ConformanceError::MissingRequiredField { field: "action" });

        let err = EventBuilder::view_event()
            .actor(user())
            .action(Action::Viewed)
            .build()
            .unwrap_err();
        assert_eq!(err, ConformanceError::MissingRequiredField { field: "object" });
    }

    #[test]
    fn test_start_time_required() {
        let err = EventBuilder::view_event()
            .actor(user())
            .action(Action::Viewed)
            .object(app())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConformanceError::MissingRequiredField {
                field: "startedAtTime"
            }
        );
    }

    #[test]
    fn test_session_logout() {
        let session = SessionBuilder::new()
            .id("https://example.edu/sessions/1f6442a482de72ea6ad134943812bff564a76259")
            .user(user())
            .started_at_time(at(10, 0))
            .ended_at_time(at(11, 5))
            .duration("PT3900S")
            .build()
            .unwrap();

        let event = EventBuilder::session_event()
            .generate_id()
            .actor(user())
            .action(Action::LoggedOut)
            .object(app())
            .target(session)
            .started_at_time(at(10, 0))
            .ended_at_time(at(11, 5))
            .build()
            .unwrap();

        assert!(event.id().unwrap().starts_with("urn:uuid:"));
        assert_eq!(event.ended_at_time(), Some(at(11, 5)));

        let err = EventBuilder::session_event()
            .actor(user())
            .action(Action::TimedOut)
            .object(app())
            .started_at_time(at(10, 0))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConformanceError::MissingRequiredField {
                field: "endedAtTime"
            }
        );
    }

    #[test]
    fn test_time_ordering() {
        let err = EventBuilder::view_event()
            .actor(user())
            .action(Action::Viewed)
            .object(app())
            .started_at_time(at(11, 0))
            .ended_at_time(at(10, 0))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConformanceError::TimeOrderingViolation { .. }));
    }

    #[test]
    fn test_invalid_event_duration() {
        let err = EventBuilder::view_event()
            .actor(user())
            .action(Action::Viewed)
            .object(app())
            .started_at_time(at(10, 0))
            .duration("P1M2Y")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConformanceError::InvalidDurationFormat { .. }));
    }

    #[test]
    fn test_message_object_type() {
        let forum = DigitalResourceBuilder::forum()
            .id("https://example.edu/forums/99")
            .build()
            .unwrap();
        let err = EventBuilder::message_event()
            .actor(user())
            .action(Action::Posted)
            .object(forum)
            .started_at_time(at(10, 0))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConformanceError::TypeMismatch { field: "object", .. }
        ));

        let message = MessageBuilder::new()
            .id("https://example.edu/forums/99/topics/1/messages/3")
            .body("Am I the only one?")
            .build()
            .unwrap();
        let event = EventBuilder::message_event()
            .actor(user())
            .action(Action::Posted)
            .object(message)
            .started_at_time(at(10, 0))
            .build()
            .unwrap();
        assert_eq!(event.event_type(), EventType::Message);
        assert_eq!(event.object().entity_type(), EntityType::Message);
    }

    #[test]
    fn test_custom_table() {
        let table = ActionTable::standard()
            .to_builder()
            .profile(EventProfile::new(EventType::View, [Action::Viewed]).start_time_optional())
            .build();

        let builder = EventBuilder::view_event()
            .actor(user())
            .action(Action::Viewed)
            .object(app());
        assert!(builder.clone().build().is_err());
        assert!(builder.build_with(&table).is_ok());
    }

    #[test]
    fn test_extensions_copied_on_build() {
        let mut extensions = Extensions::new();
        extensions.insert("job".to_string(), "nightly".into());

        let event = EventBuilder::generic()
            .actor(user())
            .action(Action::Used)
            .object(app())
            .started_at_time(at(10, 0))
            .extensions(&extensions)
            .build()
            .unwrap();

        extensions.clear();
        assert_eq!(event.extensions().len(), 1);
    }
}
