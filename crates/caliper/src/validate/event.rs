use crate::error::ConformanceError;
use crate::model::{Action, Entity, EntityType, Event, EventType};
use crate::profile::{ActionTable, EventProfile};
use crate::validate::{EntityValidator, TimeValidator};

/// Event-level rules: type tag, action whitelist, participant types and
/// temporal constraints.
pub struct EventValidator;

impl EventValidator {
    /// Checks that the type tag equals the one fixed by the kind.
    pub fn check_type(actual: EventType, expected: EventType) -> Result<(), ConformanceError> {
        if actual == expected {
            Ok(())
        } else {
            Err(ConformanceError::TypeMismatch {
                field: "@type",
                expected: expected.to_string(),
                actual: actual.to_string(),
            })
        }
    }

    /// Checks that `action` is in the kind's vocabulary.
    pub fn check_action(
        action: Action,
        event_type: EventType,
        table: &ActionTable,
    ) -> Result<(), ConformanceError> {
        if table.supports(event_type, action) {
            Ok(())
        } else {
            Err(ConformanceError::ActionNotSupported { action, event_type })
        }
    }

    /// Checks that the actor is an Agent.
    pub fn check_actor(actor: &Entity) -> Result<(), ConformanceError> {
        if actor.entity_type().is_agent() {
            Ok(())
        } else {
            Err(ConformanceError::TypeMismatch {
                field: "actor",
                expected: EntityType::Agent.to_string(),
                actual: actor.entity_type().to_string(),
            })
        }
    }

    /// Checks the object against the kind's permitted object types.
    pub fn check_object(object: &Entity, profile: &EventProfile) -> Result<(), ConformanceError> {
        if profile.permits_object(object.entity_type()) {
            return Ok(());
        }
        Err(ConformanceError::TypeMismatch {
            field: "object",
            expected: join_types(profile.permitted_object_types().unwrap_or_default()),
            actual: object.entity_type().to_string(),
        })
    }

    /// Checks the generated entity, when present, against the kind's
    /// permitted generated types.
    pub fn check_generated(
        generated: Option<&Entity>,
        profile: &EventProfile,
    ) -> Result<(), ConformanceError> {
        match generated {
            Some(entity) if !profile.permits_generated(entity.entity_type()) => {
                Err(ConformanceError::TypeMismatch {
                    field: "generated",
                    expected: join_types(profile.permitted_generated_types().unwrap_or_default()),
                    actual: entity.entity_type().to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Validates a candidate event of kind `expected` against `table`.
    ///
    /// Order: type, context, id, actor, action, object, generated, then times.
    /// The first failure is returned.
    pub fn validate(
        event: &Event,
        expected: EventType,
        table: &ActionTable,
    ) -> Result<(), ConformanceError> {
        Self::check_type(event.event_type(), expected)?;
        EntityValidator::check_context(event.context())?;
        if let Some(id) = event.id() {
            EntityValidator::check_id(id)?;
        }
        Self::check_actor(event.actor())?;
        Self::check_action(event.action(), expected, table)?;

        // A supported action implies the kind has a profile.
        let profile = table
            .profile(expected)
            .ok_or(ConformanceError::ActionNotSupported {
                action: event.action(),
                event_type: expected,
            })?;

        Self::check_object(event.object(), profile)?;
        Self::check_generated(event.generated().map(|g| &**g), profile)?;

        let (start, end) = (event.started_at_time(), event.ended_at_time());
        if profile.start_time_required() {
            TimeValidator::check_start_required(start)?;
        }
        if profile.requires_end_time(event.action()) {
            TimeValidator::check_end_time(start, end)?;
        } else {
            TimeValidator::check_start_time(start, end)?;
        }
        TimeValidator::check_duration(event.duration().unwrap_or_default())
    }
}

fn join_types(types: &[EntityType]) -> String {
    types
        .iter()
        .map(|t| t.term())
        .collect::<Vec<_>>()
        .join(" or ")
}
