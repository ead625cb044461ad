use std::sync::Arc;

use crate::error::ConformanceError;
use crate::model::entity::{EntityDetails, IntervalFields, ResourceFields};
use crate::model::{Entity, EntityType, JsonldContext};
use crate::validate::TimeValidator;

/// Structural rules shared by every entity kind, plus the type constraints
/// on the entities a kind references.
pub struct EntityValidator;

impl EntityValidator {
    /// Checks that the type tag equals the one fixed by the kind.
    pub fn check_type_uri(actual: EntityType, expected: EntityType) -> Result<(), ConformanceError> {
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

    /// Checks that a family builder produced a member of its family.
    pub fn check_family(actual: EntityType, family: EntityType) -> Result<(), ConformanceError> {
        if actual.is_a(family) {
            Ok(())
        } else {
            Err(ConformanceError::TypeMismatch {
                field: "@type",
                expected: family.to_string(),
                actual: actual.to_string(),
            })
        }
    }

    /// Checks that the id is present and not blank.
    pub fn check_id(id: &str) -> Result<(), ConformanceError> {
        Self::check_not_blank("@id", Some(id)).map(|_| ())
    }

    /// Checks that the context IRI is not blank.
    pub fn check_context(context: &JsonldContext) -> Result<(), ConformanceError> {
        Self::check_not_blank("@context", Some(context.iri())).map(|_| ())
    }

    /// Returns the value of a required attribute.
    pub fn check_required<T>(field: &'static str, value: Option<T>) -> Result<T, ConformanceError> {
        value.ok_or_else(|| ConformanceError::missing(field))
    }

    /// Returns a required string attribute, rejecting whitespace-only values.
    pub fn check_not_blank<'a>(
        field: &'static str,
        value: Option<&'a str>,
    ) -> Result<&'a str, ConformanceError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConformanceError::missing(field)),
        }
    }

    /// Checks that a referenced entity, when present, is a subtype of
    /// `expected`.
    pub fn check_related_type(
        field: &'static str,
        related: Option<&Arc<Entity>>,
        expected: EntityType,
    ) -> Result<(), ConformanceError> {
        match related {
            Some(entity) if !entity.entity_type().is_a(expected) => {
                Err(ConformanceError::TypeMismatch {
                    field,
                    expected: expected.to_string(),
                    actual: entity.entity_type().to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Checks that at most `max` values are present.
    pub fn check_cardinality(
        field: &'static str,
        actual: usize,
        max: usize,
    ) -> Result<(), ConformanceError> {
        if actual > max {
            Err(ConformanceError::CardinalityExceeded { field, max, actual })
        } else {
            Ok(())
        }
    }

    /// Validates a candidate entity of kind `expected`.
    ///
    /// Checks run in order: type, id, kind-specific references, then the
    /// interval. The first failure is returned.
    pub fn validate(entity: &Entity, expected: EntityType) -> Result<(), ConformanceError> {
        Self::check_type_uri(entity.entity_type(), expected)?;
        Self::check_id(entity.id())?;

        match entity.details() {
            EntityDetails::Plain | EntityDetails::SoftwareApplication { .. } => Ok(()),
            EntityDetails::Organization {
                sub_organization_of,
            }
            | EntityDetails::CourseSection {
                sub_organization_of,
                ..
            } => Self::check_related_type(
                "subOrganizationOf",
                sub_organization_of.as_ref(),
                EntityType::Organization,
            ),
            EntityDetails::DigitalResource(resource) | EntityDetails::Frame { resource, .. } => {
                Self::check_resource(resource)
            }
            EntityDetails::Message {
                resource,
                reply_to,
                attachments,
                ..
            } => {
                Self::check_resource(resource)?;
                Self::check_related_type("replyTo", reply_to.as_ref(), EntityType::Message)?;
                for attachment in attachments {
                    Self::check_related_type(
                        "attachments",
                        Some(attachment),
                        EntityType::DigitalResource,
                    )?;
                }
                Ok(())
            }
            EntityDetails::Session { user, interval } => {
                Self::check_related_type("user", user.as_ref(), EntityType::Person)?;
                Self::check_interval(interval)
            }
            EntityDetails::Response {
                assignable,
                actor,
                values,
                interval,
            } => {
                Self::check_related_type(
                    "assignable",
                    assignable.as_ref(),
                    EntityType::DigitalResource,
                )?;
                Self::check_related_type("actor", actor.as_ref(), EntityType::Agent)?;
                if is_single_valued(entity.entity_type()) {
                    Self::check_cardinality("value", values.len(), 1)?;
                }
                Self::check_interval(interval)
            }
            EntityDetails::Query { creator, .. } => {
                Self::check_related_type("creator", creator.as_ref(), EntityType::Agent)
            }
            EntityDetails::SearchResponse {
                search_provider,
                query,
                ..
            } => {
                Self::check_related_type(
                    "searchProvider",
                    search_provider.as_ref(),
                    EntityType::Agent,
                )?;
                Self::check_related_type("query", query.as_ref(), EntityType::Query)
            }
            EntityDetails::Membership {
                member,
                organization,
                ..
            } => {
                Self::check_related_type("member", member.as_ref(), EntityType::Agent)?;
                Self::check_related_type(
                    "organization",
                    organization.as_ref(),
                    EntityType::Organization,
                )
            }
        }
    }

    fn check_resource(resource: &ResourceFields) -> Result<(), ConformanceError> {
        for creator in &resource.creators {
            Self::check_related_type("creators", Some(creator), EntityType::Agent)?;
        }
        Ok(())
    }

    fn check_interval(interval: &IntervalFields) -> Result<(), ConformanceError> {
        TimeValidator::check_start_time(interval.started_at_time, interval.ended_at_time)?;
        TimeValidator::check_duration(interval.duration.as_deref().unwrap_or_default())
    }
}

/// Response kinds that carry a single `value` rather than `values`.
pub(crate) fn is_single_valued(entity_type: EntityType) -> bool {
    matches!(
        entity_type,
        EntityType::MultipleChoiceResponse | EntityType::TrueFalseResponse
    )
}
