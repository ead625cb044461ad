//! JSON-LD rendering.
//!
//! Converts built entities and events into ordered `serde_json` trees. Field
//! order follows [`schema`]; absent optionals and empty collections are
//! omitted. Referenced entities render as nested objects, or as their bare
//! id when they were built with `coerced_to_id(true)`.
//!
//! ```rust
//! use caliper::prelude::*;
//! use caliper::jsonld::entity_to_jsonld;
//!
//! let person = AgentBuilder::person()
//!     .id("https://example.edu/users/554433")
//!     .build()
//!     .unwrap();
//! let json = entity_to_jsonld(&person, None);
//! assert_eq!(json["@type"], "Person");
//! ```

pub mod schema;

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::SerializeError;
use crate::model::{Entity, EntityDetails, Event, Extensions, JsonldContext};

pub use schema::{FieldSpec, Presence, entity_fields, event_fields};

/// Options for rendering JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeOptions {
    /// Indent the output.
    pub pretty: bool,
}

impl SerializeOptions {
    /// Creates default (compact) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Renders an event as a JSON-LD document.
pub fn to_jsonld(event: &Event) -> Value {
    let mut map = Map::new();
    for field in event_fields(event.event_type()) {
        let value = event_field(event, field.name);
        insert_field(&mut map, field, value);
    }
    Value::Object(map)
}

/// Renders an event as JSON text.
pub fn to_json_string(event: &Event, options: &SerializeOptions) -> Result<String, SerializeError> {
    render(&to_jsonld(event), options)
}

fn event_field(event: &Event, name: &str) -> Option<Value> {
    match name {
        "@context" => Some(Value::from(event.context().iri())),
        "@id" => event.id().map(Value::from),
        "@type" => Some(Value::from(event.event_type().term())),
        "actor" => Some(reference(event.actor())),
        "action" => Some(Value::from(event.action().term())),
        "object" => Some(reference(event.object())),
        "target" => event.target().map(reference),
        "generated" => event.generated().map(reference),
        "startedAtTime" => event.started_at_time().map(timestamp),
        "endedAtTime" => event.ended_at_time().map(timestamp),
        "duration" => event.duration().map(Value::from),
        "edApp" => event.ed_app().map(reference),
        "group" => event.group().map(reference),
        "membership" => event.membership().map(reference),
        "session" => event.session().map(reference),
        "extensions" => Some(extensions(event.extensions())),
        _ => None,
    }
}

// =============================================================================
// Entities
// =============================================================================

/// Renders an entity as a full JSON-LD object.
///
/// The top-level entity always renders in full, even when coerced; when
/// `context` is given it is emitted as the first key.
pub fn entity_to_jsonld(entity: &Entity, context: Option<&JsonldContext>) -> Value {
    let mut map = Map::new();
    if let Some(context) = context {
        map.insert("@context".to_string(), Value::from(context.iri()));
    }
    for field in entity_fields(entity.entity_type()) {
        let value = entity_field(entity, field.name);
        insert_field(&mut map, field, value);
    }
    Value::Object(map)
}

/// Renders an entity as JSON text.
pub fn entity_to_json_string(
    entity: &Entity,
    context: Option<&JsonldContext>,
    options: &SerializeOptions,
) -> Result<String, SerializeError> {
    render(&entity_to_jsonld(entity, context), options)
}

fn entity_field(entity: &Entity, name: &str) -> Option<Value> {
    match name {
        "@id" => return Some(Value::from(entity.id())),
        "@type" => return Some(Value::from(entity.entity_type().term())),
        "name" => return entity.name().map(Value::from),
        "description" => return entity.description().map(Value::from),
        "extensions" => return Some(extensions(entity.extensions())),
        "dateCreated" => return entity.date_created().map(timestamp),
        "dateModified" => return entity.date_modified().map(timestamp),
        _ => {}
    }

    if let Some(resource) = entity.resource() {
        match name {
            "creators" => return Some(references(&resource.creators)),
            "mediaType" => return resource.media_type.as_deref().map(Value::from),
            "keywords" => return Some(Value::from(resource.keywords.clone())),
            "isPartOf" => return resource.is_part_of.as_ref().map(reference),
            "datePublished" => return resource.date_published.map(timestamp),
            "version" => return resource.version.as_deref().map(Value::from),
            _ => {}
        }
    }

    if let Some(interval) = entity.interval() {
        match name {
            "startedAtTime" => return interval.started_at_time.map(timestamp),
            "endedAtTime" => return interval.ended_at_time.map(timestamp),
            "duration" => return interval.duration.as_deref().map(Value::from),
            _ => {}
        }
    }

    match (entity.details(), name) {
        (
            EntityDetails::Organization {
                sub_organization_of,
            },
            "subOrganizationOf",
        )
        | (
            EntityDetails::CourseSection {
                sub_organization_of,
                ..
            },
            "subOrganizationOf",
        ) => sub_organization_of.as_ref().map(reference),
        (EntityDetails::CourseSection { course_number, .. }, "courseNumber") => {
            course_number.as_deref().map(Value::from)
        }
        (
            EntityDetails::CourseSection {
                academic_session, ..
            },
            "academicSession",
        ) => academic_session.as_deref().map(Value::from),
        (EntityDetails::SoftwareApplication { version }, "version") => {
            version.as_deref().map(Value::from)
        }
        (EntityDetails::Frame { index, .. }, "index") => Some(Value::from(*index)),
        (EntityDetails::Message { reply_to, .. }, "replyTo") => reply_to.as_ref().map(reference),
        (EntityDetails::Message { body, .. }, "body") => body.as_deref().map(Value::from),
        (EntityDetails::Message { attachments, .. }, "attachments") => {
            Some(references(attachments))
        }
        (EntityDetails::Session { user, .. }, "user") => user.as_ref().map(reference),
        (EntityDetails::Response { assignable, .. }, "assignable") => {
            assignable.as_ref().map(reference)
        }
        (EntityDetails::Response { actor, .. }, "actor") => actor.as_ref().map(reference),
        (EntityDetails::Response { values, .. }, "values") => Some(Value::from(values.clone())),
        (EntityDetails::Response { values, .. }, "value") => {
            values.first().map(|v| Value::from(v.as_str()))
        }
        (EntityDetails::Query { creator, .. }, "creator") => creator.as_ref().map(reference),
        (EntityDetails::Query { search_target, .. }, "searchTarget")
        | (EntityDetails::SearchResponse { search_target, .. }, "searchTarget") => {
            search_target.as_ref().map(reference)
        }
        (EntityDetails::Query { search_terms, .. }, "searchTerms") => {
            search_terms.as_deref().map(Value::from)
        }
        (
            EntityDetails::SearchResponse {
                search_provider, ..
            },
            "searchProvider",
        ) => search_provider.as_ref().map(reference),
        (EntityDetails::SearchResponse { query, .. }, "query") => query.as_ref().map(reference),
        (
            EntityDetails::SearchResponse {
                search_results_item_count,
                ..
            },
            "searchResultsItemCount",
        ) => search_results_item_count.map(Value::from),
        (EntityDetails::SearchResponse { search_results, .. }, "searchResults") => {
            Some(references(search_results))
        }
        (EntityDetails::Membership { member, .. }, "member") => member.as_ref().map(reference),
        (EntityDetails::Membership { organization, .. }, "organization") => {
            organization.as_ref().map(reference)
        }
        (EntityDetails::Membership { roles, .. }, "roles") => Some(Value::Array(
            roles.iter().map(|r| Value::from(r.term())).collect(),
        )),
        (EntityDetails::Membership { status, .. }, "status") => {
            status.map(|s| Value::from(s.term()))
        }
        _ => None,
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Renders a referenced entity: its id when coerced, otherwise in full.
fn reference(entity: &Arc<Entity>) -> Value {
    if entity.is_coerced_to_id() {
        Value::from(entity.id())
    } else {
        entity_to_jsonld(entity, None)
    }
}

fn references(entities: &[Arc<Entity>]) -> Value {
    Value::Array(entities.iter().map(reference).collect())
}

/// RFC 3339 UTC with millisecond precision.
fn timestamp(at: DateTime<Utc>) -> Value {
    Value::from(at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn extensions(extensions: &Extensions) -> Value {
    Value::Object(
        extensions
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect(),
    )
}

fn insert_field(map: &mut Map<String, Value>, field: &FieldSpec, value: Option<Value>) {
    let value = match (field.presence, value) {
        (Presence::Required, value) => value.unwrap_or(Value::Null),
        (Presence::Optional, Some(value)) => value,
        (Presence::NonEmpty, Some(value)) if !is_empty(&value) => value,
        _ => return,
    };
    map.insert(field.name.to_string(), value);
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Null => true,
        _ => false,
    }
}

fn render(value: &Value, options: &SerializeOptions) -> Result<String, SerializeError> {
    let text = if options.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
