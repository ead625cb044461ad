//! Immutable entity records.
//!
//! An [`Entity`] is only obtainable from a builder's `build()`, after it has
//! passed conformance validation. It exposes accessors and no setters.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{EntityType, Extensions, Role, Status};

/// A noun in the analytics model: a person, resource, organization, result.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub(crate) id: String,
    pub(crate) entity_type: EntityType,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) extensions: Extensions,
    pub(crate) date_created: Option<DateTime<Utc>>,
    pub(crate) date_modified: Option<DateTime<Utc>>,
    pub(crate) coerced_to_id: bool,
    pub(crate) details: EntityDetails,
}

/// Attributes contributed by the DigitalResource level of the taxonomy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceFields {
    pub creators: Vec<Arc<Entity>>,
    pub media_type: Option<String>,
    pub keywords: Vec<String>,
    pub is_part_of: Option<Arc<Entity>>,
    pub date_published: Option<DateTime<Utc>>,
    pub version: Option<String>,
}

/// Start/end/duration attributes shared by sessions and responses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalFields {
    pub started_at_time: Option<DateTime<Utc>>,
    pub ended_at_time: Option<DateTime<Utc>>,
    /// ISO 8601 period.
    pub duration: Option<String>,
}

/// Kind-specific attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityDetails {
    /// Kinds with no attributes beyond the common ones (Agent, Person).
    Plain,
    Organization {
        sub_organization_of: Option<Arc<Entity>>,
    },
    CourseSection {
        course_number: Option<String>,
        academic_session: Option<String>,
        sub_organization_of: Option<Arc<Entity>>,
    },
    SoftwareApplication {
        version: Option<String>,
    },
    DigitalResource(ResourceFields),
    Frame {
        resource: ResourceFields,
        /// Zero-based position within the containing resource.
        index: u32,
    },
    Message {
        resource: ResourceFields,
        reply_to: Option<Arc<Entity>>,
        body: Option<String>,
        attachments: Vec<Arc<Entity>>,
    },
    Session {
        user: Option<Arc<Entity>>,
        interval: IntervalFields,
    },
    Response {
        assignable: Option<Arc<Entity>>,
        actor: Option<Arc<Entity>>,
        values: Vec<String>,
        interval: IntervalFields,
    },
    Query {
        creator: Option<Arc<Entity>>,
        search_target: Option<Arc<Entity>>,
        search_terms: Option<String>,
    },
    SearchResponse {
        search_provider: Option<Arc<Entity>>,
        search_target: Option<Arc<Entity>>,
        query: Option<Arc<Entity>>,
        search_results_item_count: Option<u32>,
        search_results: Vec<Arc<Entity>>,
    },
    Membership {
        member: Option<Arc<Entity>>,
        organization: Option<Arc<Entity>>,
        roles: Vec<Role>,
        status: Option<Status>,
    },
}

impl Entity {
    /// Required. The entity IRI.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Required. Fixed by the concrete kind.
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn date_created(&self) -> Option<DateTime<Utc>> {
        self.date_created
    }

    pub fn date_modified(&self) -> Option<DateTime<Utc>> {
        self.date_modified
    }

    /// Whether references to this entity render as its bare id.
    pub fn is_coerced_to_id(&self) -> bool {
        self.coerced_to_id
    }

    /// Kind-specific attributes.
    pub fn details(&self) -> &EntityDetails {
        &self.details
    }

    /// DigitalResource attributes, for resource kinds.
    pub fn resource(&self) -> Option<&ResourceFields> {
        match &self.details {
            EntityDetails::DigitalResource(resource)
            | EntityDetails::Frame { resource, .. }
            | EntityDetails::Message { resource, .. } => Some(resource),
            _ => None,
        }
    }

    /// Interval attributes, for sessions and responses.
    pub fn interval(&self) -> Option<&IntervalFields> {
        match &self.details {
            EntityDetails::Session { interval, .. } | EntityDetails::Response { interval, .. } => {
                Some(interval)
            }
            _ => None,
        }
    }

    /// Response values in selection order; empty for non-response kinds.
    pub fn values(&self) -> &[String] {
        match &self.details {
            EntityDetails::Response { values, .. } => values,
            _ => &[],
        }
    }

    /// Frame index, for frames.
    pub fn index(&self) -> Option<u32> {
        match &self.details {
            EntityDetails::Frame { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Entities this entity references, in field order.
    pub fn references(&self) -> Vec<&Arc<Entity>> {
        let mut refs = Vec::new();
        match &self.details {
            EntityDetails::Plain | EntityDetails::SoftwareApplication { .. } => {}
            EntityDetails::Organization {
                sub_organization_of,
            }
            | EntityDetails::CourseSection {
                sub_organization_of,
                ..
            } => refs.extend(sub_organization_of),
            EntityDetails::DigitalResource(resource) | EntityDetails::Frame { resource, .. } => {
                push_resource_refs(&mut refs, resource);
            }
            EntityDetails::Message {
                resource,
                reply_to,
                attachments,
                ..
            } => {
                push_resource_refs(&mut refs, resource);
                refs.extend(reply_to);
                refs.extend(attachments);
            }
            EntityDetails::Session { user, .. } => refs.extend(user),
            EntityDetails::Response {
                assignable, actor, ..
            } => {
                refs.extend(assignable);
                refs.extend(actor);
            }
            EntityDetails::Query {
                creator,
                search_target,
                ..
            } => {
                refs.extend(creator);
                refs.extend(search_target);
            }
            EntityDetails::SearchResponse {
                search_provider,
                search_target,
                query,
                search_results,
                ..
            } => {
                refs.extend(search_provider);
                refs.extend(search_target);
                refs.extend(query);
                refs.extend(search_results);
            }
            EntityDetails::Membership {
                member,
                organization,
                ..
            } => {
                refs.extend(member);
                refs.extend(organization);
            }
        }
        refs
    }
}

fn push_resource_refs<'a>(refs: &mut Vec<&'a Arc<Entity>>, resource: &'a ResourceFields) {
    refs.extend(&resource.creators);
    refs.extend(&resource.is_part_of);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builder::{
        AgentBuilder, DigitalResourceBuilder, EntityDraft, FrameBuilder, MessageBuilder,
        ResourceDraft,
    };

    #[test]
    fn test_accessors_by_kind() {
        let frame = FrameBuilder::new()
            .id("https://example.edu/etexts/201.epub#epubcfi(/4/3)")
            .index(2)
            .build()
            .unwrap();
        assert_eq!(frame.index(), Some(2));
        assert!(frame.resource().is_some());
        assert!(frame.interval().is_none());
        assert!(frame.values().is_empty());

        let person = AgentBuilder::person()
            .id("https://example.edu/users/554433")
            .build()
            .unwrap();
        assert_eq!(person.index(), None);
        assert_eq!(person.details(), &EntityDetails::Plain);
    }

    #[test]
    fn test_references_in_field_order() {
        let author = Arc::new(
            AgentBuilder::person()
                .id("https://example.edu/users/1")
                .build()
                .unwrap(),
        );
        let forum = Arc::new(
            DigitalResourceBuilder::forum()
                .id("https://example.edu/forums/1")
                .build()
                .unwrap(),
        );
        let message = MessageBuilder::new()
            .id("https://example.edu/forums/1/messages/1")
            .creator(author.clone())
            .is_part_of(forum.clone())
            .build()
            .unwrap();

        let refs: Vec<&str> = message.references().iter().map(|e| e.id()).collect();
        assert_eq!(refs, vec![author.id(), forum.id()]);
    }
}
