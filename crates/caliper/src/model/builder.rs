//! Builder API for entity construction.
//!
//! Every concrete kind has a builder holding the union of the fields its
//! ancestors contribute. Ancestor setters come from the draft traits
//! ([`EntityDraft`], [`ResourceDraft`], [`IntervalDraft`]), so importing
//! them (or the crate [`prelude`](crate::prelude)) makes the whole chain
//! available on any builder. The type tag is fixed by the builder's
//! constructor and has no setter.
//!
//! # Example
//!
//! ```rust
//! use caliper::prelude::*;
//!
//! let frame = FrameBuilder::new()
//!     .id("https://example.edu/etexts/201.epub#epubcfi(/4/3/1)")
//!     .name("Key Figures: George Washington")
//!     .version("2nd ed.")
//!     .index(1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(frame.entity_type(), EntityType::Frame);
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::ConformanceError;
use crate::model::entity::{EntityDetails, IntervalFields, ResourceFields};
use crate::model::{Entity, EntityType, ExtensionValue, Extensions, Role, Status};
use crate::validate::EntityValidator;

// =============================================================================
// Shared drafts
// =============================================================================

/// Fields every entity kind carries.
#[derive(Debug, Clone, Default)]
pub struct CommonFields {
    pub(crate) id: String,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) extensions: Extensions,
    pub(crate) date_created: Option<DateTime<Utc>>,
    pub(crate) date_modified: Option<DateTime<Utc>>,
    pub(crate) coerced_to_id: bool,
}

/// Setters for the Entity level, available on every entity builder.
pub trait EntityDraft: Sized {
    #[doc(hidden)]
    fn common_mut(&mut self) -> &mut CommonFields;

    /// Sets the entity IRI.
    fn id(mut self, id: impl Into<String>) -> Self {
        self.common_mut().id = id.into();
        self
    }

    fn name(mut self, name: impl Into<String>) -> Self {
        self.common_mut().name = Some(name.into());
        self
    }

    fn description(mut self, description: impl Into<String>) -> Self {
        self.common_mut().description = Some(description.into());
        self
    }

    /// Adds a single extension property.
    fn extension(mut self, key: impl Into<String>, value: impl Into<ExtensionValue>) -> Self {
        self.common_mut().extensions.insert(key.into(), value.into());
        self
    }

    /// Replaces the extensions with a copy of `extensions`.
    fn extensions(mut self, extensions: &Extensions) -> Self {
        self.common_mut().extensions = extensions.clone();
        self
    }

    fn date_created(mut self, at: DateTime<Utc>) -> Self {
        self.common_mut().date_created = Some(at);
        self
    }

    fn date_modified(mut self, at: DateTime<Utc>) -> Self {
        self.common_mut().date_modified = Some(at);
        self
    }

    /// Render references to the built entity as its bare id.
    fn coerced_to_id(mut self, coerced: bool) -> Self {
        self.common_mut().coerced_to_id = coerced;
        self
    }
}

/// Setters for the DigitalResource level.
pub trait ResourceDraft: EntityDraft {
    #[doc(hidden)]
    fn resource_mut(&mut self) -> &mut ResourceFields;

    /// Adds a creator.
    fn creator(mut self, creator: impl Into<Arc<Entity>>) -> Self {
        self.resource_mut().creators.push(creator.into());
        self
    }

    /// Replaces the creators with a copy of `creators`.
    fn creators(mut self, creators: &[Arc<Entity>]) -> Self {
        self.resource_mut().creators = creators.to_vec();
        self
    }

    fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.resource_mut().media_type = Some(media_type.into());
        self
    }

    /// Adds a keyword.
    fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.resource_mut().keywords.push(keyword.into());
        self
    }

    /// Replaces the keywords with a copy of `keywords`.
    fn keywords<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        self.resource_mut().keywords = keywords.iter().map(|k| k.as_ref().to_string()).collect();
        self
    }

    fn is_part_of(mut self, parent: impl Into<Arc<Entity>>) -> Self {
        self.resource_mut().is_part_of = Some(parent.into());
        self
    }

    fn date_published(mut self, at: DateTime<Utc>) -> Self {
        self.resource_mut().date_published = Some(at);
        self
    }

    fn version(mut self, version: impl Into<String>) -> Self {
        self.resource_mut().version = Some(version.into());
        self
    }
}

/// Setters for kinds that span an interval (sessions, responses).
pub trait IntervalDraft: EntityDraft {
    #[doc(hidden)]
    fn interval_mut(&mut self) -> &mut IntervalFields;

    fn started_at_time(mut self, at: DateTime<Utc>) -> Self {
        self.interval_mut().started_at_time = Some(at);
        self
    }

    fn ended_at_time(mut self, at: DateTime<Utc>) -> Self {
        self.interval_mut().ended_at_time = Some(at);
        self
    }

    /// Sets the ISO 8601 duration (e.g. "PT3000S").
    fn duration(mut self, duration: impl Into<String>) -> Self {
        self.interval_mut().duration = Some(duration.into());
        self
    }
}

/// Assembles the candidate entity and validates it.
fn finish(
    common: CommonFields,
    entity_type: EntityType,
    family: EntityType,
    details: EntityDetails,
) -> Result<Entity, ConformanceError> {
    let entity = Entity {
        id: common.id,
        entity_type,
        name: common.name,
        description: common.description,
        extensions: common.extensions,
        date_created: common.date_created,
        date_modified: common.date_modified,
        coerced_to_id: common.coerced_to_id,
        details,
    };

    let checked = EntityValidator::check_family(entity.entity_type, family)
        .and_then(|()| EntityValidator::validate(&entity, entity_type));
    if let Err(err) = checked {
        tracing::debug!(
            entity_type = %entity_type,
            id = %entity.id,
            error = %err,
            "entity rejected"
        );
        return Err(err);
    }
    Ok(entity)
}

macro_rules! impl_entity_draft {
    ($($builder:ty),* $(,)?) => {
        $(
            impl EntityDraft for $builder {
                fn common_mut(&mut self) -> &mut CommonFields {
                    &mut self.common
                }
            }
        )*
    };
}

impl_entity_draft!(
    AgentBuilder,
    OrganizationBuilder,
    CourseSectionBuilder,
    SoftwareApplicationBuilder,
    DigitalResourceBuilder,
    FrameBuilder,
    MessageBuilder,
    SessionBuilder,
    ResponseBuilder,
    QueryBuilder,
    SearchResponseBuilder,
    MembershipBuilder,
);

// =============================================================================
// Agents
// =============================================================================

/// Builder for Agent and Person.
#[derive(Debug, Clone)]
pub struct AgentBuilder {
    entity_type: EntityType,
    common: CommonFields,
}

impl AgentBuilder {
    fn with_type(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            common: CommonFields::default(),
        }
    }

    /// Creates a builder for a generic Agent.
    pub fn agent() -> Self {
        Self::with_type(EntityType::Agent)
    }

    /// Creates a builder for a Person.
    pub fn person() -> Self {
        Self::with_type(EntityType::Person)
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(self.common, self.entity_type, EntityType::Agent, EntityDetails::Plain)
    }
}

/// Builder for Organization and Group.
#[derive(Debug, Clone)]
pub struct OrganizationBuilder {
    entity_type: EntityType,
    common: CommonFields,
    sub_organization_of: Option<Arc<Entity>>,
}

impl OrganizationBuilder {
    fn with_type(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            common: CommonFields::default(),
            sub_organization_of: None,
        }
    }

    pub fn organization() -> Self {
        Self::with_type(EntityType::Organization)
    }

    pub fn group() -> Self {
        Self::with_type(EntityType::Group)
    }

    /// Sets the parent organization.
    pub fn sub_organization_of(mut self, parent: impl Into<Arc<Entity>>) -> Self {
        self.sub_organization_of = Some(parent.into());
        self
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(
            self.common,
            self.entity_type,
            EntityType::Organization,
            EntityDetails::Organization {
                sub_organization_of: self.sub_organization_of,
            },
        )
    }
}

/// Builder for CourseSection.
#[derive(Debug, Clone, Default)]
pub struct CourseSectionBuilder {
    common: CommonFields,
    course_number: Option<String>,
    academic_session: Option<String>,
    sub_organization_of: Option<Arc<Entity>>,
}

impl CourseSectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn course_number(mut self, course_number: impl Into<String>) -> Self {
        self.course_number = Some(course_number.into());
        self
    }

    pub fn academic_session(mut self, academic_session: impl Into<String>) -> Self {
        self.academic_session = Some(academic_session.into());
        self
    }

    pub fn sub_organization_of(mut self, parent: impl Into<Arc<Entity>>) -> Self {
        self.sub_organization_of = Some(parent.into());
        self
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(
            self.common,
            EntityType::CourseSection,
            EntityType::CourseSection,
            EntityDetails::CourseSection {
                course_number: self.course_number,
                academic_session: self.academic_session,
                sub_organization_of: self.sub_organization_of,
            },
        )
    }
}

/// Builder for SoftwareApplication.
#[derive(Debug, Clone, Default)]
pub struct SoftwareApplicationBuilder {
    common: CommonFields,
    version: Option<String>,
}

impl SoftwareApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(
            self.common,
            EntityType::SoftwareApplication,
            EntityType::SoftwareApplication,
            EntityDetails::SoftwareApplication {
                version: self.version,
            },
        )
    }
}

// =============================================================================
// Digital resources
// =============================================================================

/// Builder for DigitalResource and the resource kinds without extra fields.
#[derive(Debug, Clone)]
pub struct DigitalResourceBuilder {
    entity_type: EntityType,
    common: CommonFields,
    resource: ResourceFields,
}

impl DigitalResourceBuilder {
    fn with_type(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            common: CommonFields::default(),
            resource: ResourceFields::default(),
        }
    }

    pub fn digital_resource() -> Self {
        Self::with_type(EntityType::DigitalResource)
    }

    pub fn assessment() -> Self {
        Self::with_type(EntityType::Assessment)
    }

    pub fn assessment_item() -> Self {
        Self::with_type(EntityType::AssessmentItem)
    }

    pub fn chapter() -> Self {
        Self::with_type(EntityType::Chapter)
    }

    pub fn document() -> Self {
        Self::with_type(EntityType::Document)
    }

    pub fn forum() -> Self {
        Self::with_type(EntityType::Forum)
    }

    pub fn media_object() -> Self {
        Self::with_type(EntityType::MediaObject)
    }

    pub fn page() -> Self {
        Self::with_type(EntityType::Page)
    }

    pub fn reading() -> Self {
        Self::with_type(EntityType::Reading)
    }

    pub fn thread() -> Self {
        Self::with_type(EntityType::Thread)
    }

    pub fn web_page() -> Self {
        Self::with_type(EntityType::WebPage)
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(
            self.common,
            self.entity_type,
            EntityType::DigitalResource,
            EntityDetails::DigitalResource(self.resource),
        )
    }
}

impl ResourceDraft for DigitalResourceBuilder {
    fn resource_mut(&mut self) -> &mut ResourceFields {
        &mut self.resource
    }
}

/// Builder for Frame.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    common: CommonFields,
    resource: ResourceFields,
    index: u32,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zero-based index. Defaults to 0.
    pub fn index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(
            self.common,
            EntityType::Frame,
            EntityType::Frame,
            EntityDetails::Frame {
                resource: self.resource,
                index: self.index,
            },
        )
    }
}

impl ResourceDraft for FrameBuilder {
    fn resource_mut(&mut self) -> &mut ResourceFields {
        &mut self.resource
    }
}

/// Builder for Message.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    common: CommonFields,
    resource: ResourceFields,
    reply_to: Option<Arc<Entity>>,
    body: Option<String>,
    attachments: Vec<Arc<Entity>>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message this one replies to.
    pub fn reply_to(mut self, message: impl Into<Arc<Entity>>) -> Self {
        self.reply_to = Some(message.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds an attachment.
    pub fn attachment(mut self, attachment: impl Into<Arc<Entity>>) -> Self {
        self.attachments.push(attachment.into());
        self
    }

    /// Replaces the attachments with a copy of `attachments`.
    pub fn attachments(mut self, attachments: &[Arc<Entity>]) -> Self {
        self.attachments = attachments.to_vec();
        self
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(
            self.common,
            EntityType::Message,
            EntityType::Message,
            EntityDetails::Message {
                resource: self.resource,
                reply_to: self.reply_to,
                body: self.body,
                attachments: self.attachments,
            },
        )
    }
}

impl ResourceDraft for MessageBuilder {
    fn resource_mut(&mut self) -> &mut ResourceFields {
        &mut self.resource
    }
}

// =============================================================================
// Sessions and responses
// =============================================================================

/// Builder for Session.
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    common: CommonFields,
    user: Option<Arc<Entity>>,
    interval: IntervalFields,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the session's user (a Person).
    pub fn user(mut self, user: impl Into<Arc<Entity>>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(
            self.common,
            EntityType::Session,
            EntityType::Session,
            EntityDetails::Session {
                user: self.user,
                interval: self.interval,
            },
        )
    }
}

impl IntervalDraft for SessionBuilder {
    fn interval_mut(&mut self) -> &mut IntervalFields {
        &mut self.interval
    }
}

/// Builder for the Response kinds.
///
/// MultipleChoiceResponse and TrueFalseResponse hold at most one value; the
/// other kinds hold an ordered list.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    entity_type: EntityType,
    common: CommonFields,
    assignable: Option<Arc<Entity>>,
    actor: Option<Arc<Entity>>,
    values: Vec<String>,
    interval: IntervalFields,
}

impl ResponseBuilder {
    fn with_type(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            common: CommonFields::default(),
            assignable: None,
            actor: None,
            values: Vec::new(),
            interval: IntervalFields::default(),
        }
    }

    pub fn fillin_blank() -> Self {
        Self::with_type(EntityType::FillinBlankResponse)
    }

    pub fn multiple_choice() -> Self {
        Self::with_type(EntityType::MultipleChoiceResponse)
    }

    pub fn multiple_response() -> Self {
        Self::with_type(EntityType::MultipleResponseResponse)
    }

    pub fn select_text() -> Self {
        Self::with_type(EntityType::SelectTextResponse)
    }

    pub fn true_false() -> Self {
        Self::with_type(EntityType::TrueFalseResponse)
    }

    /// Sets the assessment item responded to.
    pub fn assignable(mut self, assignable: impl Into<Arc<Entity>>) -> Self {
        self.assignable = Some(assignable.into());
        self
    }

    /// Sets the responding agent.
    pub fn actor(mut self, actor: impl Into<Arc<Entity>>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Appends a selected value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Replaces the values with a copy of `values`.
    pub fn values<S: AsRef<str>>(mut self, values: &[S]) -> Self {
        self.values = values.iter().map(|v| v.as_ref().to_string()).collect();
        self
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(
            self.common,
            self.entity_type,
            EntityType::Response,
            EntityDetails::Response {
                assignable: self.assignable,
                actor: self.actor,
                values: self.values,
                interval: self.interval,
            },
        )
    }
}

impl IntervalDraft for ResponseBuilder {
    fn interval_mut(&mut self) -> &mut IntervalFields {
        &mut self.interval
    }
}

// =============================================================================
// Search
// =============================================================================

/// Builder for Query.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    common: CommonFields,
    creator: Option<Arc<Entity>>,
    search_target: Option<Arc<Entity>>,
    search_terms: Option<String>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn creator(mut self, creator: impl Into<Arc<Entity>>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn search_target(mut self, target: impl Into<Arc<Entity>>) -> Self {
        self.search_target = Some(target.into());
        self
    }

    pub fn search_terms(mut self, terms: impl Into<String>) -> Self {
        self.search_terms = Some(terms.into());
        self
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(
            self.common,
            EntityType::Query,
            EntityType::Query,
            EntityDetails::Query {
                creator: self.creator,
                search_target: self.search_target,
                search_terms: self.search_terms,
            },
        )
    }
}

/// Builder for SearchResponse.
#[derive(Debug, Clone, Default)]
pub struct SearchResponseBuilder {
    common: CommonFields,
    search_provider: Option<Arc<Entity>>,
    search_target: Option<Arc<Entity>>,
    query: Option<Arc<Entity>>,
    search_results_item_count: Option<u32>,
    search_results: Vec<Arc<Entity>>,
}

impl SearchResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_provider(mut self, provider: impl Into<Arc<Entity>>) -> Self {
        self.search_provider = Some(provider.into());
        self
    }

    pub fn search_target(mut self, target: impl Into<Arc<Entity>>) -> Self {
        self.search_target = Some(target.into());
        self
    }

    pub fn query(mut self, query: impl Into<Arc<Entity>>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn search_results_item_count(mut self, count: u32) -> Self {
        self.search_results_item_count = Some(count);
        self
    }

    /// Adds a search result.
    pub fn search_result(mut self, result: impl Into<Arc<Entity>>) -> Self {
        self.search_results.push(result.into());
        self
    }

    /// Replaces the search results with a copy of `results`.
    pub fn search_results(mut self, results: &[Arc<Entity>]) -> Self {
        self.search_results = results.to_vec();
        self
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(
            self.common,
            EntityType::SearchResponse,
            EntityType::SearchResponse,
            EntityDetails::SearchResponse {
                search_provider: self.search_provider,
                search_target: self.search_target,
                query: self.query,
                search_results_item_count: self.search_results_item_count,
                search_results: self.search_results,
            },
        )
    }
}

// =============================================================================
// Membership
// =============================================================================

/// Builder for Membership.
#[derive(Debug, Clone, Default)]
pub struct MembershipBuilder {
    common: CommonFields,
    member: Option<Arc<Entity>>,
    organization: Option<Arc<Entity>>,
    roles: Vec<Role>,
    status: Option<Status>,
}

impl MembershipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member(mut self, member: impl Into<Arc<Entity>>) -> Self {
        self.member = Some(member.into());
        self
    }

    pub fn organization(mut self, organization: impl Into<Arc<Entity>>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Adds a role.
    pub fn role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Replaces the roles with a copy of `roles`.
    pub fn roles(mut self, roles: &[Role]) -> Self {
        self.roles = roles.to_vec();
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self) -> Result<Entity, ConformanceError> {
        finish(
            self.common,
            EntityType::Membership,
            EntityType::Membership,
            EntityDetails::Membership {
                member: self.member,
                organization: self.organization,
                roles: self.roles,
                status: self.status,
            },
        )
    }
}
