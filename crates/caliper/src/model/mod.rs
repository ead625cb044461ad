//! Data model types for Caliper.
//!
//! This module contains the core vocabulary and values:
//! - Type tags and actions (closed vocabularies)
//! - Entities and events (immutable, validated on build)
//! - Extension values, roles and statuses
//! - Builders (the only way to obtain an entity or event)

pub mod action;
pub mod builder;
pub mod context;
pub mod entity;
pub mod event;
pub mod types;
pub mod value;

pub use action::Action;
pub use builder::{
    AgentBuilder, CommonFields, CourseSectionBuilder, DigitalResourceBuilder, EntityDraft,
    FrameBuilder, IntervalDraft, MembershipBuilder, MessageBuilder, OrganizationBuilder,
    QueryBuilder, ResourceDraft, ResponseBuilder, SearchResponseBuilder, SessionBuilder,
    SoftwareApplicationBuilder,
};
pub use context::{CONTEXT_V1P1, CONTEXT_V1P2, JsonldContext};
pub use entity::{Entity, EntityDetails, IntervalFields, ResourceFields};
pub use event::{Event, EventBuilder};
pub use types::{EntityType, EventType, UnknownTerm};
pub use value::{ExtensionValue, Extensions, NullExtensionValue, Role, Status};
