//! Caliper: conformant learning-activity events for IMS Caliper Analytics.
//!
//! This crate provides immutable entity and event values, builders that
//! validate on construction, and a JSON-LD renderer with a fixed field order.
//!
//! # Overview
//!
//! An event records that an agent performed an action on an object:
//! - **Validated on build**: every `build()` checks type tags, required
//!   fields, the action vocabulary of the event kind, time ordering and
//!   duration syntax before returning a value
//! - **Immutable**: built values expose accessors only
//! - **Shared**: entities are held by `Arc` and may be referenced by many
//!   events
//!
//! # Quick Start
//!
//! ```rust
//! use caliper::prelude::*;
//! use caliper::jsonld::{to_json_string, SerializeOptions};
//! use chrono::{TimeZone, Utc};
//!
//! let user = AgentBuilder::person()
//!     .id("https://example.edu/users/554433")
//!     .build()
//!     .unwrap();
//! let app = SoftwareApplicationBuilder::new()
//!     .id("https://example.edu")
//!     .version("v2")
//!     .build()
//!     .unwrap();
//!
//! let event = EventBuilder::session_event()
//!     .actor(user)
//!     .action(Action::LoggedIn)
//!     .object(app)
//!     .started_at_time(Utc.with_ymd_and_hms(2016, 11, 15, 10, 15, 0).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let json = to_json_string(&event, &SerializeOptions::default()).unwrap();
//! assert!(json.starts_with(r#"{"@context":"http://purl.imsglobal.org/ctx/caliper/v1p2""#));
//!
//! // Actions outside the kind's vocabulary are rejected
//! let err = EventBuilder::search_event()
//!     .actor(event.actor().clone())
//!     .action(Action::NavigatedTo)
//!     .object(event.object().clone())
//!     .build()
//!     .unwrap_err();
//! assert_eq!(err.code().code(), "C003");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Vocabularies, entities, events and their builders
//! - [`profile`]: Action compatibility table
//! - [`validate`]: Conformance validators
//! - [`jsonld`]: JSON-LD rendering
//! - [`error`]: Error types
//! - [`util`]: ISO 8601 duration parsing

pub mod error;
pub mod jsonld;
pub mod model;
pub mod profile;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use error::{ConformanceError, ErrorCode, SerializeError};
pub use jsonld::{SerializeOptions, entity_to_jsonld, to_json_string, to_jsonld};
pub use model::{
    Action, Entity, EntityType, Event, EventBuilder, EventType, ExtensionValue, Extensions,
    JsonldContext, Role, Status,
};
pub use profile::{ActionTable, ActionTableBuilder, EventProfile};
pub use validate::{EntityValidator, EventValidator, TimeValidator};

/// Builders, draft traits and vocabularies in one import.
pub mod prelude {
    pub use crate::model::{
        Action, AgentBuilder, CourseSectionBuilder, DigitalResourceBuilder, Entity, EntityDraft,
        EntityType, Event, EventBuilder, EventType, FrameBuilder, IntervalDraft, JsonldContext,
        MembershipBuilder, MessageBuilder, OrganizationBuilder, QueryBuilder, ResourceDraft,
        ResponseBuilder, Role, SearchResponseBuilder, SessionBuilder, SoftwareApplicationBuilder,
        Status,
    };
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Caliper Analytics specification version this crate implements.
pub const SPEC_VERSION: &str = "1.2";
