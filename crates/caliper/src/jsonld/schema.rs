//! Declared field order for every entity and event kind.
//!
//! Output order is the order of these lists, never the order in which
//! builder setters were called.

use crate::model::{EntityType, EventType};

/// Whether a field is emitted when absent or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Always emitted.
    Required,
    /// Omitted when absent.
    Optional,
    /// Collection omitted when absent or empty.
    NonEmpty,
}

/// A named output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub presence: Presence,
}

const fn required(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        presence: Presence::Required,
    }
}

const fn optional(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        presence: Presence::Optional,
    }
}

const fn non_empty(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        presence: Presence::NonEmpty,
    }
}

// =============================================================================
// Entities
// =============================================================================

const AGENT_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
];

const ORGANIZATION_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    optional("subOrganizationOf"),
];

const COURSE_SECTION_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    optional("courseNumber"),
    optional("academicSession"),
    optional("subOrganizationOf"),
];

const SOFTWARE_APPLICATION_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    optional("version"),
];

const RESOURCE_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    non_empty("creators"),
    optional("mediaType"),
    non_empty("keywords"),
    optional("isPartOf"),
    optional("datePublished"),
    optional("version"),
];

const FRAME_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    non_empty("creators"),
    optional("mediaType"),
    non_empty("keywords"),
    optional("isPartOf"),
    optional("datePublished"),
    optional("version"),
    required("index"),
];

const MESSAGE_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    non_empty("creators"),
    optional("mediaType"),
    non_empty("keywords"),
    optional("isPartOf"),
    optional("datePublished"),
    optional("version"),
    optional("replyTo"),
    optional("body"),
    non_empty("attachments"),
];

const SESSION_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    optional("user"),
    optional("startedAtTime"),
    optional("endedAtTime"),
    optional("duration"),
];

const MULTI_VALUED_RESPONSE_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    optional("assignable"),
    optional("actor"),
    non_empty("values"),
    optional("startedAtTime"),
    optional("endedAtTime"),
    optional("duration"),
];

const SINGLE_VALUED_RESPONSE_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    optional("assignable"),
    optional("actor"),
    optional("value"),
    optional("startedAtTime"),
    optional("endedAtTime"),
    optional("duration"),
];

const QUERY_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    optional("creator"),
    optional("searchTarget"),
    optional("searchTerms"),
];

const SEARCH_RESPONSE_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    optional("searchProvider"),
    optional("searchTarget"),
    optional("query"),
    optional("searchResultsItemCount"),
    non_empty("searchResults"),
];

const MEMBERSHIP_FIELDS: &[FieldSpec] = &[
    required("@id"),
    required("@type"),
    optional("name"),
    optional("description"),
    non_empty("extensions"),
    optional("dateCreated"),
    optional("dateModified"),
    optional("member"),
    optional("organization"),
    non_empty("roles"),
    optional("status"),
];

/// Returns the ordered output fields of an entity kind.
pub fn entity_fields(entity_type: EntityType) -> &'static [FieldSpec] {
    use EntityType::*;
    match entity_type {
        Entity | Agent | Person => AGENT_FIELDS,
        Organization | Group => ORGANIZATION_FIELDS,
        CourseSection => COURSE_SECTION_FIELDS,
        SoftwareApplication => SOFTWARE_APPLICATION_FIELDS,
        DigitalResource | Assessment | AssessmentItem | Chapter | Document | Forum
        | MediaObject | Page | Reading | Thread | WebPage => RESOURCE_FIELDS,
        Frame => FRAME_FIELDS,
        Message => MESSAGE_FIELDS,
        Session => SESSION_FIELDS,
        Response | FillinBlankResponse | MultipleResponseResponse | SelectTextResponse => {
            MULTI_VALUED_RESPONSE_FIELDS
        }
        MultipleChoiceResponse | TrueFalseResponse => SINGLE_VALUED_RESPONSE_FIELDS,
        Query => QUERY_FIELDS,
        SearchResponse => SEARCH_RESPONSE_FIELDS,
        Membership => MEMBERSHIP_FIELDS,
    }
}

// =============================================================================
// Events
// =============================================================================

const EVENT_FIELDS: &[FieldSpec] = &[
    required("@context"),
    optional("@id"),
    required("@type"),
    required("actor"),
    required("action"),
    required("object"),
    optional("target"),
    optional("generated"),
    optional("startedAtTime"),
    optional("endedAtTime"),
    optional("duration"),
    optional("edApp"),
    optional("group"),
    optional("membership"),
    optional("session"),
    non_empty("extensions"),
];

/// Returns the ordered output fields of an event kind.
///
/// Every standard kind shares one layout.
pub fn event_fields(_event_type: EventType) -> &'static [FieldSpec] {
    EVENT_FIELDS
}
