//! Closed type vocabularies for entities and events.
//!
//! Entity types form a shallow hierarchy rooted at [`EntityType::Entity`];
//! every concrete kind fixes its type to exactly one of these constants.

use std::fmt;
use std::str::FromStr;

/// Entity type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityType {
    Entity,

    // Agents
    Agent,
    Person,
    Organization,
    Group,
    CourseSection,
    SoftwareApplication,

    // Resources
    DigitalResource,
    Assessment,
    AssessmentItem,
    Chapter,
    Document,
    Forum,
    Frame,
    MediaObject,
    Message,
    Page,
    Reading,
    Thread,
    WebPage,

    // Responses
    Response,
    FillinBlankResponse,
    MultipleChoiceResponse,
    MultipleResponseResponse,
    SelectTextResponse,
    TrueFalseResponse,

    Membership,
    Query,
    SearchResponse,
    Session,
}

impl EntityType {
    /// All entity types, in declaration order.
    pub const ALL: [EntityType; 30] = [
        EntityType::Entity,
        EntityType::Agent,
        EntityType::Person,
        EntityType::Organization,
        EntityType::Group,
        EntityType::CourseSection,
        EntityType::SoftwareApplication,
        EntityType::DigitalResource,
        EntityType::Assessment,
        EntityType::AssessmentItem,
        EntityType::Chapter,
        EntityType::Document,
        EntityType::Forum,
        EntityType::Frame,
        EntityType::MediaObject,
        EntityType::Message,
        EntityType::Page,
        EntityType::Reading,
        EntityType::Thread,
        EntityType::WebPage,
        EntityType::Response,
        EntityType::FillinBlankResponse,
        EntityType::MultipleChoiceResponse,
        EntityType::MultipleResponseResponse,
        EntityType::SelectTextResponse,
        EntityType::TrueFalseResponse,
        EntityType::Membership,
        EntityType::Query,
        EntityType::SearchResponse,
        EntityType::Session,
    ];

    /// Returns the vocabulary term used as the JSON-LD `@type`.
    pub fn term(self) -> &'static str {
        match self {
            EntityType::Entity => "Entity",
            EntityType::Agent => "Agent",
            EntityType::Person => "Person",
            EntityType::Organization => "Organization",
            EntityType::Group => "Group",
            EntityType::CourseSection => "CourseSection",
            EntityType::SoftwareApplication => "SoftwareApplication",
            EntityType::DigitalResource => "DigitalResource",
            EntityType::Assessment => "Assessment",
            EntityType::AssessmentItem => "AssessmentItem",
            EntityType::Chapter => "Chapter",
            EntityType::Document => "Document",
            EntityType::Forum => "Forum",
            EntityType::Frame => "Frame",
            EntityType::MediaObject => "MediaObject",
            EntityType::Message => "Message",
            EntityType::Page => "Page",
            EntityType::Reading => "Reading",
            EntityType::Thread => "Thread",
            EntityType::WebPage => "WebPage",
            EntityType::Response => "Response",
            EntityType::FillinBlankResponse => "FillinBlankResponse",
            EntityType::MultipleChoiceResponse => "MultipleChoiceResponse",
            EntityType::MultipleResponseResponse => "MultipleResponseResponse",
            EntityType::SelectTextResponse => "SelectTextResponse",
            EntityType::TrueFalseResponse => "TrueFalseResponse",
            EntityType::Membership => "Membership",
            EntityType::Query => "Query",
            EntityType::SearchResponse => "SearchResponse",
            EntityType::Session => "Session",
        }
    }

    /// Returns the immediate supertype, or None for the root.
    pub fn parent(self) -> Option<EntityType> {
        use EntityType::*;
        match self {
            Entity => None,
            Agent | DigitalResource | Response | Membership | Query | SearchResponse | Session => {
                Some(Entity)
            }
            Person | Organization | SoftwareApplication => Some(Agent),
            Group | CourseSection => Some(Organization),
            Assessment | AssessmentItem | Chapter | Document | Forum | Frame | MediaObject
            | Message | Page | Reading | Thread | WebPage => Some(DigitalResource),
            FillinBlankResponse
            | MultipleChoiceResponse
            | MultipleResponseResponse
            | SelectTextResponse
            | TrueFalseResponse => Some(Response),
        }
    }

    /// Returns true if this type is `ancestor` or descends from it.
    pub fn is_a(self, ancestor: EntityType) -> bool {
        let mut current = Some(self);
        while let Some(t) = current {
            if t == ancestor {
                return true;
            }
            current = t.parent();
        }
        false
    }

    /// Returns true for agent types (valid event actors).
    pub fn is_agent(self) -> bool {
        self.is_a(EntityType::Agent)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.term())
    }
}

impl FromStr for EntityType {
    type Err = UnknownTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .into_iter()
            .find(|t| t.term() == s)
            .ok_or_else(|| UnknownTerm(s.to_string()))
    }
}

/// Event type tags, one per event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    /// The generic event; accepts every action.
    Event,
    Annotation,
    Assessment,
    AssessmentItem,
    Assignable,
    Forum,
    Grade,
    Media,
    Message,
    Navigation,
    Search,
    Session,
    Thread,
    ToolUse,
    View,
}

impl EventType {
    /// All event types, in declaration order.
    pub const ALL: [EventType; 15] = [
        EventType::Event,
        EventType::Annotation,
        EventType::Assessment,
        EventType::AssessmentItem,
        EventType::Assignable,
        EventType::Forum,
        EventType::Grade,
        EventType::Media,
        EventType::Message,
        EventType::Navigation,
        EventType::Search,
        EventType::Session,
        EventType::Thread,
        EventType::ToolUse,
        EventType::View,
    ];

    /// Returns the vocabulary term used as the JSON-LD `@type`.
    pub fn term(self) -> &'static str {
        match self {
            EventType::Event => "Event",
            EventType::Annotation => "AnnotationEvent",
            EventType::Assessment => "AssessmentEvent",
            EventType::AssessmentItem => "AssessmentItemEvent",
            EventType::Assignable => "AssignableEvent",
            EventType::Forum => "ForumEvent",
            EventType::Grade => "GradeEvent",
            EventType::Media => "MediaEvent",
            EventType::Message => "MessageEvent",
            EventType::Navigation => "NavigationEvent",
            EventType::Search => "SearchEvent",
            EventType::Session => "SessionEvent",
            EventType::Thread => "ThreadEvent",
            EventType::ToolUse => "ToolUseEvent",
            EventType::View => "ViewEvent",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.term())
    }
}

impl FromStr for EventType {
    type Err = UnknownTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.term() == s)
            .ok_or_else(|| UnknownTerm(s.to_string()))
    }
}

/// A string that is not part of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vocabulary term: {0}")]
pub struct UnknownTerm(pub String);
