use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use caliper::jsonld::{to_json_string, to_jsonld, SerializeOptions};
use caliper::prelude::*;
use caliper::{ConformanceError, ErrorCode};

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

fn keys(value: &Value) -> Vec<String> {
    value.as_object().unwrap().keys().cloned().collect()
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn session_logout_serializes_in_declared_order() {
    let session = SessionBuilder::new()
        .id("https://example.edu/sessions/1f6442a482de72ea6ad134943812bff564a76259")
        .user(user())
        .started_at_time(at(10, 0))
        .ended_at_time(at(11, 5))
        .duration("PT3900S")
        .build()
        .unwrap();

    let event = EventBuilder::session_event()
        .id("urn:uuid:a438f8ac-1da3-4d48-8c86-94a1b387e0f6")
        .duration("PT3900S")
        .ended_at_time(at(11, 5))
        .started_at_time(at(10, 0))
        .session(session)
        .object(app())
        .action(Action::LoggedOut)
        .actor(user())
        .build()
        .unwrap();

    let json = to_jsonld(&event);
    assert_eq!(
        keys(&json),
        vec![
            "@context",
            "@id",
            "@type",
            "actor",
            "action",
            "object",
            "startedAtTime",
            "endedAtTime",
            "duration",
            "session",
        ]
    );
    assert_eq!(
        json,
        json!({
            "@context": "http://purl.imsglobal.org/ctx/caliper/v1p2",
            "@id": "urn:uuid:a438f8ac-1da3-4d48-8c86-94a1b387e0f6",
            "@type": "SessionEvent",
            "actor": {
                "@id": "https://example.edu/users/554433",
                "@type": "Person"
            },
            "action": "LoggedOut",
            "object": {
                "@id": "https://example.edu",
                "@type": "SoftwareApplication",
                "version": "v2"
            },
            "startedAtTime": "2016-11-15T10:00:00.000Z",
            "endedAtTime": "2016-11-15T11:05:00.000Z",
            "duration": "PT3900S",
            "session": {
                "@id": "https://example.edu/sessions/1f6442a482de72ea6ad134943812bff564a76259",
                "@type": "Session",
                "user": {
                    "@id": "https://example.edu/users/554433",
                    "@type": "Person"
                },
                "startedAtTime": "2016-11-15T10:00:00.000Z",
                "endedAtTime": "2016-11-15T11:05:00.000Z",
                "duration": "PT3900S"
            }
        })
    );

    let text = to_json_string(&event, &SerializeOptions::default()).unwrap();
    let context_at = text.find("@context").unwrap();
    let session_at = text.find("\"session\"").unwrap();
    assert!(context_at < session_at);
}

#[test]
fn session_logout_without_end_time_is_rejected() {
    let err = EventBuilder::session_event()
        .actor(user())
        .action(Action::LoggedOut)
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
    assert_eq!(err.code(), ErrorCode::MissingRequiredField);
}

#[test]
fn session_login_without_end_time_is_accepted() {
    let event = EventBuilder::session_event()
        .actor(user())
        .action(Action::LoggedIn)
        .object(app())
        .started_at_time(at(10, 0))
        .build()
        .unwrap();
    assert!(event.ended_at_time().is_none());
}

#[test]
fn session_logout_generating_session() {
    let session = SessionBuilder::new()
        .id("https://example.edu/sessions/1f6442a482de72ea6ad134943812bff564a76259")
        .user(user())
        .started_at_time(at(10, 0))
        .ended_at_time(at(11, 5))
        .build()
        .unwrap();

    let event = EventBuilder::session_event()
        .actor(user())
        .action(Action::LoggedOut)
        .object(app())
        .generated(session)
        .started_at_time(at(10, 0))
        .ended_at_time(at(11, 5))
        .build()
        .unwrap();

    let json = to_jsonld(&event);
    assert_eq!(json["generated"]["@type"], "Session");
    assert_eq!(json["generated"]["user"]["@type"], "Person");
    assert!(json.get("session").is_none());
    assert!(json.get("group").is_none());
}

// ============================================================================
// Action whitelist
// ============================================================================

#[test]
fn search_event_rejects_navigated_to() {
    let err = EventBuilder::search_event()
        .actor(user())
        .action(Action::NavigatedTo)
        .object(app())
        .started_at_time(at(10, 0))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        ConformanceError::ActionNotSupported {
            action: Action::NavigatedTo,
            event_type: EventType::Search,
        }
    );
}

#[test]
fn search_event_with_response() {
    let query = QueryBuilder::new()
        .id("https://example.edu/users/554433/search?query=IMS")
        .creator(user())
        .search_target(app())
        .search_terms("IMS AND (Caliper OR Analytics)")
        .build()
        .unwrap();
    let response = SearchResponseBuilder::new()
        .id("https://example.edu/users/554433/response?query=IMS")
        .search_provider(app())
        .query(query)
        .search_results_item_count(3)
        .build()
        .unwrap();

    let event = EventBuilder::search_event()
        .actor(user())
        .action(Action::Searched)
        .object(app())
        .generated(response)
        .started_at_time(at(10, 15))
        .build()
        .unwrap();

    let json = to_jsonld(&event);
    assert_eq!(json["generated"]["@type"], "SearchResponse");
    assert_eq!(json["generated"]["searchResultsItemCount"], 3);
    assert_eq!(json["generated"]["query"]["searchTerms"], "IMS AND (Caliper OR Analytics)");
}

#[test]
fn thread_event_marked_as_read() {
    let thread = DigitalResourceBuilder::thread()
        .id("https://example.edu/terms/201601/courses/7/sections/1/forums/1/topics/1")
        .name("Caliper Adoption")
        .build()
        .unwrap();

    let event = EventBuilder::thread_event()
        .actor(user())
        .action(Action::MarkedAsRead)
        .object(thread)
        .started_at_time(at(10, 15))
        .build()
        .unwrap();

    let json = to_jsonld(&event);
    assert_eq!(json["@type"], "ThreadEvent");
    assert_eq!(json["action"], "MarkedAsRead");
    assert_eq!(json["object"]["@type"], "Thread");

    let err = EventBuilder::thread_event()
        .actor(user())
        .action(Action::Posted)
        .object(event.object().clone())
        .started_at_time(at(10, 15))
        .build()
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ActionNotSupported);
}

#[test]
fn forum_event_subscribed() {
    let forum = DigitalResourceBuilder::forum()
        .id("https://example.edu/terms/201601/courses/7/sections/1/forums/1")
        .name("Caliper Forum")
        .build()
        .unwrap();

    let event = EventBuilder::forum_event()
        .actor(user())
        .action(Action::Subscribed)
        .object(forum)
        .started_at_time(at(10, 15))
        .build()
        .unwrap();

    let json = to_jsonld(&event);
    assert_eq!(json["@type"], "ForumEvent");
    assert_eq!(json["action"], "Subscribed");
    assert_eq!(json["object"]["@type"], "Forum");

    let err = EventBuilder::forum_event()
        .actor(user())
        .action(Action::Unsubscribed)
        .object(app())
        .started_at_time(at(10, 15))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ConformanceError::TypeMismatch {
            field: "object",
            expected: "Forum".to_string(),
            actual: "SoftwareApplication".to_string(),
        }
    );
}

#[test]
fn message_event_read_states() {
    let message = MessageBuilder::new()
        .id("https://example.edu/terms/201601/courses/7/sections/1/forums/1/topics/1/messages/2")
        .body("Are the Caliper Sensor reference implementations production ready?")
        .build()
        .unwrap();
    let message = Arc::new(message);

    for action in [Action::MarkedAsRead, Action::MarkedAsUnread] {
        let event = EventBuilder::message_event()
            .actor(user())
            .action(action)
            .object(message.clone())
            .started_at_time(at(10, 15))
            .build()
            .unwrap();
        assert_eq!(event.action(), action);
        assert_eq!(to_jsonld(&event)["object"]["@type"], "Message");
    }
}

// ============================================================================
// Object and value constraints
// ============================================================================

#[test]
fn message_event_rejects_non_message_object() {
    let thread = DigitalResourceBuilder::thread()
        .id("https://example.edu/terms/201601/courses/7/sections/1/forums/1/topics/1")
        .build()
        .unwrap();

    let err = EventBuilder::message_event()
        .actor(user())
        .action(Action::Posted)
        .object(thread)
        .started_at_time(at(10, 15))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        ConformanceError::TypeMismatch {
            field: "object",
            expected: "Message".to_string(),
            actual: "Thread".to_string(),
        }
    );
}

#[test]
fn coerced_entity_serializes_as_id() {
    let section = CourseSectionBuilder::new()
        .id("https://example.edu/terms/201601/courses/7/sections/1")
        .coerced_to_id(true)
        .build()
        .unwrap();
    let page = DigitalResourceBuilder::page()
        .id("https://example.edu/politics/page/2")
        .build()
        .unwrap();

    let event = EventBuilder::navigation_event()
        .actor(user())
        .action(Action::NavigatedTo)
        .object(page)
        .group(section)
        .started_at_time(at(10, 15))
        .build()
        .unwrap();

    let json = to_jsonld(&event);
    assert_eq!(
        json["group"],
        "https://example.edu/terms/201601/courses/7/sections/1"
    );
    assert_eq!(json["object"]["@type"], "Page");
}

#[test]
fn extensions_render_in_key_order() {
    let event = EventBuilder::view_event()
        .actor(user())
        .action(Action::Viewed)
        .object(app())
        .started_at_time(at(10, 15))
        .extension("zeta", 1)
        .extension("alpha", "first")
        .extension("mid", vec!["a", "b"])
        .build()
        .unwrap();

    let json = to_jsonld(&event);
    assert_eq!(keys(&json["extensions"]), vec!["alpha", "mid", "zeta"]);
    assert_eq!(json["extensions"]["mid"], json!(["a", "b"]));
}

#[test]
fn single_valued_response_rejects_two_values() {
    let err = ResponseBuilder::multiple_choice()
        .id("https://example.edu/responses/1")
        .values(&["A", "B"])
        .build()
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CardinalityExceeded);
}

#[test]
fn built_values_are_unaffected_by_caller_lists() {
    let mut keywords = vec!["caliper".to_string()];
    let document = DigitalResourceBuilder::document()
        .id("https://example.edu/docs/1")
        .keywords(&keywords)
        .build()
        .unwrap();

    keywords.push("analytics".to_string());
    assert_eq!(document.resource().unwrap().keywords, vec!["caliper"]);
}
