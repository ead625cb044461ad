//! Builds a sample session logout event and prints it as JSON-LD.

use caliper::jsonld::{to_json_string, SerializeOptions};
use caliper::prelude::*;
use chrono::{TimeZone, Utc};

fn main() {
    let pretty = std::env::args().nth(1).as_deref() != Some("--compact");

    let user = AgentBuilder::person()
        .id("https://example.edu/users/554433")
        .build()
        .expect("Failed to build user");

    let app = SoftwareApplicationBuilder::new()
        .id("https://example.edu")
        .version("v2")
        .build()
        .expect("Failed to build application");

    let started = Utc.with_ymd_and_hms(2016, 11, 15, 10, 0, 0).unwrap();
    let ended = Utc.with_ymd_and_hms(2016, 11, 15, 11, 5, 0).unwrap();

    let session = SessionBuilder::new()
        .id("https://example.edu/sessions/1f6442a482de72ea6ad134943812bff564a76259")
        .user(user.clone())
        .started_at_time(started)
        .ended_at_time(ended)
        .duration("PT3900S")
        .build()
        .expect("Failed to build session");

    let event = EventBuilder::session_event()
        .generate_id()
        .actor(user)
        .action(Action::LoggedOut)
        .object(app)
        .started_at_time(started)
        .ended_at_time(ended)
        .session(session)
        .build()
        .expect("Failed to build event");

    let options = SerializeOptions { pretty };
    let json = to_json_string(&event, &options).expect("Failed to render event");
    println!("{}", json);

    // The same event with a start after its end is rejected
    let rejected = EventBuilder::session_event()
        .actor(event.actor().clone())
        .action(Action::LoggedOut)
        .object(event.object().clone())
        .started_at_time(ended)
        .ended_at_time(started)
        .build();
    if let Err(err) = rejected {
        eprintln!("rejected ({}): {}", err.code().code(), err);
    }
}
