//! Conformance validation.
//!
//! Validators are stateless: each check takes the values it inspects and
//! returns the first violated rule as a [`ConformanceError`]. Builders call
//! them on the assembled candidate before handing it out, so a built entity
//! or event has always passed every check here.
//!
//! [`ConformanceError`]: crate::error::ConformanceError

mod entity;
mod event;
mod time;

pub use entity::EntityValidator;
pub use event::EventValidator;
pub use time::TimeValidator;
