//! Application layer driving the browser switch handoff.
//!
//! `builder` turns authorization parameters into switch options, `launcher`
//! starts the switch and classifies the outcome, and `reconciler` turns the
//! return payload back into a typed result. None of them hold state between
//! calls: the started token is owned by the caller.

pub mod builder;
pub mod launcher;
pub mod reconciler;
