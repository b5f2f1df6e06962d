//! jpat source location definitions. Switches and their case labels carry a
//! [location::Span] so that diagnostics can point back at them.
pub mod location;
