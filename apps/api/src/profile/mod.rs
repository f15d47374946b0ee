// User profiles: registration, lookup, and the patch-style profile edit.
// `form` holds the client-side view model of the profile edit card.

pub mod form;
pub mod handlers;
pub mod password;
pub mod queries;
