// Negotiation practice over a hosted video service.
// The server only mints access tokens; media signalling stays with the service.
// `room` models the client's join/leave bookkeeping behind a media surface.

pub mod handlers;
pub mod room;
pub mod token;
