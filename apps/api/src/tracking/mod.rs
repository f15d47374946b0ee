// Job applications, the offers they lead to, and user milestones.
// Application locations double as the city list for job-posting search.

pub mod handlers;
pub mod queries;
