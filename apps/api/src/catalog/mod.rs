// Companies and the roles they offer.
// Roles are listed per applicant so the profile form can offer them as the active role.

pub mod handlers;
pub mod queries;
