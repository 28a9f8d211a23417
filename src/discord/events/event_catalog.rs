// Discord event handlers.
// Each group of gateway events gets its own file.

pub mod errors;

pub mod member_events;

pub mod presence_events;

pub mod startup;
