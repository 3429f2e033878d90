//! Request gatekeeper.
//!
//! Flow Overview: read the token (cookie first, then `Authorization`), classify
//! the path, and pick one of three outcomes: redirect an already signed-in
//! client away from `/login`/`/register`, redirect an anonymous client away
//! from protected prefixes, or forward the request. API calls that carry a
//! token are forwarded with `Authorization: Bearer <token>` so downstream
//! handlers only need to read headers.
//!
//! The decision is a pure function of the path and of token *presence*; the
//! token value never reaches [`decide`]. Paths listed in [`Exclusions`] skip
//! the gatekeeper entirely and are filtered before a decision is made.

mod decision;
mod matcher;
mod middleware;
mod token;

pub use decision::{Decision, GatePolicy, PathClass, decide};
pub use matcher::{DEFAULT_EXCLUSIONS, Exclusions};
pub use middleware::{Gatekeeper, gate};
pub use token::{bearer_header, extract_token};
