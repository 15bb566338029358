//! Community wall: who has signed up as a supporter, and the form to join.

pub mod avatar;
pub mod handle;
pub mod roster;
pub mod store;
mod wall;

pub use wall::CommunityWall;
