//! Domain models for scheme members and leavers.

pub mod leaver;
pub mod member;
pub mod types;

pub use leaver::LeaverRecord;
pub use member::MemberRecord;
pub use types::{MemberType, RelationshipRole, Sex};
