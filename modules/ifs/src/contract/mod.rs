pub mod client;
pub mod error;
pub mod model;

pub use client::IfsApi;
pub use error::IfsError;
pub use model::{
    AbstractionLevel, JournalEntry, JournalPatch, NewJournal, NewPart, NewRelationship, Part,
    PartPatch, PartRole, Relationship, RelationshipPatch, SystemExport, SystemOverview,
    SystemStats,
};
