pub mod journal;
pub mod part;
pub mod relationship;
pub mod system;
