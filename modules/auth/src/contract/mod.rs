pub mod model;

pub use model::{Credentials, NewAccount, User};
