pub mod appointment;
pub mod classification;
pub mod conversation;
pub mod enums;
pub mod provider;
pub mod symptom;
pub mod triage;

pub use appointment::*;
pub use classification::*;
pub use conversation::*;
pub use enums::*;
pub use provider::*;
pub use symptom::*;
pub use triage::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
