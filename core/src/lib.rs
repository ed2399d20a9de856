// Manual seats - field bridge core
//
// Platform-independent logic of the upload/download widgets: validity
// predicates, filename rules, download payloads, widget configuration and
// the FieldBridge controller.

pub mod bridge;
pub mod config;
pub mod download;
pub mod errors;
pub mod filename;
pub mod models;
pub mod validation;

pub use bridge::*;
pub use config::*;
pub use download::*;
pub use errors::*;
pub use filename::*;
pub use models::*;
pub use validation::*;
