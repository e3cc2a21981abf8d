//! Data Transfer Objects for REST request/response serialization.
//!
//! Domain types stay free of HTTP concerns; handlers convert them into
//! these flat, schema-documented shapes.

pub mod change_dto;
pub mod common_dto;
pub mod observation_dto;
pub mod report_dto;
pub mod state_dto;

pub use change_dto::*;
pub use common_dto::*;
pub use observation_dto::*;
pub use report_dto::*;
pub use state_dto::*;
