//! NPC gateway domain.
//!
//! The contract between the game and the language model: what an NPC reply
//! looks like, the schema the model is held to, and the value objects
//! inside it. No I/O lives here.

pub mod error;
pub mod npc_response;
pub mod schema;
pub mod value_objects;

pub use error::DomainError;
pub use npc_response::{CheckedReply, NpcResponse};
pub use schema::{
    FieldSpec, FieldType, ResponseSchema, SchemaWarning, NONE_SENTINEL, NPC_RESPONSE_SCHEMA,
};
pub use value_objects::Intimacy;
