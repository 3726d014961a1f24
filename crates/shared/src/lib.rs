//! NPC gateway protocol - wire types shared with the game server.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and serde_json
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Bit-exact envelope** - field names and messages are a contract with
//!    an existing client and never change

pub mod requests;
pub mod responses;

pub use requests::ChatRequest;
pub use responses::{
    ResponseEnvelope, CLIENT_NOT_INITIALIZED_MESSAGE, MISSING_TXT_MESSAGE,
    UNEXPECTED_ERROR_PREFIX, UPSTREAM_ERROR_PREFIX,
};
