//! NPC use cases.
//!
//! Handles generating an NPC's next conversational state.

use std::sync::Arc;

mod reply;

pub use reply::{GenerateNpcReply, NpcReplyError};

/// Container for NPC use cases.
pub struct NpcUseCases {
    pub reply: Arc<GenerateNpcReply>,
}

impl NpcUseCases {
    pub fn new(reply: Arc<GenerateNpcReply>) -> Self {
        Self { reply }
    }
}
