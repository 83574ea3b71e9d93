//! Photo dialogue module for handling conversation state with users.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage, InMemStorageError};

/// Represents the conversation state of a chat
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationState {
    /// No conversation; only `/start` is accepted
    #[default]
    Idle,
    /// Waiting for photos to describe
    Photo,
}

/// Type alias for our photo dialogue
pub type VisionDialogue = Dialogue<ConversationState, InMemStorage<ConversationState>>;

/// An incoming message, reduced to what the state machine cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversationInput {
    Start,
    Photo,
    PhotoCommand,
    Cancel,
    Other,
}

/// What the bot does in response to an input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversationAction {
    Greet,
    DescribePhoto,
    Farewell,
    Ignore,
}

/// What happens to the stored state afterwards
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NextState {
    Keep,
    Set(ConversationState),
    /// Conversation ended; storage is cleared
    End,
}

impl NextState {
    /// Persist the transition in the dialogue storage
    pub async fn apply(&self, dialogue: &VisionDialogue) -> Result<(), InMemStorageError> {
        match self {
            NextState::Keep => Ok(()),
            NextState::Set(state) => dialogue.update(state.clone()).await,
            NextState::End => dialogue.exit().await,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub action: ConversationAction,
    pub next: NextState,
}

/// Decide the action and next state for `input` received in `state`
pub fn transition(state: &ConversationState, input: ConversationInput) -> Transition {
    use ConversationAction::*;

    let (action, next) = match (state, input) {
        (_, ConversationInput::Start) => (Greet, NextState::Set(ConversationState::Photo)),
        (ConversationState::Idle, _) => (Ignore, NextState::Keep),
        (ConversationState::Photo, ConversationInput::Photo | ConversationInput::PhotoCommand) => {
            (DescribePhoto, NextState::Keep)
        }
        (ConversationState::Photo, ConversationInput::Cancel) => (Farewell, NextState::End),
        (ConversationState::Photo, ConversationInput::Other) => (Ignore, NextState::Keep),
    };

    Transition { action, next }
}
