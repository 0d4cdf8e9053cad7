//! # Chat Example
//!
//! A chat transcript plus the message currently being typed.
//!
//! Typing updates the draft with `SetCurrentMessage`; pressing enter sends
//! `AddMessage`, which appends to the transcript and clears the draft.

use parlour_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Author name used for messages typed locally
pub const ME: &str = "me";

/// A message in the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Position-derived id, starting at 1
    pub id: usize,
    /// Message text
    pub content: String,
    /// Author name
    pub from: String,
}

impl Message {
    fn new(id: usize, content: &str, from: &str) -> Self {
        Self {
            id,
            content: content.to_string(),
            from: from.to_string(),
        }
    }
}

/// Chat state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    /// Transcript, oldest first
    pub messages: Vec<Message>,
    /// Draft being typed
    pub current_message: String,
}

impl Default for ChatState {
    /// The seeded conversation
    fn default() -> Self {
        Self {
            messages: vec![
                Message::new(1, "Hey", ME),
                Message::new(2, "How are you", "Steve"),
                Message::new(3, "I am good", ME),
                Message::new(4, "whats up", ME),
                Message::new(5, "all good", "Steve"),
            ],
            current_message: String::new(),
        }
    }
}

/// Chat actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    /// Replace the whole transcript
    SetMessages(Vec<Message>),
    /// Append a message and clear the draft
    AddMessage {
        /// Message text
        content: String,
        /// Author name
        from: String,
    },
    /// Replace the draft
    SetCurrentMessage(String),
}

/// Chat reducer
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatReducer;

impl Reducer for ChatReducer {
    type State = ChatState;
    type Action = ChatAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ChatAction::SetMessages(messages) => state.messages = messages,
            ChatAction::AddMessage { content, from } => {
                let id = state.messages.len() + 1;
                state.messages.push(Message { id, content, from });
                state.current_message.clear();
            },
            ChatAction::SetCurrentMessage(draft) => state.current_message = draft,
        }

        smallvec![Effect::None]
    }
}

/// Actions for one line typed into the input box
///
/// The draft is updated first; a non-blank line is then sent as "me".
#[must_use]
pub fn actions_for_line(line: &str) -> Vec<ChatAction> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut actions = vec![ChatAction::SetCurrentMessage(line.to_string())];
    if !line.trim().is_empty() {
        actions.push(ChatAction::AddMessage {
            content: line.to_string(),
            from: ME.to_string(),
        });
    }
    actions
}
