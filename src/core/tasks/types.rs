use crate::{
    agent::AgentHandle,
    core::{
        DeckResult,
        JapaneseWord,
        RemoteCard,
    },
};

/// Everything background tasks report back to the GUI. Errors cross the
/// channel as strings; the typed errors stop at the task boundary.
#[derive(Debug, Clone)]
pub enum TaskResult {
    AgentLocated(Option<AgentHandle>),

    PipelineProgress(String),
    WordsParsed(Result<Vec<JapaneseWord>, String>),

    DeckProgress { processed: usize, total: usize },
    DeckPublished(Result<DeckResult, String>),

    CardsFetched(Result<Vec<RemoteCard>, String>),
}
