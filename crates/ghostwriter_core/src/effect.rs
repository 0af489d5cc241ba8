#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Persist the API key and tone before a generation attempt.
    SaveSettings { api_key: String, tone: String },
    /// Liveness round trip to the page agent.
    Probe,
    /// Load a fresh page agent into the page.
    InjectAgent,
    /// Ask the page agent for candidate post text.
    Extract,
    /// Request a completion from the remote provider.
    Generate {
        text: String,
        tone: String,
        api_key: String,
    },
    /// Hand the reply to the page agent for insertion.
    DeliverInsertion { text: String },
    /// Persist the generated reply so the popup can restore it.
    SaveReply { reply: String },
    /// Drop the persisted reply.
    ClearSavedReply,
    /// Surface the reply on the clipboard.
    CopyReply { text: String },
}
