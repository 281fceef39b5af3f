use crate::*;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays a fixed queue of replies and records every prompt it was asked.
#[derive(Debug, Default)]
pub struct Canned {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl Canned {
    pub fn new<S: Into<String>>(replies: impl IntoIterator<Item = S>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }
    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl Oracle for Canned {
    async fn ask(&self, prompt: &Prompt) -> anyhow::Result<String> {
        self.prompts
            .lock()
            .map_err(|_| anyhow::anyhow!("canned prompt log poisoned"))?
            .push(prompt.clone());
        self.replies
            .lock()
            .map_err(|_| anyhow::anyhow!("canned replies poisoned"))?
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no canned reply left"))
    }
}
