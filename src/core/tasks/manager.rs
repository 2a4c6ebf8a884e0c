use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    agent::AgentHandle,
    core::{
        pipeline,
        JapaneseWord,
        SelectedImage,
    },
    mochi,
};

/// Owns the tokio runtime and the channel the GUI polls every frame. Each
/// operation runs on its own thread so the UI never blocks on the network.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));

        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    /// Probes the filesystem for the agent executable. Runs off-thread since
    /// it may shell out to `which`.
    pub fn locate_agent(&self) {
        let (sender, _) = self.task_context();

        thread::spawn(move || {
            let handle = AgentHandle::locate();
            let _ = sender.send(TaskResult::AgentLocated(handle));
        });
    }

    pub fn parse_image(&self, image: SelectedImage, ocr_token: String, agent: AgentHandle) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let progress_sender = sender.clone();

            let result = runtime.block_on(async {
                pipeline::extract_words(&image, &ocr_token, &agent, |message| {
                    let _ = progress_sender.send(TaskResult::PipelineProgress(message));
                })
                .await
                .map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::WordsParsed(result));
        });
    }

    pub fn publish_deck(&self, api_key: String, deck_name: String, words: Vec<JapaneseWord>) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let progress_sender = sender.clone();

            let result = runtime.block_on(async {
                mochi::publish_deck(&api_key, &deck_name, &words, |processed, total| {
                    let _ = progress_sender.send(TaskResult::DeckProgress { processed, total });
                })
                .await
                .map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::DeckPublished(result));
        });
    }

    pub fn fetch_cards(&self, api_key: String, deck_id: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                mochi::fetch_cards(&api_key, &deck_id).await.map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::CardsFetched(result));
        });
    }
}
