//! Locates the local `claude` executable and drives one extraction run over
//! its stream-json protocol.

pub mod events;

use std::{
    path::{
        Path,
        PathBuf,
    },
    process::Stdio,
};

use tokio::{
    io::{
        AsyncBufReadExt,
        AsyncReadExt,
        AsyncWriteExt,
        BufReader,
    },
    process::Command,
};

use self::events::{
    AgentEvent,
    ContentBlock,
};
use crate::core::{
    MochimineError,
    SelectedImage,
};

const SYSTEM_PROMPT: &str = "You are a Japanese vocabulary extraction expert. \
    Locate the Japanese text in the image you are given and respond only with JSON.";

const MAX_TURNS: &str = "10";

pub fn build_prompt(ocr_text: &str) -> String {
    format!(
        "Extract the Japanese vocabulary words visible in the attached image.\n\
         An OCR pass over the same image produced the text below. Use it as a hint, \
         but only report words you can actually see in the image:\n\n\
         {ocr_text}\n\n\
         Respond with a JSON array of objects in exactly this shape:\n\
         [\n  {{\n    \"word\": \"漢字またはひらがな\",\n    \"reading\": \"ひらがなよみ\",\n    \
         \"meaning\": \"English meaning\",\n    \"furigana\": \"{{漢}}(かん){{字}}(じ)\"\n  }}\n]\n\n\
         Annotate each kanji individually in the furigana field:\n\
         - 日本語 -> {{日}}(に){{本}}(ほん){{語}}(ご)\n\
         - 食べる -> {{食}}(た)べる\n\
         - words written only in kana stay as they are\n\n\
         If the image contains no Japanese, respond with an empty array [].\n\
         Respond with JSON only, no other commentary."
    )
}

fn scan_versions(base: &Path, sub_path: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(base) else {
        return Vec::new();
    };
    entries.filter_map(|entry| entry.ok()).map(|entry| entry.path().join(sub_path)).collect()
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> =
        ["/usr/local/bin/claude", "/opt/homebrew/bin/claude", "/usr/bin/claude"]
            .iter()
            .map(PathBuf::from)
            .collect();

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".npm-global/bin/claude"));
        paths.push(home.join(".local/bin/claude"));
        paths.extend(scan_versions(&home.join(".nvm/versions/node"), "bin/claude"));
        paths.extend(scan_versions(&home.join(".volta/tools/image/node"), "bin/claude"));
        paths.extend(scan_versions(&home.join(".asdf/installs/nodejs"), "bin/claude"));
    }

    paths
}

fn which_claude() -> Option<PathBuf> {
    let finder = if cfg!(windows) { "where" } else { "which" };
    let output = std::process::Command::new(finder).arg("claude").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next()?.trim();
    if first.is_empty() {
        None
    } else {
        Some(PathBuf::from(first))
    }
}

pub fn find_agent() -> Option<PathBuf> {
    candidate_paths().into_iter().find(|path| path.exists()).or_else(which_claude)
}

/// A located agent executable. Cheap to clone into background tasks.
#[derive(Debug, Clone)]
pub struct AgentHandle {
    path: PathBuf,
}

impl AgentHandle {
    pub fn locate() -> Option<Self> {
        find_agent().map(|path| Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One extraction run: send the image and prompt as a single multimodal
    /// user message, accumulate text from the event stream, return the raw
    /// accumulated text. Progress fires on every event we understand.
    pub async fn run(
        &self,
        image: &SelectedImage,
        prompt: &str,
        progress: &mut dyn FnMut(String),
    ) -> Result<String, MochimineError> {
        let mut child = Command::new(&self.path)
            .arg("--print")
            .arg("--input-format")
            .arg("stream-json")
            .arg("--output-format")
            .arg("stream-json")
            .arg("--include-partial-messages")
            .arg("--max-turns")
            .arg(MAX_TURNS)
            .arg("--permission-mode")
            .arg("bypassPermissions")
            .arg("--system-prompt")
            .arg(SYSTEM_PROMPT)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let block_type =
            if image.media_type == "application/pdf" { "document" } else { "image" };
        let input = serde_json::json!({
            "type": "user",
            "message": {
                "role": "user",
                "content": [
                    {
                        "type": block_type,
                        "source": {
                            "type": "base64",
                            "media_type": image.media_type,
                            "data": image.base64,
                        },
                    },
                    { "type": "text", "text": prompt },
                ],
            },
        });

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| MochimineError::Custom("agent stdin unavailable".to_string()))?;
        let line = serde_json::to_string(&input)?;
        stdin.write_all(line.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        drop(stdin);

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| MochimineError::Custom("agent stdout unavailable".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| MochimineError::Custom("agent stderr unavailable".to_string()))?;

        // Drain stderr on the side so a chatty agent cannot block the pipe.
        let stderr_task = tokio::spawn(async move {
            let mut buffer = String::new();
            let _ = stderr.read_to_string(&mut buffer).await;
            buffer
        });

        let mut accumulated = String::new();
        let mut lines = BufReader::new(stdout).lines();

        while let Some(line) = lines.next_line().await? {
            let event = match serde_json::from_str::<AgentEvent>(&line) {
                Ok(event) => event,
                Err(_) => continue,
            };

            match event {
                AgentEvent::StreamEvent { event } => {
                    if let Some(text) = event.delta.and_then(|delta| delta.text) {
                        accumulated.push_str(&text);
                        progress(text.replace('\n', " "));
                    }
                }
                AgentEvent::Assistant { message } => {
                    for block in message.content {
                        if let ContentBlock::Text { text } = block {
                            // Deltas already captured this turn when partial
                            // messages are on; only keep the full text if not.
                            if accumulated.is_empty() {
                                accumulated.push_str(&text);
                            }
                            let preview: String = text.chars().take(100).collect();
                            progress(preview.replace('\n', " "));
                        }
                    }
                }
                AgentEvent::Result { is_error, result } => {
                    if is_error && accumulated.trim().is_empty() {
                        let detail =
                            result.unwrap_or_else(|| "agent reported an error".to_string());
                        let _ = child.wait().await;
                        return Err(MochimineError::AgentFailed(detail));
                    }
                    progress("Model run complete.".to_string());
                }
                AgentEvent::Other => {}
            }
        }

        let status = child.wait().await?;
        let stderr_text = stderr_task.await.unwrap_or_default();

        if !status.success() && accumulated.trim().is_empty() {
            return Err(MochimineError::AgentFailed(stderr_text.trim().to_string()));
        }

        Ok(accumulated)
    }
}
