use std::path::Path;

/// Load the optional list of words offered as path building blocks
///
/// The file holds a JSON array of strings. No file configured, a missing
/// file or a malformed one all give an empty bank.
pub async fn load_word_bank(path: Option<&Path>) -> Vec<String> {
    let Some(path) = path else {
        return Vec::new();
    };

    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) => {
            tracing::debug!("Word bank {} not readable: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&contents) {
        Ok(words) => words
            .into_iter()
            .map(|word| word.trim().to_string())
            .filter(|word| !word.is_empty())
            .collect(),
        Err(e) => {
            tracing::warn!("Word bank {} is malformed, ignoring it: {}", path.display(), e);
            Vec::new()
        }
    }
}
