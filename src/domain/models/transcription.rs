use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extensions accepted by the transcribe endpoint
pub const AUDIO_EXTENSIONS: [&str; 4] = ["wav", "mp3", "flac", "m4a"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscribeRequest {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub model: String,
}

impl TranscribeRequest {
    pub fn new(filename: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            model: model.into(),
        }
    }
}

/// `{"success": true, "result": ..., "time_elapsed": ...}` or
/// `{"success": false, "error": ...}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Seconds spent in the recognizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_elapsed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranscribeResponse {
    pub fn completed(text: impl Into<String>, time_elapsed: f64) -> Self {
        Self {
            success: true,
            result: Some(text.into()),
            time_elapsed: Some(time_elapsed),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Extension check against `AUDIO_EXTENSIONS`.
///
/// Matches regardless of case (`talk.WAV` is accepted) and needs a file
/// stem: a dotfile such as `/x/.wav` has no extension and is rejected.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("/tmp/meeting.wav")));
        assert!(is_audio_file(Path::new("voice.M4A")));
        assert!(is_audio_file(Path::new("a.b.flac")));
        assert!(!is_audio_file(Path::new("notes.txt")));
        assert!(!is_audio_file(Path::new("mp3")));
        assert!(!is_audio_file(Path::new("")));
    }

    #[test]
    fn test_is_audio_file_case_and_dotfiles() {
        assert!(is_audio_file(Path::new("/x/talk.WAV")));
        assert!(is_audio_file(Path::new("/x/talk.Mp3")));
        assert!(!is_audio_file(Path::new("/x/.wav")));
    }

    #[test]
    fn test_response_json() {
        let json = serde_json::to_value(TranscribeResponse::completed("hello", 1.5)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["result"], "hello");
        assert_eq!(json["time_elapsed"], 1.5);
        assert!(json.get("error").is_none());

        let json = serde_json::to_value(TranscribeResponse::failed("File does not exist")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "File does not exist");
        assert!(json.get("result").is_none());
    }
}
