//! Prompt assembly shared by the vendor implementations.

use crate::catalog::Language;

const DEFAULT_AUDIO_EXTENSION: &str = "mp3";

/// The language instruction appended to every generation prompt.
pub fn language_directive(language: Language) -> String {
    format!("Please respond in {}.", language.display_name())
}

/// System prompt for vendors that fold the user turn into the system text.
pub fn generate_system_prompt(system_prompt: &str, user_input: &str, language: Language) -> String {
    format!(
        "{system_prompt}\n\nUser: {user_input}\n\n{}",
        language_directive(language)
    )
}

/// Leading instruction block for image analysis: instruction prompt, then the
/// per-call input text, then the language directive.
pub fn vision_instruction(prompt: &str, input_text: &str, language: Language) -> String {
    format!(
        "{prompt}\n{input_text}\n{}",
        language_directive(language)
    )
}

/// Effective transcription prompt. Without a custom prompt the vendor is told
/// to expect primarily the configured language but to transcribe
/// mixed-language terminology faithfully; a custom prompt is prefixed and the
/// language instruction appended.
pub fn transcription_prompt(custom_prompt: &str, language: Language) -> String {
    if custom_prompt.is_empty() {
        format!(
            "The audio will mainly be in {}, however, they sometimes use terminology \
             from other languages, you should transcribe the text in multiple languages \
             accordingly.",
            language.display_name()
        )
    } else {
        format!(
            "{custom_prompt}\nTranscribe the following audio to text in {}.",
            language.display_name()
        )
    }
}

/// File name handed to vendors whose audio transport wants one, derived from
/// the MIME subtype. Unrecognized or missing subtypes fall back to mp3.
pub fn audio_file_name(mime_type: &str) -> String {
    let extension = mime_type
        .strip_prefix("audio/")
        .map(|rest| rest.split(';').next().unwrap_or("").trim())
        .filter(|subtype| {
            !subtype.is_empty() && subtype.chars().all(|ch| ch.is_ascii_alphanumeric())
        })
        .unwrap_or(DEFAULT_AUDIO_EXTENSION);
    format!("audio.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_carries_user_turn_and_directive() {
        let prompt = generate_system_prompt("You are Felix.", "What is your name?", Language::EnUs);
        assert_eq!(
            prompt,
            "You are Felix.\n\nUser: What is your name?\n\nPlease respond in English."
        );
    }

    #[test]
    fn transcription_prompt_default_and_custom() {
        let default = transcription_prompt("", Language::ViVn);
        assert!(default.starts_with("The audio will mainly be in Vietnamese"));

        let custom = transcription_prompt("Medical vocabulary.", Language::EnUs);
        assert!(custom.starts_with("Medical vocabulary.\n"));
        assert!(custom.ends_with("Transcribe the following audio to text in English."));
    }

    #[test]
    fn audio_file_names_follow_the_subtype() {
        assert_eq!(audio_file_name("audio/mp3"), "audio.mp3");
        assert_eq!(audio_file_name("audio/wav"), "audio.wav");
        assert_eq!(audio_file_name("audio/m4a"), "audio.m4a");
        assert_eq!(audio_file_name("audio/flac"), "audio.flac");
    }

    #[test]
    fn audio_file_name_falls_back_to_mp3() {
        assert_eq!(audio_file_name("video/mp4"), "audio.mp3");
        assert_eq!(audio_file_name("audio/"), "audio.mp3");
        assert_eq!(audio_file_name(""), "audio.mp3");
        assert_eq!(audio_file_name("audio/x-custom"), "audio.mp3");
    }

    #[test]
    fn audio_file_name_ignores_mime_parameters() {
        assert_eq!(audio_file_name("audio/wav; rate=16000"), "audio.wav");
    }
}
