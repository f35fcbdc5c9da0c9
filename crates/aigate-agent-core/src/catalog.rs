//! Closed catalogs of supported languages and vendor model identifiers.
//!
//! Wire names are passed verbatim to the vendor APIs. Adding a model means
//! adding an enum member plus its `as_str`/`parse` arms.

/// Reply language requested on every vendor call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    ViVn,
    EnUs,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::ViVn => "vi-VN",
            Language::EnUs => "en-US",
        }
    }

    /// Human-readable name injected into prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::ViVn => "Vietnamese",
            Language::EnUs => "English",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "vi-VN" => Some(Language::ViVn),
            "en-US" => Some(Language::EnUs),
            _ => None,
        }
    }
}

/// Vendor selector; picks which concrete agent a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    OpenAi,
    Anthropic,
    Google,
}

impl Vendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::OpenAi => "openai",
            Vendor::Anthropic => "anthropic",
            Vendor::Google => "google",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "openai" => Some(Vendor::OpenAi),
            "anthropic" => Some(Vendor::Anthropic),
            "google" => Some(Vendor::Google),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenAiTextModel {
    #[default]
    Gpt4oMini,
    Gpt4o,
    Gpt41,
}

impl OpenAiTextModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenAiTextModel::Gpt4oMini => "gpt-4o-mini",
            OpenAiTextModel::Gpt4o => "gpt-4o",
            OpenAiTextModel::Gpt41 => "gpt-4.1",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "gpt-4o-mini" => Some(OpenAiTextModel::Gpt4oMini),
            "gpt-4o" => Some(OpenAiTextModel::Gpt4o),
            "gpt-4.1" => Some(OpenAiTextModel::Gpt41),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnthropicTextModel {
    #[default]
    Claude35Haiku,
    Claude37Sonnet,
    ClaudeSonnet4,
    ClaudeOpus4,
}

impl AnthropicTextModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnthropicTextModel::Claude35Haiku => "claude-3-5-haiku-20241022",
            AnthropicTextModel::Claude37Sonnet => "claude-3-7-sonnet-20250219",
            AnthropicTextModel::ClaudeSonnet4 => "claude-sonnet-4-20250514",
            AnthropicTextModel::ClaudeOpus4 => "claude-opus-4-20250514",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "claude-3-5-haiku-20241022" => Some(AnthropicTextModel::Claude35Haiku),
            "claude-3-7-sonnet-20250219" => Some(AnthropicTextModel::Claude37Sonnet),
            "claude-sonnet-4-20250514" => Some(AnthropicTextModel::ClaudeSonnet4),
            "claude-opus-4-20250514" => Some(AnthropicTextModel::ClaudeOpus4),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GoogleTextModel {
    #[default]
    Gemini20Flash,
    Gemini25FlashPreview,
    Gemini25ProPreview,
}

impl GoogleTextModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoogleTextModel::Gemini20Flash => "gemini-2.0-flash",
            GoogleTextModel::Gemini25FlashPreview => "gemini-2.5-flash-preview-05-20",
            GoogleTextModel::Gemini25ProPreview => "gemini-2.5-pro-preview-06-05",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "gemini-2.0-flash" => Some(GoogleTextModel::Gemini20Flash),
            "gemini-2.5-flash-preview-05-20" => Some(GoogleTextModel::Gemini25FlashPreview),
            "gemini-2.5-pro-preview-06-05" => Some(GoogleTextModel::Gemini25ProPreview),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenAiVisionModel {
    Gpt4oMini,
    Gpt4o,
    #[default]
    Gpt41,
}

impl OpenAiVisionModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenAiVisionModel::Gpt4oMini => "gpt-4o-mini",
            OpenAiVisionModel::Gpt4o => "gpt-4o",
            OpenAiVisionModel::Gpt41 => "gpt-4.1",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "gpt-4o-mini" => Some(OpenAiVisionModel::Gpt4oMini),
            "gpt-4o" => Some(OpenAiVisionModel::Gpt4o),
            "gpt-4.1" => Some(OpenAiVisionModel::Gpt41),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnthropicVisionModel {
    Claude35Haiku,
    Claude37Sonnet,
    ClaudeSonnet4,
    #[default]
    ClaudeOpus4,
}

impl AnthropicVisionModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnthropicVisionModel::Claude35Haiku => "claude-3-5-haiku-20241022",
            AnthropicVisionModel::Claude37Sonnet => "claude-3-7-sonnet-20250219",
            AnthropicVisionModel::ClaudeSonnet4 => "claude-sonnet-4-20250514",
            AnthropicVisionModel::ClaudeOpus4 => "claude-opus-4-20250514",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "claude-3-5-haiku-20241022" => Some(AnthropicVisionModel::Claude35Haiku),
            "claude-3-7-sonnet-20250219" => Some(AnthropicVisionModel::Claude37Sonnet),
            "claude-sonnet-4-20250514" => Some(AnthropicVisionModel::ClaudeSonnet4),
            "claude-opus-4-20250514" => Some(AnthropicVisionModel::ClaudeOpus4),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GoogleVisionModel {
    #[default]
    Gemini20Flash,
    Gemini25FlashPreview,
    Gemini25ProPreview,
}

impl GoogleVisionModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoogleVisionModel::Gemini20Flash => "gemini-2.0-flash",
            GoogleVisionModel::Gemini25FlashPreview => "gemini-2.5-flash-preview-05-20",
            GoogleVisionModel::Gemini25ProPreview => "gemini-2.5-pro-preview-06-05",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "gemini-2.0-flash" => Some(GoogleVisionModel::Gemini20Flash),
            "gemini-2.5-flash-preview-05-20" => Some(GoogleVisionModel::Gemini25FlashPreview),
            "gemini-2.5-pro-preview-06-05" => Some(GoogleVisionModel::Gemini25ProPreview),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenAiTranscribeModel {
    #[default]
    Gpt4oTranscribe,
}

impl OpenAiTranscribeModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenAiTranscribeModel::Gpt4oTranscribe => "gpt-4o-transcribe",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "gpt-4o-transcribe" => Some(OpenAiTranscribeModel::Gpt4oTranscribe),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GoogleTranscribeModel {
    Gemini20Flash,
    Gemini25FlashPreview,
    #[default]
    Gemini25ProPreview,
}

impl GoogleTranscribeModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoogleTranscribeModel::Gemini20Flash => "gemini-2.0-flash",
            GoogleTranscribeModel::Gemini25FlashPreview => "gemini-2.5-flash-preview-05-20",
            GoogleTranscribeModel::Gemini25ProPreview => "gemini-2.5-pro-preview-06-05",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "gemini-2.0-flash" => Some(GoogleTranscribeModel::Gemini20Flash),
            "gemini-2.5-flash-preview-05-20" => Some(GoogleTranscribeModel::Gemini25FlashPreview),
            "gemini-2.5-pro-preview-06-05" => Some(GoogleTranscribeModel::Gemini25ProPreview),
            _ => None,
        }
    }
}
