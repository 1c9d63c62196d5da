/// Literal shipped in the sample `.env`.
pub const PLACEHOLDER_KEY: &str = "your_google_api_key_here";
/// Real Google API keys are 39 characters; anything under this is suspect.
pub const MIN_KEY_LENGTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Missing,
    Placeholder,
    TooShort,
    ValidFormat,
}

impl KeyStatus {
    /// Shape check only; nothing is sent anywhere.
    pub fn classify(key: Option<&str>) -> Self {
        match key {
            None | Some("") => KeyStatus::Missing,
            Some(k) if k.contains(PLACEHOLDER_KEY) => KeyStatus::Placeholder,
            Some(k) if k.chars().count() < MIN_KEY_LENGTH => KeyStatus::TooShort,
            Some(_) => KeyStatus::ValidFormat,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            KeyStatus::Missing => "missing",
            KeyStatus::Placeholder => "placeholder",
            KeyStatus::TooShort => "too short",
            KeyStatus::ValidFormat => "valid format",
        }
    }
}
