pub mod credential;
pub mod crew;

use std::io::{self, Write};
use std::process::ExitCode;
use wayfare_infra::{LanguageModel, LlmError, ModelId};
use crate::credential::KeyStatus;
use crate::crew::{Agent, Crew, CrewError, Task};

pub const DEFAULT_MODEL: &str = "gemini/gemini-1.5-flash";

/// How the connectivity check ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    MissingKey,
    Success(String),
    Failure { message: String, kind: &'static str },
}

impl Verdict {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Verdict::Success(_) => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        }
    }
}

/// Prints the key report and returns its classification.
pub fn report_key<W: Write>(out: &mut W, key: Option<&str>) -> io::Result<KeyStatus> {
    writeln!(out, "Checking API Key configuration...")?;

    let status = KeyStatus::classify(key);
    let key = key.unwrap_or_default();
    let length = key.chars().count();

    match status {
        KeyStatus::Missing => {
            writeln!(out, "ERROR: GOOGLE_API_KEY not found in environment or .env file")?;
        }
        KeyStatus::Placeholder => {
            writeln!(out, "API Key is set (Length: {})", length)?;
            writeln!(out, "CRITICAL ERROR: API Key appears to be the PLACEHOLDER string!")?;
        }
        KeyStatus::TooShort => {
            writeln!(out, "API Key is set (Length: {})", length)?;
            writeln!(
                out,
                "WARNING: API Key seems too short ({} chars). Real keys are usually longer.",
                length
            )?;
            writeln!(out, "Value: {}", key)?;
        }
        KeyStatus::ValidFormat => {
            let prefix: String = key.chars().take(6).collect();
            writeln!(out, "API Key is set (Length: {})", length)?;
            writeln!(out, "API Key seems valid format (starts with: {}...)", prefix)?;
        }
    }

    Ok(status)
}

/// One agent, one task: ask for a fixed three-word reply.
pub fn connection_crew() -> Crew {
    let agent = Agent::new("Test Agent", "Verify API connection", "I am a test agent.");
    let task = Task::new(
        "Reply with exactly three words: 'Connection is working'.",
        "A simple confirmation phrase.",
        0,
    );
    Crew::new(vec![agent], vec![task]).verbose(true)
}

fn report_failure<W: Write>(out: &mut W, err: &CrewError) -> io::Result<Verdict> {
    writeln!(out, "\nFAILURE! Error details:")?;
    writeln!(out, "{}", err)?;
    writeln!(out, "Error Type: {}", err.kind())?;
    Ok(Verdict::Failure { message: err.to_string(), kind: err.kind() })
}

/// Key report followed by exactly one model round trip. `connect` builds the
/// model client from the key and the parsed model identifier.
pub async fn run<W, F>(out: &mut W, key: Option<&str>, model_id: &str, connect: F) -> io::Result<Verdict>
where
    W: Write,
    F: FnOnce(&str, ModelId) -> Result<Box<dyn LanguageModel>, LlmError>,
{
    let status = report_key(out, key)?;
    let key = match key {
        Some(k) if status != KeyStatus::Missing => k,
        _ => return Ok(Verdict::MissingKey),
    };

    writeln!(out, "\nTesting connection to the hosted model...")?;
    writeln!(out, "Initializing LLM with model: {}", model_id)?;

    let model = match ModelId::parse(model_id).and_then(|id| connect(key, id)) {
        Ok(model) => model,
        Err(e) => return report_failure(out, &CrewError::from(e)),
    };

    writeln!(out, "Starting Crew execution...")?;
    match connection_crew().kickoff(model.as_ref()).await {
        Ok(answer) => {
            writeln!(out, "\nSUCCESS! Result from AI: {}", answer.trim())?;
            Ok(Verdict::Success(answer))
        }
        Err(e) => report_failure(out, &e),
    }
}
