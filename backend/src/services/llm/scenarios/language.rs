//! Language-aware helpers for LLM prompts
//!
//! Maps the `lang` code from an ask request onto the sentence that tells the
//! model which language and tone to answer in.

/// Answer language requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    /// Papiamentu
    #[default]
    Pap,
    En,
    Es,
    Nl,
    /// Any code outside the supported set; resolves to default wording.
    Other,
}

impl Lang {
    pub const SUPPORTED: [Lang; 4] = [Lang::Pap, Lang::En, Lang::Es, Lang::Nl];

    /// Exact, case-sensitive lookup of a lang code. Unknown codes are `Other`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "pap" => Self::Pap,
            "en" => Self::En,
            "es" => Self::Es,
            "nl" => Self::Nl,
            _ => Self::Other,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Pap => "pap",
            Self::En => "en",
            Self::Es => "es",
            Self::Nl => "nl",
            Self::Other => "other",
        }
    }

    /// Instruction sentence placed at the top of the system prompt.
    pub fn language_line(&self) -> &'static str {
        match self {
            Self::Pap => "Kontesta den Papiamentu, kla i ku respet.",
            Self::En => "Answer in clear English, respectfully.",
            Self::Es => "Responde en español claro, con respeto.",
            Self::Nl => "Antwoord in helder Nederlands, met respect.",
            Self::Other => "Answer clearly and respectfully.",
        }
    }
}
