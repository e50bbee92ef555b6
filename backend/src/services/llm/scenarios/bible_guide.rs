//! Bible guide scenario - system prompt selection by language and mode

use super::language::Lang;

const BASE_PROMPT: &str = "You are a gentle, knowledgeable Bible guide.
- Cite book/chapter/verse when useful.
- Respect different Christian traditions.
- Keep answers concise unless asked for depth.";

const PATRONCHI_PROMPT: &str = "You are a gentle Bible guide using the Patronchi framework.
Core lenses:
- Egipto → Desierto → Canaán (spiritual formation in 3 stages)
- Santa Sena as preparation for Pentecost (transformation)
- Consider 180° counter-traditional view when the text invites it (without disrespect)
Always provide:
1) Biblical grounding (with references)
2) Patronchi angle (what shifts in practice)";

/// Answering persona requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Regular,
    /// Three-stage interpretive framework with a two-part answer.
    Patronchi,
}

impl Mode {
    /// Only the exact code `patronchi` switches the prompt; anything else is regular.
    pub fn from_code(code: &str) -> Self {
        match code {
            "patronchi" => Self::Patronchi,
            _ => Self::Regular,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Patronchi => "patronchi",
        }
    }

    fn prompt_body(&self) -> &'static str {
        match self {
            Self::Regular => BASE_PROMPT,
            Self::Patronchi => PATRONCHI_PROMPT,
        }
    }
}

/// System prompt derived from `(lang, mode)` for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptProfile {
    pub language_line: &'static str,
    pub system_prompt: String,
}

impl PromptProfile {
    pub fn select(lang: Lang, mode: Mode) -> Self {
        let language_line = lang.language_line();
        Self { language_line, system_prompt: format!("{}\n{}", language_line, mode.prompt_body()) }
    }
}
