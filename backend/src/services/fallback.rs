//! Offline fallback answers used when the completion service cannot answer.

use crate::services::llm::{Lang, Mode};

fn base_sentence(lang: Lang) -> &'static str {
    match lang {
        Lang::Pap => {
            "No a logra haña un respuesta kompletu awor. Riprobá likit mas tad. Leé Salmo 23 i Juan 3:16 pa ánimo."
        },
        Lang::Es => {
            "No pude completar una respuesta ahora. Intenta de nuevo pronto. Lee Salmo 23 y Juan 3:16 para ánimo."
        },
        Lang::Nl => {
            "Kon geen volledig antwoord geven. Probeer het zo meteen opnieuw. Lees Psalm 23 en Johannes 3:16 voor bemoediging."
        },
        Lang::En | Lang::Other => {
            "Couldn’t complete a full answer now. Please try again shortly. See Psalm 23 and John 3:16 for encouragement."
        },
    }
}

fn patronchi_suffix(lang: Lang) -> &'static str {
    match lang {
        Lang::Pap => " (Patronchi: pensa riba e biahe Egipto→Desierto→Canaán den e pasahé.)",
        Lang::Es => " (Patronchi: reflexiona sobre Egipto→Desierto→Canaán en el pasaje.)",
        Lang::Nl => " (Patronchi: denk aan Egypte→Woestijn→Kanaän in de passage.)",
        Lang::En | Lang::Other => {
            " (Patronchi: reflect on Egypt→Desert→Canaan journey in the passage.)"
        },
    }
}

/// Deterministic, localized answer built without any network access.
///
/// `_question` is accepted so callers can pass the original question once
/// verse suggestions are keyed on it; it does not affect the result today.
pub fn fallback_answer(_question: &str, lang: Lang, mode: Mode) -> String {
    let base = base_sentence(lang);
    match mode {
        Mode::Regular => base.to_string(),
        Mode::Patronchi => format!("{}{}", base, patronchi_suffix(lang)),
    }
}
