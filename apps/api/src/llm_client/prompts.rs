// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Tone shared by every user-facing turn.
pub const FRENCH_TONE: &str = "Tu réponds toujours en français, avec un ton chaleureux, \
    bienveillant et sans jugement. Tu tutoies la personne.";
