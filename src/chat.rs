use std::fmt::Write;

use crate::diagnosis::{Diagnosis, RoutinePhase};

pub const FALLBACK_REPLY: &str = "Désolé, je n'ai pas pu générer une réponse.";

const ADVISOR_INSTRUCTIONS: &str = "Tu es un expert en skincare qui aide l'utilisateur avec des \
conseils personnalisés basés sur son analyse. Sois bienveillant, précis et orienté solutions. \
Utilise les données ci-dessus pour contextualiser tes réponses.";

/// System prompt grounding the chat assistant in the user's diagnosis.
pub fn build_chat_context(diagnosis: &Diagnosis) -> String {
    let scores = diagnosis
        .scores
        .entries()
        .iter()
        .map(|(field, score)| format!("{} {}/100", field.label(), score))
        .collect::<Vec<_>>()
        .join(", ");

    let mut insights: Vec<&str> = diagnosis
        .insights
        .strengths
        .iter()
        .chain(diagnosis.insights.improvements.iter())
        .map(String::as_str)
        .collect();
    if insights.is_empty() {
        insights.push("Aucun insight spécifique");
    }

    let mut context = String::new();
    let _ = writeln!(context, "ANALYSE DE PEAU UTILISATEUR:");
    let _ = writeln!(context, "- Type de peau: {}", diagnosis.skin_type);
    let _ = writeln!(context, "- Scores: {}", scores);
    let _ = writeln!(context, "- Âge de peau estimé: {} ans", diagnosis.skin_age);
    let _ = writeln!(context, "- Insights principaux: {}", insights.join(", "));
    let _ = writeln!(context, "- Priorité: {}", diagnosis.insights.priority);
    let _ = writeln!(context);
    let _ = writeln!(context, "ROUTINE PERSONNALISÉE:");
    let _ = writeln!(context, "Matin:\n{}", render_phase(&diagnosis.routine.morning));
    let _ = writeln!(context, "Soir:\n{}", render_phase(&diagnosis.routine.evening));
    let _ = writeln!(context);
    context.push_str(ADVISOR_INSTRUCTIONS);
    context
}

/// Strips markdown emphasis, headings and inline code so the reply renders as plain text.
pub fn clean_reply(reply: &str) -> String {
    let cleaned = reply
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let without_heading = if trimmed.starts_with('#') {
                trimmed.trim_start_matches('#').trim_start()
            } else {
                line
            };
            without_heading
                .replace("**", "")
                .replace("__", "")
                .replace('`', "")
        })
        .collect::<Vec<_>>()
        .join("\n");

    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        FALLBACK_REPLY.to_string()
    } else {
        cleaned.to_string()
    }
}

fn render_phase(phase: &RoutinePhase) -> String {
    if phase.steps.is_empty() {
        return "Routine non disponible".to_string();
    }
    phase
        .steps
        .iter()
        .map(|step| format!("{}. {} - {}", step.step, step.product, step.action))
        .collect::<Vec<_>>()
        .join("\n")
}
