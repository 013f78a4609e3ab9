//! Narrative executive report generation.
//!
//! A distinct prompt over the same model family as the classifier. Failure is
//! absorbed: the returned string is either the model's Markdown report or an
//! explanatory message the caller displays as-is. The same input may yield
//! different wording across calls; only the requested structure is stable.

use tracing::warn;

use crate::ai::gemini::LanguageModel;
use crate::models::TabulationRecord;

/// Executive report generator over an external language model
pub struct ReportGenerator {
    model: Box<dyn LanguageModel>,
}

impl ReportGenerator {
    /// Create a generator backed by the given model
    #[must_use]
    pub fn new(model: Box<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Generate the narrative CX report for a rendered summary table.
    ///
    /// On failure the returned document body explains the error; there is no
    /// retry and no synthesized template.
    pub async fn generate(&self, summary_table: &str) -> String {
        let prompt = build_prompt(summary_table);

        match self.model.generate(&prompt).await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Report generation failed");
                format!("Erro ao gerar relatório: {e}")
            }
        }
    }
}

fn build_prompt(summary_table: &str) -> String {
    format!(
        "Você é um consultor sênior de CX (Customer Experience).\n\
         Com base nos seguintes dados de atendimentos de redes sociais, escreva um \
         relatório executivo narrativo, profissional e humano.\n\n\
         Dados:\n{summary_table}\n\n\
         O relatório deve conter:\n\
         - Título impactante\n\
         - Resumo executivo (tópicos)\n\
         - Análise estratégica por rede social e sentimento\n\
         - Plano de Ação (Action Plan) com 3 pontos estratégicos\n\
         - Conclusão\n\n\
         Use formatação Markdown."
    )
}

/// Render the filtered records as the plain table handed to the model.
///
/// One line per record: network, reason, sentiment and the message text.
#[must_use]
pub fn render_summary_table(records: &[TabulationRecord]) -> String {
    let mut table = String::from("social_network | reason | sentiment | message_text\n");

    for record in records {
        table.push_str(&format!(
            "{} | {} | {} | {}\n",
            record.social_network,
            record.reason,
            record.sentiment,
            record.message_text.as_deref().unwrap_or(""),
        ));
    }

    table
}
