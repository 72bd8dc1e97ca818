//! Fixed prompt template for fraud, waste and abuse assessment.

/// System role sent with every analysis.
pub const SYSTEM_PROMPT: &str = "You are a healthcare fraud detection expert. \
Analyze text for potential Fraud, Waste, or Abuse indicators.";

/// Embed `text` into the analysis instructions.
///
/// The text is inserted verbatim between double quotes; nothing else in the
/// template varies per request.
pub fn render_analysis_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following healthcare-related text for potential Fraud, Waste, or Abuse (FWA).

Text to analyze: "{text}"

Please evaluate this text and respond with:
1. A risk assessment (LOW, MEDIUM, HIGH)
2. Specific concerns identified (if any)
3. Brief explanation of your assessment

Focus on identifying patterns that might indicate:
- Fraudulent billing practices
- Wasteful resource usage
- Abusive healthcare practices
- Unnecessary procedures or services
- Billing irregularities

Provide a structured response."#
    )
}
