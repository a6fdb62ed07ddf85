//! Flat renderings of SWOT results: markdown text and a versioned JSON
//! envelope. Pure formatting over an already-computed [`SwotResult`].

use chrono::Utc;
use serde::Serialize;

use crate::error::FairMediatorError;
use crate::swot::SwotResult;

/// Bumped whenever the envelope layout changes, so downstream consumers
/// of exported files can dispatch on it.
pub const SWOT_EXPORT_VERSION: u32 = 1;

/// Versioned JSON envelope around a SWOT result.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SwotExport<'a> {
    pub version: u32,
    pub generated_at: String,
    pub result: &'a SwotResult,
}

fn push_section(out: &mut String, title: &str, entries: &[String]) {
    out.push_str(&format!("## {}\n\n", title));
    if entries.is_empty() {
        out.push_str("_None identified._\n\n");
        return;
    }
    for entry in entries {
        out.push_str(&format!("- {}\n", entry));
    }
    out.push('\n');
}

/// Render a SWOT result as a markdown document. Every field of the
/// result appears in the rendering.
pub fn swot_to_markdown(result: &SwotResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# SWOT Analysis: {} ({})\n\n",
        result.mediator_name, result.mediator_id
    ));
    push_section(&mut out, "Strengths", &result.strengths);
    push_section(&mut out, "Weaknesses", &result.weaknesses);
    push_section(&mut out, "Opportunities", &result.opportunities);
    push_section(&mut out, "Threats", &result.threats);
    out.push_str("## Assessment\n\n");
    out.push_str(&format!("- Score: {}\n", result.assessment.score));
    out.push_str(&format!("- Rating: {}\n", result.assessment.rating));
    out.push_str(&format!(
        "- Recommendation: {}\n",
        result.assessment.recommendation
    ));
    out
}

/// Serialize a SWOT result into the versioned JSON envelope.
pub fn swot_to_json(result: &SwotResult) -> Result<String, FairMediatorError> {
    let envelope = SwotExport {
        version: SWOT_EXPORT_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        result,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swot::generate;
    use crate::types::Mediator;

    fn sample_result() -> SwotResult {
        let m = Mediator {
            id: "med_1".to_string(),
            name: "Jane Doe".to_string(),
            years_experience: 20,
            is_verified: true,
            rating: 4.6,
            ..Default::default()
        };
        generate(&m, Some(&[]))
    }

    #[test]
    fn markdown_renders_every_section() {
        let md = swot_to_markdown(&sample_result());
        assert!(md.contains("# SWOT Analysis: Jane Doe (med_1)"));
        assert!(md.contains("## Strengths"));
        assert!(md.contains("## Weaknesses"));
        assert!(md.contains("## Opportunities"));
        assert!(md.contains("## Threats"));
        assert!(md.contains("- Score:"));
        assert!(md.contains("- Rating:"));
        assert!(md.contains("- Recommendation:"));
    }

    #[test]
    fn markdown_marks_empty_sections() {
        use crate::swot::{SwotAssessment, SwotRating};
        let result = SwotResult {
            mediator_id: "med_2".to_string(),
            mediator_name: "John Smith".to_string(),
            strengths: vec!["Verified professional credentials".to_string()],
            weaknesses: vec![],
            opportunities: vec![],
            threats: vec![],
            assessment: SwotAssessment {
                score: 10,
                rating: SwotRating::Fair,
                recommendation: "Acceptable with review".to_string(),
            },
        };
        let md = swot_to_markdown(&result);
        assert!(md.contains("_None identified._"));
        assert!(md.contains("- Verified professional credentials"));
    }

    #[test]
    fn json_envelope_carries_version_and_result() {
        let json = swot_to_json(&sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 1);
        assert!(value["generatedAt"].is_string());
        assert_eq!(value["result"]["mediatorId"], "med_1");
        assert!(value["result"]["assessment"]["score"].is_number());
        assert!(value["result"]["strengths"].is_array());
    }
}
