//! Output rendering for CLI results: table, json, csv, and markdown.

use anyhow::Result;
use fairmediator_lib::{BatchReport, MatchScore, QuickCheckReport, RiskAssessment};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(input: &str) -> Self {
        match input {
            "json" => Self::Json,
            "csv" => Self::Csv,
            "markdown" => Self::Markdown,
            _ => Self::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct AssessmentRow {
    #[tabled(rename = "Mediator")]
    #[serde(rename = "Mediator")]
    mediator_id: String,
    #[tabled(rename = "Risk")]
    #[serde(rename = "Risk")]
    risk_level: String,
    #[tabled(rename = "Score")]
    #[serde(rename = "Score")]
    score: String,
    #[tabled(rename = "Findings")]
    #[serde(rename = "Findings")]
    findings: usize,
    #[tabled(rename = "Conflicts")]
    #[serde(rename = "Conflicts")]
    has_conflicts: String,
}

#[derive(Tabled, Serialize)]
pub struct FindingRow {
    #[tabled(rename = "Party")]
    #[serde(rename = "Party")]
    party: String,
    #[tabled(rename = "Matched")]
    #[serde(rename = "Matched")]
    matched: String,
    #[tabled(rename = "Relationship")]
    #[serde(rename = "Relationship")]
    relationship: String,
    #[tabled(rename = "Severity")]
    #[serde(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Source")]
    #[serde(rename = "Source")]
    source: String,
    #[tabled(rename = "Confidence")]
    #[serde(rename = "Confidence")]
    confidence: String,
}

#[derive(Tabled, Serialize)]
pub struct QuickRow {
    #[tabled(rename = "Mediator")]
    #[serde(rename = "Mediator")]
    mediator_id: String,
    #[tabled(rename = "Flag")]
    #[serde(rename = "Flag")]
    flag: String,
}

#[derive(Tabled, Serialize)]
pub struct RankRow {
    #[tabled(rename = "Rank")]
    #[serde(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Mediator")]
    #[serde(rename = "Mediator")]
    mediator_id: String,
    #[tabled(rename = "Total")]
    #[serde(rename = "Total")]
    total: String,
    #[tabled(rename = "Experience")]
    #[serde(rename = "Experience")]
    experience: String,
    #[tabled(rename = "Specialization")]
    #[serde(rename = "Specialization")]
    specialization: String,
    #[tabled(rename = "Rating")]
    #[serde(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Risk Penalty")]
    #[serde(rename = "Risk Penalty")]
    risk_penalty: String,
    #[tabled(rename = "Ideology")]
    #[serde(rename = "Ideology")]
    ideology: String,
    #[tabled(rename = "Risk Band")]
    #[serde(rename = "Risk Band")]
    risk_band: String,
}

// -- Row builders --

pub fn build_assessment_rows(assessments: &[RiskAssessment]) -> Vec<AssessmentRow> {
    assessments
        .iter()
        .map(|a| AssessmentRow {
            mediator_id: a.mediator_id.clone(),
            risk_level: a.overall_risk_level.to_string(),
            score: format!("{:.1}", a.score),
            findings: a.findings.len(),
            has_conflicts: if a.has_conflicts { "yes" } else { "no" }.to_string(),
        })
        .collect()
}

pub fn build_finding_rows(assessment: &RiskAssessment) -> Vec<FindingRow> {
    assessment
        .findings
        .iter()
        .map(|f| FindingRow {
            party: f.party.clone(),
            matched: f.matched_affiliation.clone(),
            relationship: f
                .relationship_type
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            severity: f.severity.to_string(),
            source: f.source.to_string(),
            confidence: format!("{:.2}", f.confidence),
        })
        .collect()
}

pub fn build_quick_rows(report: &QuickCheckReport) -> Vec<QuickRow> {
    report
        .flags
        .iter()
        .map(|r| QuickRow {
            mediator_id: r.mediator_id.clone(),
            flag: r.flag.to_string(),
        })
        .collect()
}

pub fn build_rank_rows(scores: &[MatchScore]) -> Vec<RankRow> {
    scores
        .iter()
        .enumerate()
        .map(|(idx, s)| RankRow {
            rank: idx + 1,
            name: s.name.clone(),
            mediator_id: s.mediator_id.clone(),
            total: format!("{:.3}", s.total),
            experience: format!("{:.3}", s.breakdown.experience),
            specialization: format!("{:.3}", s.breakdown.specialization_match),
            rating: format!("{:.3}", s.breakdown.rating),
            risk_penalty: format!("{:.3}", s.breakdown.risk_penalty),
            ideology: format!("{:.3}", s.breakdown.ideology_alignment),
            risk_band: s.risk.overall_risk_level.to_string(),
        })
        .collect()
}

// -- Generic printers --

pub fn print_table<T: Tabled>(rows: Vec<T>) {
    println!("{}", Table::new(rows));
}

pub fn print_markdown<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_csv<T: Serialize>(rows: Vec<T>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Render a batch report's tabular part for the chosen format. JSON
/// callers should print the full report themselves.
pub fn print_assessments(assessments: &[RiskAssessment], format: &OutputFormat) -> Result<()> {
    let rows = build_assessment_rows(assessments);
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Markdown => print_markdown(rows),
        OutputFormat::Csv => print_csv(rows)?,
        OutputFormat::Json => print_json(&assessments),
    }
    Ok(())
}

pub fn print_batch_summary(report: &BatchReport) {
    println!(
        "\nChecked {} mediator(s): {} with conflicts, {} high risk, {} medium risk",
        report.summary.total_checked,
        report.summary.with_conflicts,
        report.summary.high_risk_count,
        report.summary.medium_risk_count
    );
    if !report.not_found.is_empty() {
        eprintln!("Not found: {}", report.not_found.join(", "));
    }
}
