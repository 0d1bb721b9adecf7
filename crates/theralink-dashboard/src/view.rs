use serde::Serialize;

use theralink_core::models::overview::PatientOverview;
use theralink_core::models::patient::PatientRecord;
use theralink_core::models::risk::{RiskTier, classify};
use theralink_core::models::summary::{SummaryOutcome, SummarySource};

use crate::error::DashboardError;

fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// One row of the triage overview table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewRow {
    pub patient_id: String,
    pub latest_score: f64,
    pub score_display: String,
    pub risk: RiskTier,
    pub marker: &'static str,
}

/// The clinic's multi-patient overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub rows: Vec<OverviewRow>,
}

impl Overview {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Patient shown when none is explicitly selected.
    pub fn default_selection(&self) -> Option<&str> {
        self.rows.first().map(|r| r.patient_id.as_str())
    }
}

pub fn overview(patients: &[PatientOverview]) -> Overview {
    Overview {
        rows: patients
            .iter()
            .map(|p| OverviewRow {
                patient_id: p.patient_id.clone(),
                latest_score: p.latest_score,
                score_display: format_score(p.latest_score),
                risk: p.risk,
                marker: p.risk.marker(),
            })
            .collect(),
    }
}

/// A point on the wellness trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub date: jiff::civil::Date,
    pub score: f64,
}

/// Everything shown for the selected patient, minus the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientDashboard {
    pub patient_id: String,
    /// Full history in submission order.
    pub series: Vec<ScorePoint>,
    pub latest_score: f64,
    pub score_display: String,
    pub risk: RiskTier,
    pub risk_label: &'static str,
    /// Badge CSS class suffix.
    pub risk_class: &'static str,
    pub verified: bool,
    pub notes: String,
}

/// Build the dashboard for one patient.
///
/// Every stored patient has at least one check-in; a record without one
/// fails with [`DashboardError::MissingHistory`].
pub fn patient_dashboard(
    patient_id: &str,
    record: &PatientRecord,
) -> Result<PatientDashboard, DashboardError> {
    let latest = record
        .latest()
        .ok_or_else(|| DashboardError::MissingHistory {
            patient_id: patient_id.to_string(),
        })?;
    let risk = classify(latest.score);

    Ok(PatientDashboard {
        patient_id: patient_id.to_string(),
        series: record
            .history
            .iter()
            .map(|c| ScorePoint {
                date: c.date,
                score: c.score,
            })
            .collect(),
        latest_score: latest.score,
        score_display: format_score(latest.score),
        risk,
        risk_label: risk.label(),
        risk_class: risk.as_str(),
        verified: record.verified,
        notes: record.notes.clone(),
    })
}

/// How the summary panel should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryPanelState {
    Ready,
    Stale,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryPanel {
    pub state: SummaryPanelState,
    /// Model text, shown verbatim.
    pub text: Option<String>,
    /// Score the text was generated for.
    pub score_display: Option<String>,
    /// Shown above the text when something went wrong.
    pub notice: Option<String>,
}

pub fn summary_panel(outcome: &SummaryOutcome) -> SummaryPanel {
    match outcome {
        SummaryOutcome::Ready {
            source: SummarySource::Stale,
            summary,
            error,
        } => SummaryPanel {
            state: SummaryPanelState::Stale,
            text: Some(summary.text.clone()),
            score_display: Some(format_score(summary.score)),
            notice: Some(format!(
                "A new summary could not be generated ({}). Showing the previous summary for score {}.",
                error.as_deref().unwrap_or("unknown error"),
                format_score(summary.score),
            )),
        },
        SummaryOutcome::Ready { summary, .. } => SummaryPanel {
            state: SummaryPanelState::Ready,
            text: Some(summary.text.clone()),
            score_display: Some(format_score(summary.score)),
            notice: None,
        },
        SummaryOutcome::Unavailable { error } => SummaryPanel {
            state: SummaryPanelState::Unavailable,
            text: None,
            score_display: None,
            notice: Some(format!("Session prep summary unavailable: {error}")),
        },
    }
}

/// A question as shown on the check-in form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormQuestion {
    pub id: String,
    pub text: String,
    pub min: u8,
    pub max: u8,
    /// Current slider position.
    pub value: u8,
}

/// Confirmation shown after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmittedCheckIn {
    pub patient_id: String,
    pub date: jiff::civil::Date,
    pub score_display: String,
}

impl SubmittedCheckIn {
    pub fn new(patient_id: &str, date: jiff::civil::Date, score: f64) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            date,
            score_display: format_score(score),
        }
    }
}

/// The patient's check-in page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInForm {
    pub patient_id: String,
    pub questions: Vec<FormQuestion>,
    pub errors: Vec<String>,
    pub submitted: Option<SubmittedCheckIn>,
}
