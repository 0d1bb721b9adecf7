use serde::Serialize;
use tera::{Context, Tera};

use crate::chart::ScoreChart;
use crate::error::DashboardError;
use crate::styles::DashboardStyles;
use crate::view::{CheckInForm, Overview, PatientDashboard, SummaryPanel};

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("check_in.html", include_str!("../templates/check_in.html")),
    ("doctor.html", include_str!("../templates/doctor.html")),
];

/// The selected patient's panel on the doctor page.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedPatient<'a> {
    pub dashboard: &'a PatientDashboard,
    pub chart: ScoreChart,
    pub summary: &'a SummaryPanel,
}

impl<'a> SelectedPatient<'a> {
    pub fn new(dashboard: &'a PatientDashboard, summary: &'a SummaryPanel) -> Self {
        Self {
            chart: ScoreChart::from_series(&dashboard.series),
            dashboard,
            summary,
        }
    }
}

/// Renders the HTML pages. Templates are compiled once at construction.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
    stylesheet: String,
}

impl Renderer {
    pub fn new() -> Result<Self, DashboardError> {
        Self::with_styles(&DashboardStyles::default())
    }

    pub fn with_styles(styles: &DashboardStyles) -> Result<Self, DashboardError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())
            .map_err(|e| DashboardError::TemplateParse(e.to_string()))?;
        Ok(Self {
            tera,
            stylesheet: styles.stylesheet(),
        })
    }

    fn context(&self) -> Context {
        let mut context = Context::new();
        context.insert("stylesheet", &self.stylesheet);
        context
    }

    fn render(&self, template_name: &str, context: &Context) -> Result<String, DashboardError> {
        let rendered = self.tera.render(template_name, context)?;
        tracing::debug!(template_name, bytes = rendered.len(), "page rendered");
        Ok(rendered)
    }

    /// Role picker.
    pub fn home_page(&self) -> Result<String, DashboardError> {
        self.render("home.html", &self.context())
    }

    /// The patient's daily check-in form, with any validation errors or the
    /// confirmation of the last submission.
    pub fn check_in_page(&self, form: &CheckInForm) -> Result<String, DashboardError> {
        let mut context = self.context();
        context.insert("form", form);
        self.render("check_in.html", &context)
    }

    /// The clinic dashboard. `selected` is `None` when the overview is empty
    /// and only the "no data" state is shown.
    pub fn doctor_page(
        &self,
        overview: &Overview,
        selected: Option<&SelectedPatient<'_>>,
    ) -> Result<String, DashboardError> {
        let mut context = self.context();
        context.insert("overview", overview);
        context.insert("no_patients", &overview.is_empty());
        context.insert("selected", &selected);
        self.render("doctor.html", &context)
    }
}
