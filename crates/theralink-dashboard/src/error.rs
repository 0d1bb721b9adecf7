use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("patient {patient_id} has no check-ins")]
    MissingHistory { patient_id: String },

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),
}

impl From<tera::Error> for DashboardError {
    fn from(e: tera::Error) -> Self {
        DashboardError::TemplateRender(e.to_string())
    }
}
