use serde::{Deserialize, Serialize};

/// Colors and spacing for the rendered pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStyles {
    /// Page background color.
    pub background: String,

    /// Card corner radius in pixels.
    pub card_radius: u32,

    /// Badge background for the red tier.
    pub red: String,

    /// Badge background for the yellow tier.
    pub yellow: String,

    /// Badge background for the green tier.
    pub green: String,

    /// Font stack for all text.
    pub font_family: String,
}

impl Default for DashboardStyles {
    fn default() -> Self {
        Self {
            background: "#f7f9fc".to_string(),
            card_radius: 14,
            red: "#e74c3c".to_string(),
            yellow: "#f1c40f".to_string(),
            green: "#2ecc71".to_string(),
            font_family: "system-ui, -apple-system, sans-serif".to_string(),
        }
    }
}

impl DashboardStyles {
    /// Render the stylesheet embedded in every page.
    pub fn stylesheet(&self) -> String {
        format!(
            "\
body {{ background-color: {bg}; font-family: {font}; margin: 0; }}
main {{ max-width: 1100px; margin: 0 auto; padding: 1.5rem; }}
nav a {{ margin-right: 1rem; }}
.card {{ background: white; padding: 1.2rem; border-radius: {radius}px; box-shadow: 0 4px 14px rgba(0,0,0,0.06); margin-bottom: 1rem; }}
.columns {{ display: flex; gap: 1rem; }}
.columns > .wide {{ flex: 3; }}
.columns > .narrow {{ flex: 1; }}
.badge {{ padding: 0.3rem 0.7rem; border-radius: 12px; }}
.badge-red {{ color: white; background: {red}; }}
.badge-yellow {{ color: black; background: {yellow}; }}
.badge-green {{ color: white; background: {green}; }}
.notice {{ padding: 0.8rem; border-radius: 8px; margin: 0.5rem 0; }}
.notice-info {{ background: #e8f1fb; }}
.notice-success {{ background: #e6f7ed; }}
.notice-warning {{ background: #fdf5d9; }}
.notice-error {{ background: #fbe9e7; }}
table {{ width: 100%; border-collapse: collapse; }}
th, td {{ text-align: left; padding: 0.4rem; border-bottom: 1px solid #eee; }}
textarea {{ width: 100%; }}
.metric {{ font-size: 2rem; font-weight: bold; }}
.caption {{ color: #777; font-size: 0.85rem; }}
",
            bg = self.background,
            font = self.font_family,
            radius = self.card_radius,
            red = self.red,
            yellow = self.yellow,
            green = self.green,
        )
    }
}
