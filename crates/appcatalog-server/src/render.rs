//! HTML rendering of the catalog with embedded handlebars templates.

use appcatalog_bundle::{BundleSummary, IconRef};
use chrono::{DateTime, Utc};
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use serde_json::json;
use urlencoding::encode;

const LIST_TEMPLATE: &str = "app_list";
const DETAIL_TEMPLATE: &str = "app_detail";

/// Link used for bundles without cached artwork.
pub const DEFAULT_ICON_HREF: &str = "/default.png";

/// Timestamp format shown on pages.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// One bundle as pages and the JSON listing see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppView {
    pub file_name: String,
    pub display_name: String,
    pub version: String,
    pub short_version: Option<String>,
    pub bundle_id: String,
    pub icon_href: String,
    pub detail_href: String,
    pub download_href: String,
    pub size: u64,
    pub size_label: String,
    pub created: String,
    pub modified: String,
}

impl From<&BundleSummary> for AppView {
    fn from(summary: &BundleSummary) -> Self {
        Self {
            file_name: summary.file_name.clone(),
            display_name: summary.display_name.clone(),
            version: summary.version.clone(),
            short_version: summary.short_version.clone(),
            bundle_id: summary.bundle_id.clone(),
            icon_href: icon_href(&summary.icon),
            detail_href: format!("/?app={}", encode(&summary.file_name)),
            download_href: format!("/{}", encode(&summary.file_name)),
            size: summary.size,
            size_label: size_label(summary.size),
            created: DateTime::<Utc>::from(summary.created_at)
                .format(DATE_FORMAT)
                .to_string(),
            modified: DateTime::<Utc>::from(summary.modified_at)
                .format(DATE_FORMAT)
                .to_string(),
        }
    }
}

/// Link to a bundle's icon: the cache file name, or the default asset.
///
/// Links are percent-encoded, so templates emit them unescaped.
pub fn icon_href(icon: &IconRef) -> String {
    match icon.file_name() {
        Some(name) => format!("/{}", encode(&name)),
        None => DEFAULT_ICON_HREF.to_string(),
    }
}

/// Human readable size, one decimal above a kilobyte.
pub fn size_label(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Compiled page templates.
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    /// Compile the embedded templates.
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(LIST_TEMPLATE, include_str!("../templates/app_list.hbs"))?;
        registry.register_template_string(
            DETAIL_TEMPLATE,
            include_str!("../templates/app_detail.hbs"),
        )?;
        Ok(Self { registry })
    }

    /// Listing page for `apps`.
    pub fn render_list(&self, apps: &[AppView]) -> Result<String, RenderError> {
        self.registry.render(LIST_TEMPLATE, &json!({ "apps": apps }))
    }

    /// Detail page for one bundle.
    pub fn render_detail(&self, app: &AppView) -> Result<String, RenderError> {
        self.registry.render(DETAIL_TEMPLATE, &json!({ "app": app }))
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates").finish_non_exhaustive()
    }
}
