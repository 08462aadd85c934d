//! Static HTML export.
//!
//! Embeds the figure JSON in a standalone page that draws it with plotly.js.
//! The page needs no server; open it directly in a browser. By default the
//! plotly.js bundle is inlined as well, so the page also works offline.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use tracing::{debug, info};

use crate::chart::{Figure, FIGURE_TITLE};

/// Pinned plotly.js bundle for [`PlotlyJs::Cdn`] pages.
pub const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const PLOT_DIV_ID: &str = "climatespark-performance";

/// Smallest inline script accepted as the plotly.js bundle.
const MIN_BUNDLE_BYTES: usize = 500_000;

/// How the page obtains plotly.js.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlotlyJs {
    /// Inline the minified bundle; the page has no network dependency.
    #[default]
    Embedded,
    /// Load the pinned bundle from the plotly CDN when the page opens.
    Cdn,
}

impl PlotlyJs {
    fn script_tag(&self) -> Result<String> {
        match self {
            Self::Embedded => Ok(format!(
                "<script type=\"text/javascript\">{}</script>",
                embedded_plotly_js()?
            )),
            Self::Cdn => Ok(format!(
                "<script src=\"{}\" charset=\"utf-8\"></script>",
                PLOTLY_JS_URL
            )),
        }
    }
}

/// The minified plotly.js shipped inside the `plotly` crate.
///
/// With `plotly_embed_js` enabled the crate inlines its bundle into every
/// page it renders; the largest inline script of an empty plot is that bundle.
fn embedded_plotly_js() -> Result<String> {
    let host = plotly::Plot::new().to_html();
    inline_scripts(&host)
        .into_iter()
        .max_by_key(|body| body.len())
        .filter(|body| body.len() >= MIN_BUNDLE_BYTES && body.contains("Plotly"))
        .map(str::to_string)
        .ok_or_else(|| anyhow!("plotly.js bundle not found in plotly crate output"))
}

/// Bodies of all `<script>` elements without a `src` attribute.
fn inline_scripts(html: &str) -> Vec<&str> {
    let mut bodies = Vec::new();
    let mut rest = html;

    while let Some(open) = rest.find("<script") {
        let element = &rest[open..];
        let Some(tag_end) = element.find('>') else { break };
        let body_start = tag_end + 1;
        let Some(close) = element[body_start..].find("</script>") else { break };

        if !element[..tag_end].contains("src=") {
            bodies.push(&element[body_start..body_start + close]);
        }
        rest = &element[body_start + close + "</script>".len()..];
    }

    bodies
}

/// Serialize a figure into a complete HTML document.
pub fn render_html(figure: &Figure, plotly_js: PlotlyJs) -> Result<String> {
    let json = serde_json::to_string(figure).context("serializing figure to JSON")?;
    // A literal "</" inside a <script> body could close the element early.
    let json = json.replace("</", "<\\/");
    debug!(json_bytes = json.len(), ?plotly_js, "figure serialized");

    let plotly = plotly_js.script_tag()?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    {plotly}
    <style>
        body {{
            margin: 0;
            padding: 16px;
            background: #ffffff;
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        }}
    </style>
</head>
<body>
    <div id="{div}" style="width:{width}px;height:{height}px;"></div>
    <script type="text/javascript">
        const figure = {json};
        Plotly.newPlot("{div}", figure.data, figure.layout, {{ responsive: true }});
    </script>
</body>
</html>
"#,
        title = FIGURE_TITLE,
        plotly = plotly,
        div = PLOT_DIV_ID,
        width = figure.layout.width,
        height = figure.layout.height,
        json = json,
    ))
}

/// Render `figure` and write it to `path`, replacing any existing file.
///
/// The document is built completely in memory first, so a failed render
/// never leaves a truncated file behind.
pub fn write_html(figure: &Figure, path: &Path, plotly_js: PlotlyJs) -> Result<()> {
    let html = render_html(figure, plotly_js)?;
    std::fs::write(path, html.as_bytes())
        .with_context(|| format!("writing chart to {}", path.display()))?;
    info!(path = %path.display(), bytes = html.len(), ?plotly_js, "wrote interactive chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::assemble;
    use crate::model::{styles, Dataset};

    fn figure() -> Figure {
        assemble(&Dataset::generate(), &styles())
    }

    fn html(plotly_js: PlotlyJs) -> String {
        render_html(&figure(), plotly_js).unwrap()
    }

    #[test]
    fn test_document_structure() {
        for mode in [PlotlyJs::Cdn, PlotlyJs::Embedded] {
            let html = html(mode);
            assert!(html.starts_with("<!DOCTYPE html>"));
            assert!(html.trim_end().ends_with("</html>"));
            assert!(html.contains("Plotly.newPlot"));
            assert!(html.contains(FIGURE_TITLE));
        }
    }

    #[test]
    fn test_cdn_page_loads_pinned_bundle() {
        let html = html(PlotlyJs::Cdn);
        assert!(html.contains(PLOTLY_JS_URL));
        // one for the plotly bundle tag, one for the inline figure script
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_embedded_page_has_no_remote_scripts() {
        let html = html(PlotlyJs::Embedded);
        assert!(!html.contains("<script src="), "page loads a remote script");
        assert!(!html.contains(PLOTLY_JS_URL));
        assert!(html.len() > MIN_BUNDLE_BYTES);
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_default_is_embedded() {
        assert_eq!(PlotlyJs::default(), PlotlyJs::Embedded);
    }

    #[test]
    fn test_inline_scripts_skips_src() {
        let page = r#"<script src="a.js"></script><p>x</p><script type="module">one()</script><script>two()</script>"#;
        assert_eq!(inline_scripts(page), vec!["one()", "two()"]);
        assert!(inline_scripts("<script>never closed").is_empty());
    }

    #[test]
    fn test_embedded_json_parses() {
        let html = html(PlotlyJs::Cdn);
        let start = html.find("const figure = ").unwrap() + "const figure = ".len();
        let end = start + html[start..].find(";\n").unwrap();
        let value: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();
        assert_eq!(value["data"].as_array().unwrap().len(), 3);
        assert_eq!(value["layout"]["sliders"][0]["steps"].as_array().unwrap().len(), 50);
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.html");
        std::fs::write(&path, "stale").unwrap();

        write_html(&figure(), &path, PlotlyJs::Cdn).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.contains(FIGURE_TITLE));
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("chart.html");
        let err = write_html(&figure(), &path, PlotlyJs::Cdn).unwrap_err();
        assert!(format!("{:#}", err).contains("writing chart to"));
    }
}
