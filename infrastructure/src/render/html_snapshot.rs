//! Self-contained HTML snapshot of the report document.
//!
//! Real report templating lives outside the harness; this renderer keeps the
//! HTML tree in lockstep with the JSON document by writing a minimal shell
//! that embeds the document verbatim and renders it client-side. It runs
//! after every recorded exchange, so the HTML is as crash-fresh as the JSON.

use crate::layout::ReportLayout;
use chatcheck_application::ports::report_renderer::{RenderError, ReportRenderer};
use chatcheck_domain::Report;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct HtmlSnapshotRenderer {
    html_path: PathBuf,
}

impl HtmlSnapshotRenderer {
    pub fn new(layout: &ReportLayout) -> Self {
        Self {
            html_path: layout.html_document(),
        }
    }

    pub fn at_path(html_path: impl Into<PathBuf>) -> Self {
        Self {
            html_path: html_path.into(),
        }
    }

    fn shell(document_json: &str) -> String {
        // </script> inside a JSON string would terminate the data block early.
        let safe = document_json.replace("</", "<\\/");
        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>chatcheck report</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }}
.pass {{ color: #1a7f37; }}
.fail {{ color: #cf222e; }}
.error {{ color: #9a6700; }}
</style>
</head>
<body>
<h1 id="title">chatcheck report</h1>
<div id="summary"></div>
<table id="results"><thead>
<tr><th>#</th><th>Topic</th><th>Question</th><th>Expected</th><th>Actual</th><th>Score</th><th>Status</th></tr>
</thead><tbody></tbody></table>
<script id="report-data" type="application/json">{safe}</script>
<script>
const report = JSON.parse(document.getElementById("report-data").textContent);
const s = report.summary[0];
if (s) {{
  document.getElementById("title").textContent = s.target + " — " + s.date;
  document.getElementById("summary").textContent =
    `Tester: ${{s.tester}} · Judge: ${{s.judged_by}} · ` +
    `Passed: ${{s.passed}} / Failed: ${{s.failed}} of ${{s.total_questions}}`;
}}
const tbody = document.querySelector("#results tbody");
for (const row of report.data) {{
  const tr = document.createElement("tr");
  for (const value of [row.no, row.title, row.question, row.expected,
                       row.actual, row.score, row.status]) {{
    const td = document.createElement("td");
    td.textContent = String(value);
    tr.appendChild(td);
  }}
  tr.className = String(row.status).toLowerCase();
  tbody.appendChild(tr);
}}
</script>
</body>
</html>
"##
        )
    }
}

impl ReportRenderer for HtmlSnapshotRenderer {
    fn render(&self, json_path: &Path) -> Result<PathBuf, RenderError> {
        let raw = std::fs::read_to_string(json_path)?;
        // Validate before embedding so a torn read never produces broken HTML.
        let _: Report =
            serde_json::from_str(&raw).map_err(|e| RenderError::BadDocument(e.to_string()))?;

        if let Some(parent) = self.html_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.html_path, Self::shell(&raw))?;
        debug!(path = %self.html_path.display(), "HTML snapshot written");
        Ok(self.html_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatcheck_domain::Report;

    #[test]
    fn test_render_writes_html_embedding_document() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("run.json");
        let html_path = dir.path().join("run.html");
        let document = serde_json::to_string_pretty(&Report::skeleton()).unwrap();
        std::fs::write(&json_path, &document).unwrap();

        let renderer = HtmlSnapshotRenderer::at_path(&html_path);
        let written = renderer.render(&json_path).unwrap();

        assert_eq!(written, html_path);
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains(r#"type="application/json""#));
        assert!(html.contains(r#""summary""#));
    }

    #[test]
    fn test_corrupt_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("run.json");
        std::fs::write(&json_path, "{ torn").unwrap();

        let renderer = HtmlSnapshotRenderer::at_path(dir.path().join("run.html"));
        assert!(matches!(
            renderer.render(&json_path),
            Err(RenderError::BadDocument(_))
        ));
    }

    #[test]
    fn test_shell_keeps_client_side_renderer() {
        let shell = HtmlSnapshotRenderer::shell("{}");
        assert!(shell.contains(r##"document.querySelector("#results tbody")"##));
        assert!(shell.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_script_terminator_is_escaped() {
        let shell = HtmlSnapshotRenderer::shell(r#"{"x":"</script>"}"#);
        assert!(!shell.contains(r#""</script>""#));
    }
}
