//! HTML gallery report
//!
//! One fragment per match, in match order, substituted into a static page.
//! Every interpolated value is HTML-escaped. Covers are referenced relative
//! to the report as `covers/<filename>` whether or not the download worked.

use crate::error::{PipelineError, PipelineResult};
use crate::models::MatchRecord;
use crate::services::cover_fetcher::cover_filename;
use albumatch_common::html::escape_html;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_FILE_NAME: &str = "results.html";
pub const COVERS_DIR_NAME: &str = "covers";

const ALBUMS_PLACEHOLDER: &str = "__ALBUMS_PLACEHOLDER__";

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Results on YouTube Music</title>
    <style>
      body {
        background-color: black;
        box-sizing: border-box;
        color: white;
        margin: 0;
        padding: 25px;
      }

      .container {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
        grid-auto-rows: minmax(100px, auto);
        gap: 10px;
      }

      .item {
        background-color: #111;
        border: 1px solid #222;
        border-radius: 7px;
        max-width: 270px;
        padding: 10px;
      }

      .item a:not(.cover-link) {
        color: white;
        text-decoration: none;
        border-bottom: 1px dotted #999;
      }

      .item dl {
        margin: 0;
      }

      .item dl dd {
        margin-inline-start: 0;
      }

      .item dl dt {
        font-size: 80%;
        margin-top: 10px;
        opacity: 0.7;
      }

      .item img {
        max-width: 100%;
        width: 270px;
      }
    </style>
  </head>
  <body>
    <div class="container">
__ALBUMS_PLACEHOLDER__
    </div>
  </body>
</html>
"#;

/// Escaped values embedded in one report fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub searched: String,
    pub full_name: String,
    pub filename: String,
    pub url: String,
}

impl ReportEntry {
    pub fn from_record(record: &MatchRecord) -> Self {
        Self {
            searched: escape_html(&record.query),
            full_name: escape_html(&record.album.display_name()),
            filename: escape_html(&cover_filename(&record.album)),
            url: escape_html(&record.album.url),
        }
    }

    fn render(&self) -> String {
        format!(
            r#"      <div class="item">
        <a href="{url}" class="cover-link">
          <img src="{covers}/{filename}" alt="{full_name}">
        </a>
        <dl>
          <dt>Searched</dt>
          <dd>{searched}</dd>
          <dt>Found</dt>
          <dd><a href="{url}">{full_name}</a></dd>
        </dl>
      </div>"#,
            url = self.url,
            covers = COVERS_DIR_NAME,
            filename = self.filename,
            full_name = self.full_name,
            searched = self.searched,
        )
    }
}

/// Render the full report document
pub fn render_report(records: &[MatchRecord]) -> String {
    let fragments: Vec<String> = records
        .iter()
        .map(|r| ReportEntry::from_record(r).render())
        .collect();
    PAGE_TEMPLATE.replacen(ALBUMS_PLACEHOLDER, &fragments.join("\n"), 1)
}

/// Writes the report document
pub struct ReportRenderer {
    path: PathBuf,
}

impl ReportRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(output_dir: &Path) -> Self {
        Self::new(output_dir.join(REPORT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render `records` and overwrite the report file
    pub async fn write(&self, records: &[MatchRecord]) -> PipelineResult<()> {
        tokio::fs::write(&self.path, render_report(records))
            .await
            .map_err(|source| PipelineError::ReportWrite {
                path: self.path.clone(),
                source,
            })?;
        info!(entries = records.len(), "Saved report {}", self.path.display());
        Ok(())
    }
}
