// Where rendered chart pages go.
use charts::RenderedPage;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EngineError;

/// Receives pages one after another, in page order.
pub trait ChartSink {
    fn present(&mut self, page: &RenderedPage) -> Result<(), EngineError>;
}

/// Writes each page as `page_{n}.svg` into a directory, creating it on first use.
/// Pages left there by an earlier run are removed before the first page is written.
pub struct SvgDirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SvgDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn remove_stale_pages(&self) -> Result<(), EngineError> {
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            if is_page_file(&name.to_string_lossy()) && entry.file_type()?.is_file() {
                fs::remove_file(entry.path())?;
                tracing::debug!(path = %entry.path().display(), "Removed stale chart page");
            }
        }
        Ok(())
    }
}

fn is_page_file(name: &str) -> bool {
    name.strip_prefix("page_")
        .and_then(|rest| rest.strip_suffix(".svg"))
        .map_or(false, |n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

impl ChartSink for SvgDirectorySink {
    fn present(&mut self, page: &RenderedPage) -> Result<(), EngineError> {
        if self.written.is_empty() {
            fs::create_dir_all(&self.dir)?;
            self.remove_stale_pages()?;
        }
        let path = self.dir.join(format!("page_{}.svg", page.number));
        fs::write(&path, &page.svg)?;
        tracing::info!(
            page = page.number,
            coins = %page.coins.join(", "),
            path = %path.display(),
            "Wrote chart page"
        );
        self.written.push(path);
        Ok(())
    }
}
