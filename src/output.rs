use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{OutputError, PageError};
use crate::generate::{StaticPaths, StaticProps};
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::store::PageStore;

/// Directory (below the output root) holding one JSON file per episode page
pub const EPISODE_DIR: &str = "episode";

/// Name of the file listing the prerendered paths
pub const PATHS_FILENAME: &str = "paths.json";

/// Result of a build run
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub paths: StaticPaths,
    /// Files written, in generation order
    pub written: Vec<PathBuf>,
}

/// File name for a page's props
pub fn page_filename(slug: &str) -> Result<String, OutputError> {
    let stem = sanitize_filename::sanitize(slug);
    if stem.is_empty() || stem == "." || stem == ".." {
        return Err(OutputError::InvalidSlug(slug.to_string()));
    }
    Ok(format!("{stem}.json"))
}

fn ensure_dir(path: &Path) -> Result<(), OutputError> {
    std::fs::create_dir_all(path).map_err(|e| OutputError::CreateDirectoryFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| OutputError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Writes page props below `<out_dir>/episode/`, one file per slug.
///
/// Slugs that sanitize to the same file name are rejected instead of
/// overwriting each other.
pub struct PageWriter {
    dir: PathBuf,
    written: HashSet<String>,
}

impl PageWriter {
    pub fn new(out_dir: &Path) -> Self {
        Self {
            dir: out_dir.join(EPISODE_DIR),
            written: HashSet::new(),
        }
    }

    /// Write `props` as the page for `slug`
    pub fn write(&mut self, slug: &str, props: &StaticProps) -> Result<PathBuf, OutputError> {
        let filename = page_filename(slug)?;
        if self.written.contains(&filename) {
            return Err(OutputError::DuplicatePage {
                slug: slug.to_string(),
                file: filename,
            });
        }

        ensure_dir(&self.dir)?;
        let path = self.dir.join(&filename);
        write_json(props, &path)?;

        self.written.insert(filename);
        Ok(path)
    }
}

/// Write the prerender targets and fallback mode to `<out_dir>/paths.json`
pub fn write_static_paths(paths: &StaticPaths, out_dir: &Path) -> Result<PathBuf, OutputError> {
    ensure_dir(out_dir)?;

    let path = out_dir.join(PATHS_FILENAME);
    write_json(paths, &path)?;
    Ok(path)
}

/// Prerender every enumerated page and write the results below `out_dir`
pub async fn build_pages<C: HttpClient>(
    store: &PageStore<C>,
    out_dir: &Path,
    reporter: &SharedProgressReporter,
) -> Result<BuildResult, PageError> {
    let paths = store.prerender().await?;
    let mut writer = PageWriter::new(out_dir);
    let mut written = Vec::with_capacity(paths.paths.len() + 1);

    for target in &paths.paths {
        let Some(page) = store.peek(&target.slug).await else {
            continue;
        };

        let path = writer.write(&target.slug, &page.props)?;
        reporter.report(ProgressEvent::PageWritten {
            slug: target.slug.clone(),
            path: path.display().to_string(),
        });
        written.push(path);
    }

    written.push(write_static_paths(&paths, out_dir)?);

    Ok(BuildResult { paths, written })
}
