//! Rendering and writing a complete documentation site

use std::path::{Path, PathBuf};

use tracing::info;

use super::html::{HtmlGenerator, DEFAULT_TITLE};
use super::primitives::{list_primitives, Primitive};
use super::project::{aggregate_with, PackageFilter};
use super::types::PackageRegistry;
use super::{package_page, INDEX_PAGE, PRIMITIVES_PAGE};
use crate::builder::{BallerinaModelBuilder, SourceModelBuilder};
use crate::config::DocConfig;
use crate::error::{DocError, DocResult};

/// One rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name inside the output directory
    pub file_name: String,
    /// HTML content
    pub content: String,
}

impl Document {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// Outcome of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Documented packages, in name order
    pub packages: Vec<String>,
    /// Files written, in write order
    pub written: Vec<PathBuf>,
}

/// Render every document of the site with the default title
///
/// Order: `index.html`, `primitives.html`, then one document per package in
/// registry order.
#[must_use]
pub fn render(registry: &PackageRegistry, primitives: &[Primitive]) -> Vec<Document> {
    render_with_title(registry, primitives, DEFAULT_TITLE)
}

/// Render every document of the site
#[must_use]
pub fn render_with_title(
    registry: &PackageRegistry,
    primitives: &[Primitive],
    title: &str,
) -> Vec<Document> {
    let generator = HtmlGenerator::new(registry, primitives).with_title(title);

    let mut documents = Vec::with_capacity(registry.len() + 2);
    documents.push(Document::new(INDEX_PAGE, generator.generate_index()));
    documents.push(Document::new(
        PRIMITIVES_PAGE,
        generator.generate_primitives(),
    ));
    for package in registry {
        documents.push(Document::new(
            package_page(&package.name),
            generator.generate_package(package),
        ));
    }
    documents
}

/// Write documents into `out_dir`, creating it if needed
///
/// Existing files with the same names are replaced.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot be
/// written. Files written before the failure are left in place.
pub fn write_site(documents: &[Document], out_dir: &Path) -> DocResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).map_err(|e| DocError::io(out_dir, e))?;

    let mut written = Vec::with_capacity(documents.len());
    for document in documents {
        let path = out_dir.join(&document.file_name);
        std::fs::write(&path, &document.content).map_err(|e| DocError::io(&path, e))?;
        info!("Generated: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Aggregate, render and write a site with the built-in builder
///
/// # Errors
///
/// Returns an error if the source root is missing or any read or write fails.
pub fn generate(root: &Path, filter: &PackageFilter, config: &DocConfig) -> DocResult<Report> {
    generate_with(&BallerinaModelBuilder, root, filter, config)
}

/// Aggregate, render and write a site with any builder
///
/// Every document is rendered in memory before the first write.
///
/// # Errors
///
/// See [`generate`].
pub fn generate_with(
    builder: &dyn SourceModelBuilder,
    root: &Path,
    filter: &PackageFilter,
    config: &DocConfig,
) -> DocResult<Report> {
    let registry = aggregate_with(builder, root, filter, &config.source.extension)?;
    let documents = render_with_title(&registry, list_primitives(), &config.output.title);
    let written = write_site(&documents, &config.output.dir)?;

    Ok(Report {
        packages: registry.names().map(str::to_string).collect(),
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn render_order() {
        let mut registry = PackageRegistry::new();
        registry.entry("b");
        registry.entry("a");

        let names: Vec<_> = render(&registry, list_primitives())
            .into_iter()
            .map(|d| d.file_name)
            .collect();
        assert_eq!(names, vec!["index.html", "primitives.html", "a.html", "b.html"]);
    }

    #[test]
    fn write_creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("api-docs/html");
        let written = write_site(&[Document::new("index.html", "<html></html>")], &out).unwrap();

        assert_eq!(written, vec![out.join("index.html")]);
        assert_eq!(
            std::fs::read_to_string(out.join("index.html")).unwrap(),
            "<html></html>"
        );
    }

    #[test]
    fn write_into_file_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = write_site(&[Document::new("index.html", "")], &blocker).unwrap_err();
        assert!(matches!(err, DocError::Io { .. }));
    }
}
