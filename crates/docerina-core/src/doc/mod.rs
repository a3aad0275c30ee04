//! Documentation generation for Ballerina packages
//!
//! This module aggregates source modules into packages, resolves type
//! references across them, and renders a static HTML site.

mod crosslink;
mod html;
mod primitives;
mod project;
mod site;
mod types;

pub use crosslink::{CrossLinker, LinkTarget};
pub use html::{escape_html, HtmlGenerator, DEFAULT_TITLE};
pub use primitives::{find_primitive, is_primitive, list_primitives, Primitive};
pub use project::{aggregate, aggregate_with, discover, PackageFilter, SOURCE_EXTENSION};
pub use site::{generate, generate_with, render, render_with_title, write_site, Document, Report};
pub use types::{DocAnnotations, Package, PackageRegistry, ReturnDoc};

/// File name of the index document
pub const INDEX_PAGE: &str = "index.html";

/// File name of the primitives document
pub const PRIMITIVES_PAGE: &str = "primitives.html";

/// File name of a package document: the package name plus `.html`
#[must_use]
pub fn package_page(package: &str) -> String {
    format!("{package}.html")
}
