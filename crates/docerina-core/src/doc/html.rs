//! HTML documentation generator

use std::fmt::Write;

use super::crosslink::CrossLinker;
use super::primitives::Primitive;
use super::types::{DocAnnotations, Package, PackageRegistry};
use super::{package_page, INDEX_PAGE, PRIMITIVES_PAGE};
use crate::ast::{Action, Connector, Function, Param, ReturnParam, StructDef};

/// Default title of the generated site
pub const DEFAULT_TITLE: &str = "API Documentation";

/// Generates the HTML documents of a site
///
/// Every type named in a signature or table goes through the
/// [`CrossLinker`], so links are consistent across all documents.
pub struct HtmlGenerator<'a> {
    registry: &'a PackageRegistry,
    primitives: &'a [Primitive],
    linker: CrossLinker<'a>,
    title: String,
}

impl<'a> HtmlGenerator<'a> {
    /// Create a generator over a fully aggregated registry
    #[must_use]
    pub fn new(registry: &'a PackageRegistry, primitives: &'a [Primitive]) -> Self {
        Self {
            registry,
            primitives,
            linker: CrossLinker::new(registry, primitives),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Set the site title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Generate the document for one package
    ///
    /// A section (and its sidebar entry) is written only when the package
    /// has declarations of that kind.
    #[must_use]
    pub fn generate_package(&self, package: &Package) -> String {
        let mut output = String::new();
        let name = escape_html(&package.name);

        self.write_head(&mut output, &name);
        writeln!(output, "<body>").unwrap();

        // Navigation sidebar
        writeln!(output, "<nav class=\"sidebar\">").unwrap();
        writeln!(output, "  <div class=\"sidebar-header\">").unwrap();
        writeln!(output, "    <h2>{name}</h2>").unwrap();
        writeln!(
            output,
            "    <a href=\"{INDEX_PAGE}\">{}</a>",
            escape_html(&self.title)
        )
        .unwrap();
        writeln!(output, "  </div>").unwrap();
        Self::write_nav(&mut output, package);
        writeln!(output, "</nav>").unwrap();

        writeln!(output, "<main class=\"content\">").unwrap();
        writeln!(output, "<header>").unwrap();
        writeln!(output, "  <h1>Package {name}</h1>").unwrap();
        writeln!(output, "</header>").unwrap();

        if !package.functions.is_empty() {
            writeln!(output, "<section id=\"functions\">").unwrap();
            writeln!(output, "  <h2>Functions</h2>").unwrap();
            for function in &package.functions {
                self.write_function(&mut output, function, &package.name);
            }
            writeln!(output, "</section>").unwrap();
        }

        if !package.connectors.is_empty() {
            writeln!(output, "<section id=\"connectors\">").unwrap();
            writeln!(output, "  <h2>Connectors</h2>").unwrap();
            for connector in &package.connectors {
                self.write_connector(&mut output, connector, &package.name);
            }
            writeln!(output, "</section>").unwrap();
        }

        if !package.structs.is_empty() {
            writeln!(output, "<section id=\"structs\">").unwrap();
            writeln!(output, "  <h2>Structs</h2>").unwrap();
            for def in &package.structs {
                self.write_struct(&mut output, def, &package.name);
            }
            writeln!(output, "</section>").unwrap();
        }

        writeln!(output, "</main>").unwrap();
        Self::write_footer(&mut output);
        output
    }

    /// Generate the index document listing every package
    #[must_use]
    pub fn generate_index(&self) -> String {
        let mut output = String::new();
        let title = escape_html(&self.title);

        self.write_head(&mut output, &title);
        writeln!(output, "<body>").unwrap();
        writeln!(output, "<main class=\"content index\">").unwrap();
        writeln!(output, "<header>").unwrap();
        writeln!(output, "  <h1>{title}</h1>").unwrap();
        writeln!(output, "</header>").unwrap();

        writeln!(output, "<section id=\"packages\">").unwrap();
        writeln!(output, "  <h2>Packages</h2>").unwrap();
        writeln!(output, "  <ul>").unwrap();
        for package in self.registry {
            writeln!(
                output,
                "    <li><a href=\"{}\">{}</a></li>",
                escape_html(&package_page(&package.name)),
                escape_html(&package.name)
            )
            .unwrap();
        }
        writeln!(output, "  </ul>").unwrap();
        writeln!(output, "</section>").unwrap();

        writeln!(output, "<section id=\"primitives\">").unwrap();
        writeln!(output, "  <h2>Primitives</h2>").unwrap();
        writeln!(
            output,
            "  <p><a href=\"{PRIMITIVES_PAGE}\">Built-in types</a></p>"
        )
        .unwrap();
        writeln!(output, "</section>").unwrap();

        writeln!(output, "</main>").unwrap();
        Self::write_footer(&mut output);
        output
    }

    /// Generate the primitives document
    #[must_use]
    pub fn generate_primitives(&self) -> String {
        let mut output = String::new();

        self.write_head(&mut output, "Primitives");
        writeln!(output, "<body>").unwrap();
        writeln!(output, "<main class=\"content primitives\">").unwrap();
        writeln!(output, "<header>").unwrap();
        writeln!(output, "  <h1>Primitives</h1>").unwrap();
        writeln!(
            output,
            "  <a href=\"{INDEX_PAGE}\">{}</a>",
            escape_html(&self.title)
        )
        .unwrap();
        writeln!(output, "</header>").unwrap();

        writeln!(output, "<section>").unwrap();
        for primitive in self.primitives {
            writeln!(output, "  <div class=\"item\" id=\"{}\">", primitive.name).unwrap();
            writeln!(output, "    <h3><code>{}</code></h3>", primitive.name).unwrap();
            writeln!(
                output,
                "    <p>{}</p>",
                escape_html(primitive.description)
            )
            .unwrap();
            writeln!(output, "  </div>").unwrap();
        }
        writeln!(output, "</section>").unwrap();

        writeln!(output, "</main>").unwrap();
        Self::write_footer(&mut output);
        output
    }

    fn write_head(&self, output: &mut String, page_title: &str) {
        writeln!(output, "<!DOCTYPE html>").unwrap();
        writeln!(output, "<html lang=\"en\">").unwrap();
        writeln!(output, "<head>").unwrap();
        writeln!(output, "  <meta charset=\"UTF-8\">").unwrap();
        writeln!(
            output,
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )
        .unwrap();
        writeln!(
            output,
            "  <title>{page_title} - {}</title>",
            escape_html(&self.title)
        )
        .unwrap();
        Self::write_styles(output);
        writeln!(output, "</head>").unwrap();
    }

    fn write_footer(output: &mut String) {
        writeln!(output, "<footer>").unwrap();
        writeln!(output, "  <p>Generated by Docerina</p>").unwrap();
        writeln!(output, "</footer>").unwrap();
        writeln!(output, "</body>").unwrap();
        writeln!(output, "</html>").unwrap();
    }

    fn write_styles(output: &mut String) {
        writeln!(output, "<style>").unwrap();
        writeln!(
            output,
            r#"
:root {{
  --bg-color: #fdfdfd;
  --text-color: #222;
  --accent-color: #2a6db0;
  --code-bg: #f3f5f8;
  --sidebar-bg: #eef1f5;
  --border-color: #d0d7de;
}}

body {{
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  background-color: var(--bg-color);
  color: var(--text-color);
  line-height: 1.5;
  margin: 0;
  display: flex;
}}

.sidebar {{
  width: 260px;
  background-color: var(--sidebar-bg);
  height: 100vh;
  position: fixed;
  overflow-y: auto;
  border-right: 1px solid var(--border-color);
  padding: 1rem;
  box-sizing: border-box;
}}

.sidebar h3 {{
  font-size: 0.8rem;
  text-transform: uppercase;
  color: #666;
  margin: 1rem 0 0.25rem;
}}

.sidebar ul {{
  list-style: none;
  padding-left: 0.5rem;
}}

.sidebar a, header a {{
  color: var(--accent-color);
  text-decoration: none;
}}

.content {{
  margin-left: 260px;
  padding: 2rem 3rem;
  max-width: 960px;
}}

.content.index, .content.primitives {{
  margin-left: 0;
}}

section h2 {{
  border-bottom: 2px solid var(--border-color);
  padding-bottom: 0.25rem;
}}

.item, .action {{
  margin: 1.25rem 0;
  padding: 0.75rem 1rem;
  background: var(--code-bg);
  border-left: 3px solid var(--accent-color);
}}

.signature {{
  font-family: 'Fira Code', 'Consolas', monospace;
  font-size: 0.9rem;
  margin: 0.5rem 0;
}}

table {{
  border-collapse: collapse;
  margin: 0.5rem 0;
}}

th, td {{
  border: 1px solid var(--border-color);
  padding: 0.25rem 0.75rem;
  text-align: left;
}}

footer {{
  position: fixed;
  bottom: 0;
  right: 0;
  padding: 0.5rem 1rem;
  font-size: 0.75rem;
  color: #888;
}}
"#
        )
        .unwrap();
        writeln!(output, "</style>").unwrap();
    }

    fn write_nav(output: &mut String, package: &Package) {
        writeln!(output, "  <nav>").unwrap();

        if !package.functions.is_empty() {
            writeln!(output, "    <h3>Functions</h3>").unwrap();
            writeln!(output, "    <ul>").unwrap();
            for function in &package.functions {
                Self::write_nav_link(output, &function.anchor(), &function.name.name);
            }
            writeln!(output, "    </ul>").unwrap();
        }

        if !package.connectors.is_empty() {
            writeln!(output, "    <h3>Connectors</h3>").unwrap();
            writeln!(output, "    <ul>").unwrap();
            for connector in &package.connectors {
                Self::write_nav_link(output, &connector.name.name, &connector.name.name);
                for action in &connector.actions {
                    Self::write_nav_link(output, &action.anchor(), &action.anchor());
                }
            }
            writeln!(output, "    </ul>").unwrap();
        }

        if !package.structs.is_empty() {
            writeln!(output, "    <h3>Structs</h3>").unwrap();
            writeln!(output, "    <ul>").unwrap();
            for def in &package.structs {
                Self::write_nav_link(output, &def.name.name, &def.name.name);
            }
            writeln!(output, "    </ul>").unwrap();
        }

        writeln!(output, "  </nav>").unwrap();
    }

    fn write_nav_link(output: &mut String, anchor: &str, label: &str) {
        writeln!(
            output,
            "      <li><a href=\"#{anchor}\">{}</a></li>",
            escape_html(label)
        )
        .unwrap();
    }

    fn write_function(&self, output: &mut String, function: &Function, package: &str) {
        let doc = DocAnnotations::parse(&function.annotations);
        let name = &function.name.name;

        writeln!(output, "  <div class=\"item\" id=\"{}\">", function.anchor()).unwrap();
        writeln!(output, "    <h3><code>{name}</code></h3>").unwrap();
        writeln!(
            output,
            "    <div class=\"signature\">{}</div>",
            self.signature(
                "function",
                function.is_native,
                name,
                &function.params,
                &function.returns,
                package
            )
        )
        .unwrap();
        Self::write_description(output, &doc, "    ");
        self.write_param_table(output, &function.params, &doc, package, "    ");
        self.write_return_table(output, &function.returns, &doc, package, "    ");
        writeln!(output, "  </div>").unwrap();
    }

    fn write_connector(&self, output: &mut String, connector: &Connector, package: &str) {
        let doc = DocAnnotations::parse(&connector.annotations);
        let name = &connector.name.name;

        writeln!(output, "  <div class=\"item\" id=\"{name}\">").unwrap();
        writeln!(output, "    <h3><code>{name}</code></h3>").unwrap();
        writeln!(
            output,
            "    <div class=\"signature\">{}</div>",
            self.signature(
                "connector",
                connector.is_native,
                name,
                &connector.params,
                &[],
                package
            )
        )
        .unwrap();
        Self::write_description(output, &doc, "    ");
        self.write_param_table(output, &connector.params, &doc, package, "    ");

        if !connector.actions.is_empty() {
            writeln!(output, "    <div class=\"actions\">").unwrap();
            writeln!(output, "      <h4>Actions</h4>").unwrap();
            for action in &connector.actions {
                self.write_action(output, action, package);
            }
            writeln!(output, "    </div>").unwrap();
        }
        writeln!(output, "  </div>").unwrap();
    }

    fn write_action(&self, output: &mut String, action: &Action, package: &str) {
        let doc = DocAnnotations::parse(&action.annotations);

        writeln!(output, "      <div class=\"action\" id=\"{}\">", action.anchor()).unwrap();
        writeln!(output, "        <h4><code>{}</code></h4>", action.name.name).unwrap();
        writeln!(
            output,
            "        <div class=\"signature\">{}</div>",
            self.signature(
                "action",
                action.is_native,
                &action.name.name,
                &action.params,
                &action.returns,
                package
            )
        )
        .unwrap();
        Self::write_description(output, &doc, "        ");
        self.write_param_table(output, &action.params, &doc, package, "        ");
        self.write_return_table(output, &action.returns, &doc, package, "        ");
        writeln!(output, "      </div>").unwrap();
    }

    fn write_struct(&self, output: &mut String, def: &StructDef, package: &str) {
        let doc = DocAnnotations::parse(&def.annotations);
        let name = &def.name.name;

        writeln!(output, "  <div class=\"item\" id=\"{name}\">").unwrap();
        writeln!(output, "    <h3><code>{name}</code></h3>").unwrap();
        writeln!(output, "    <div class=\"signature\">struct {name}</div>").unwrap();
        Self::write_description(output, &doc, "    ");

        if !def.fields.is_empty() {
            writeln!(output, "    <table class=\"fields\">").unwrap();
            writeln!(
                output,
                "      <tr><th>Field</th><th>Type</th><th>Description</th></tr>"
            )
            .unwrap();
            for field in &def.fields {
                Self::write_row(
                    output,
                    &field.name.name,
                    &self.linker.link(&field.ty, package),
                    doc.field(&field.name.name),
                );
            }
            writeln!(output, "    </table>").unwrap();
        }
        writeln!(output, "  </div>").unwrap();
    }

    /// `[native ]keyword name(T a, U b)[ (R r)]`
    fn signature(
        &self,
        keyword: &str,
        is_native: bool,
        name: &str,
        params: &[Param],
        returns: &[ReturnParam],
        package: &str,
    ) -> String {
        let mut sig = String::new();
        if is_native {
            sig.push_str("native ");
        }
        write!(sig, "{keyword} {name}(").unwrap();
        let params: Vec<String> = params
            .iter()
            .map(|p| format!("{} {}", self.linker.link(&p.ty, package), p.name.name))
            .collect();
        sig.push_str(&params.join(", "));
        sig.push(')');

        if !returns.is_empty() {
            let returns: Vec<String> = returns
                .iter()
                .map(|r| {
                    let ty = self.linker.link(&r.ty, package);
                    match &r.name {
                        Some(name) => format!("{ty} {}", name.name),
                        None => ty,
                    }
                })
                .collect();
            write!(sig, " ({})", returns.join(", ")).unwrap();
        }
        sig
    }

    fn write_description(output: &mut String, doc: &DocAnnotations, indent: &str) {
        if let Some(description) = &doc.description {
            writeln!(output, "{indent}<p>{}</p>", escape_html(description)).unwrap();
        }
    }

    fn write_param_table(
        &self,
        output: &mut String,
        params: &[Param],
        doc: &DocAnnotations,
        package: &str,
        indent: &str,
    ) {
        if params.is_empty() {
            return;
        }
        writeln!(output, "{indent}<table class=\"params\">").unwrap();
        writeln!(
            output,
            "{indent}  <tr><th>Parameter</th><th>Type</th><th>Description</th></tr>"
        )
        .unwrap();
        for param in params {
            Self::write_row(
                output,
                &param.name.name,
                &self.linker.link(&param.ty, package),
                doc.param(&param.name.name),
            );
        }
        writeln!(output, "{indent}</table>").unwrap();
    }

    fn write_return_table(
        &self,
        output: &mut String,
        returns: &[ReturnParam],
        doc: &DocAnnotations,
        package: &str,
        indent: &str,
    ) {
        if returns.is_empty() {
            return;
        }
        writeln!(output, "{indent}<table class=\"returns\">").unwrap();
        writeln!(
            output,
            "{indent}  <tr><th>Return</th><th>Type</th><th>Description</th></tr>"
        )
        .unwrap();
        for (index, ret) in returns.iter().enumerate() {
            let name = ret.name.as_ref().map(|n| n.name.as_str());
            Self::write_row(
                output,
                ret.name_str(),
                &self.linker.link(&ret.ty, package),
                doc.return_value(index, name),
            );
        }
        writeln!(output, "{indent}</table>").unwrap();
    }

    /// `<tr><td>NAME</td><td>TYPE</td><td>DESCRIPTION</td></tr>`; `ty` is already HTML
    fn write_row(output: &mut String, name: &str, ty: &str, description: &str) {
        writeln!(
            output,
            "<tr><td>{}</td><td>{ty}</td><td>{}</td></tr>",
            escape_html(name),
            escape_html(description)
        )
        .unwrap();
    }
}

/// Escape text for HTML element and attribute content
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
