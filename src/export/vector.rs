use rayon::prelude::*;

use crate::{
    assets::source::AssetSource,
    export::{Download, export_file_name},
    foundation::error::{MojiError, MojiResult},
    selection::Composite,
    settings::VectorCanvas,
};

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Fetch the raw markup of every present layer, in z-order.
///
/// Fetches run in parallel and are joined; any failure aborts the batch.
pub fn fetch_markup(source: &dyn AssetSource, composite: &Composite<'_>) -> MojiResult<Vec<String>> {
    let refs: Vec<_> = composite
        .present()
        .map(|(_, asset)| asset.reference.clone())
        .collect();
    refs.par_iter()
        .map(|reference| {
            let bytes = source.fetch(reference)?;
            String::from_utf8(bytes)
                .map_err(|e| MojiError::load(format!("asset '{reference}' is not utf-8: {e}")))
        })
        .collect()
}

/// Concatenate the root children of every document, in order, under one fresh `<svg>` root.
///
/// Children are re-serialized from the parsed tree: no deduplication, scaling or repositioning.
/// Entity references are written out resolved, so DTDs of the sources are not needed. Prefixed
/// namespace declarations on the source roots are hoisted to the new root, first binding wins;
/// a layer binding the same prefix to another URI re-declares it on its own elements.
pub fn merge_svg_documents(documents: &[String], canvas: &VectorCanvas) -> MojiResult<String> {
    let mut hoisted: Vec<(Option<String>, String)> = vec![(None, SVG_NS.to_string())];
    let mut body = String::new();
    for (i, text) in documents.iter().enumerate() {
        let opts = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, opts)
            .map_err(|e| MojiError::export(format!("layer {i}: {e}")))?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(MojiError::export(format!(
                "layer {i}: root element is <{}>, expected <svg>",
                root.tag_name().name()
            )));
        }

        for ns in root.namespaces() {
            let Some(prefix) = ns.name() else {
                continue;
            };
            if prefix == "xml" || hoisted.iter().any(|(p, _)| p.as_deref() == Some(prefix)) {
                continue;
            }
            hoisted.push((Some(prefix.to_string()), ns.uri().to_string()));
        }

        for child in root.children() {
            write_node(&mut body, child, &hoisted);
        }
    }

    let mut out = String::with_capacity(body.len() + 160);
    out.push_str(&format!(
        r#"<svg width="{}" height="{}" viewBox="{}" fill="none" xmlns="{SVG_NS}""#,
        canvas.width,
        canvas.height,
        escape_attr(&canvas.view_box)
    ));
    for (prefix, uri) in &hoisted {
        if let Some(prefix) = prefix {
            out.push_str(&format!(r#" xmlns:{prefix}="{}""#, escape_attr(uri)));
        }
    }
    out.push('>');
    out.push_str(&body);
    out.push_str("</svg>");
    Ok(out)
}

#[tracing::instrument(skip(source, composite, canvas))]
pub fn export_svg(
    source: &dyn AssetSource,
    composite: &Composite<'_>,
    canvas: &VectorCanvas,
    prefix: &str,
    unix_ms: u128,
) -> MojiResult<Download> {
    let documents = fetch_markup(source, composite)?;
    tracing::debug!(layers = documents.len(), "merging svg layers");
    let merged = merge_svg_documents(&documents, canvas)?;
    Ok(Download {
        file_name: export_file_name(prefix, unix_ms, "svg"),
        content_type: SVG_CONTENT_TYPE,
        bytes: merged.into_bytes(),
    })
}

/// Write `node` and its subtree. `scope` holds the namespace bindings already declared in the
/// output around it; bindings of the source that differ are declared on the element.
fn write_node(
    out: &mut String,
    node: roxmltree::Node<'_, '_>,
    scope: &[(Option<String>, String)],
) {
    match node.node_type() {
        roxmltree::NodeType::Element => write_element(out, node, scope),
        roxmltree::NodeType::Text => out.push_str(&escape_text(node.text().unwrap_or_default())),
        roxmltree::NodeType::Comment => {
            out.push_str("<!--");
            out.push_str(node.text().unwrap_or_default());
            out.push_str("-->");
        }
        roxmltree::NodeType::PI => {
            if let Some(pi) = node.pi() {
                out.push_str("<?");
                out.push_str(pi.target);
                if let Some(value) = pi.value {
                    out.push(' ');
                    out.push_str(value);
                }
                out.push_str("?>");
            }
        }
        roxmltree::NodeType::Root => {}
    }
}

fn write_element(
    out: &mut String,
    node: roxmltree::Node<'_, '_>,
    scope: &[(Option<String>, String)],
) {
    let mut scope = scope.to_vec();
    let mut declarations = String::new();
    for ns in node.namespaces() {
        let prefix = ns.name();
        if prefix == Some("xml") {
            continue;
        }
        let bound = scope
            .iter()
            .rev()
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, uri)| uri.as_str());
        if bound == Some(ns.uri()) {
            continue;
        }
        match prefix {
            Some(prefix) => declarations.push_str(&format!(r#" xmlns:{prefix}=""#)),
            None => declarations.push_str(r#" xmlns=""#),
        }
        declarations.push_str(&escape_attr(ns.uri()));
        declarations.push('"');
        scope.push((prefix.map(str::to_string), ns.uri().to_string()));
    }

    let tag = node.tag_name();
    let name = qualified_name(node, tag.namespace(), tag.name(), false);
    out.push('<');
    out.push_str(&name);
    out.push_str(&declarations);
    for attr in node.attributes() {
        out.push(' ');
        out.push_str(&qualified_name(node, attr.namespace(), attr.name(), true));
        out.push_str("=\"");
        out.push_str(&escape_attr(attr.value()));
        out.push('"');
    }

    if !node.has_children() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in node.children() {
        write_node(out, child, &scope);
    }
    out.push_str("</");
    out.push_str(&name);
    out.push('>');
}

/// Prefix `local` with a prefix bound to `namespace` in the source. Attributes never take the
/// default namespace.
fn qualified_name(
    node: roxmltree::Node<'_, '_>,
    namespace: Option<&str>,
    local: &str,
    attribute: bool,
) -> String {
    let Some(uri) = namespace else {
        return local.to_string();
    };
    if uri == XML_NS {
        return format!("xml:{local}");
    }
    let prefixes = node.namespaces().filter(|ns| ns.uri() == uri).map(|ns| ns.name());
    let prefix = if attribute {
        prefixes.flatten().next()
    } else {
        let prefixes: Vec<_> = prefixes.collect();
        if prefixes.contains(&None) {
            None
        } else {
            prefixes.into_iter().flatten().next()
        }
    };
    match prefix {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
#[path = "../../tests/unit/export/vector.rs"]
mod tests;
