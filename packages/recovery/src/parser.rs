//! Top-level reverse-parse entry point.

use crate::{heuristics, markers};
use sitewright_model::ComponentInstance;
use tracing::{debug, info, instrument, warn};

/// Reconstruct component instances from page markup.
///
/// Never fails: malformed or empty input yields an empty list, and a page
/// that still contains unresolved page-template placeholders (e.g.
/// `{{components}}`) short-circuits to empty — it is a template, not
/// rendered content, and its placeholder syntax must not be misparsed as
/// content.
#[instrument(skip(markup), fields(len = markup.len()))]
pub fn parse_page(markup: &str) -> Vec<ComponentInstance> {
    if has_template_placeholder(markup) {
        debug!("page still contains template placeholders - skipping reverse parse");
        return Vec::new();
    }

    let Ok(dom) = tl::parse(markup, tl::ParserOptions::default()) else {
        warn!("unparseable markup - returning no instances");
        return Vec::new();
    };

    let explicit = markers::extract(&dom);
    if !explicit.is_empty() {
        info!(count = explicit.len(), "recovered instances from explicit markers");
        return explicit;
    }

    let recovered = heuristics::detect(&dom);
    info!(count = recovered.len(), "recovered instances heuristically");
    recovered
}

fn has_template_placeholder(markup: &str) -> bool {
    match markup.find("{{") {
        Some(open) => markup[open..].contains("}}"),
        None => false,
    }
}
