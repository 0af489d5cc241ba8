use scraper::Selector;

use crate::page::PageDocument;
use crate::visibility::is_visible;

/// A selection must be longer than this to be used verbatim.
pub const MIN_SELECTION_LEN: usize = 20;

/// Rendered-length window for a plausible post body.
pub const MIN_POST_LEN: usize = 100;
pub const MAX_POST_LEN: usize = 2_000;

/// Fixed failure message when neither tier finds anything.
pub const NO_POST_MESSAGE: &str =
    "No post detected. Highlight the post text manually and try again.";

/// Block-level elements considered as post-body candidates.
const BLOCK_CONTENT_SELECTOR: &str = "p, div, article, section, li, blockquote, pre, td";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMethod {
    Highlight,
    AutoDetect,
}

impl ScanMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ScanMethod::Highlight => "highlight",
            ScanMethod::AutoDetect => "auto-detect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub method: ScanMethod,
}

/// Two-tier candidate search.
///
/// A sufficiently long user selection always wins. Failing that, every
/// visible block-level element whose rendered length falls inside the
/// post-body window competes, and the longest text is returned. This is a
/// heuristic: zero matches is an expected outcome, reported as an error
/// string rather than a panic.
pub fn scan_page(page: &PageDocument) -> Result<Extraction, String> {
    if let Some(selection) = page.selection() {
        let trimmed = selection.trim();
        if trimmed.chars().count() > MIN_SELECTION_LEN {
            return Ok(Extraction {
                text: trimmed.to_string(),
                method: ScanMethod::Highlight,
            });
        }
    }

    let mut best: Option<(usize, String)> = None;
    if let Ok(selector) = Selector::parse(BLOCK_CONTENT_SELECTOR) {
        for element in page.document().select(&selector) {
            if !is_visible(element) {
                continue;
            }
            let text = page.rendered_text(element);
            let len = text.chars().count();
            if len < MIN_POST_LEN || len > MAX_POST_LEN {
                continue;
            }
            // Strictly-greater keeps the first candidate in document order
            // on ties.
            if best.as_ref().map_or(true, |(best_len, _)| len > *best_len) {
                best = Some((len, text));
            }
        }
    }

    match best {
        Some((_, text)) => Ok(Extraction {
            text,
            method: ScanMethod::AutoDetect,
        }),
        None => Err(NO_POST_MESSAGE.to_string()),
    }
}
