use ego_tree::NodeId;
use scraper::{ElementRef, Selector};

use crate::page::PageDocument;
use crate::visibility::is_visible;

/// Fixed failure message when no editable target qualifies.
pub const NO_TARGET_MESSAGE: &str = "No text box found";

/// Duration of the confirmation outline around the written target.
pub const HIGHLIGHT_MS: u64 = 1_000;

const RICH_TEXT_SELECTOR: &str = "[contenteditable=\"true\"], [role=\"textbox\"]";

/// An editable element the agent can write into, classified once so the
/// write path dispatches on the tag instead of re-probing the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSurface {
    /// A native form control; its value lives outside the markup and the
    /// write must go through the property path so framework change
    /// detection sees it.
    FormControl { node: NodeId },
    /// A content-editable container or an element with a textbox role;
    /// receives plain text directly.
    RichText { node: NodeId },
}

impl TextSurface {
    pub fn node(self) -> NodeId {
        match self {
            TextSurface::FormControl { node } | TextSurface::RichText { node } => node,
        }
    }

    pub fn method(self) -> &'static str {
        match self {
            TextSurface::FormControl { .. } => "textarea",
            TextSurface::RichText { .. } => "rich-text",
        }
    }

    fn write(self, page: &mut PageDocument, text: &str) {
        match self {
            TextSurface::FormControl { node } => page.set_control_value(node, text.to_string()),
            TextSurface::RichText { node } => page.set_inner_text(node, text.to_string()),
        }
    }
}

/// Synthetic events dispatched (bubbling) after a successful write so page
/// listeners recompute their state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Input,
    Change,
    Focus,
}

/// What a successful insertion did to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertReceipt {
    pub surface: TextSurface,
    pub events: Vec<PageEvent>,
    pub highlight_ms: u64,
}

/// Best editable target on the page: the first visible multi-line form
/// control, then the first visible rich-text editor.
pub fn find_target(page: &PageDocument) -> Option<TextSurface> {
    if let Some(node) = first_visible(page, "textarea") {
        return Some(TextSurface::FormControl { node });
    }
    first_visible(page, RICH_TEXT_SELECTOR).map(|node| TextSurface::RichText { node })
}

/// Writes `text` into the best editable target and reports what happened.
pub fn ghostwrite(page: &mut PageDocument, text: &str) -> Result<InsertReceipt, String> {
    let Some(surface) = find_target(page) else {
        return Err(NO_TARGET_MESSAGE.to_string());
    };
    surface.write(page, text);
    Ok(InsertReceipt {
        surface,
        events: vec![PageEvent::Input, PageEvent::Change, PageEvent::Focus],
        highlight_ms: HIGHLIGHT_MS,
    })
}

fn first_visible(page: &PageDocument, selector: &str) -> Option<NodeId> {
    let selector = Selector::parse(selector).ok()?;
    page.document()
        .select(&selector)
        .find(|element| is_visible(*element))
        .map(|element: ElementRef<'_>| element.id())
}
