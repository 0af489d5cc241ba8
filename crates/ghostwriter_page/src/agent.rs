use crate::extract::scan_page;
use crate::insert::ghostwrite;
use crate::page::PageDocument;
use crate::protocol::{AgentRequest, AgentResponse};

/// Dispatches one protocol request against the page.
///
/// Safe to call any number of times; a page with no selection, no post and
/// no text box still answers every request with a structured response.
pub fn handle_request(page: &mut PageDocument, request: AgentRequest) -> AgentResponse {
    match request {
        AgentRequest::Ping => AgentResponse::succeeded(),
        AgentRequest::ScanPage => match scan_page(page) {
            Ok(extraction) => {
                AgentResponse::with_text(extraction.text, extraction.method.as_str())
            }
            Err(error) => AgentResponse::failure(error),
        },
        AgentRequest::Ghostwrite { text } => match ghostwrite(page, &text) {
            Ok(receipt) => AgentResponse::written(receipt.surface.method()),
            Err(error) => AgentResponse::failure(error),
        },
    }
}
