use ghostwriter_page::{
    find_target, ghostwrite, handle_request, AgentRequest, PageDocument, PageEvent, TextSurface,
    HIGHLIGHT_MS, NO_TARGET_MESSAGE,
};

const REPLY: &str = "hey, this sounds like a great fit - happy to chat";

#[test]
fn form_control_is_preferred_over_rich_text() {
    let mut page = PageDocument::parse(
        "<html><body>\
         <div contenteditable=\"true\">draft here</div>\
         <textarea></textarea>\
         </body></html>",
    );

    let receipt = ghostwrite(&mut page, REPLY).expect("textarea target");
    assert!(matches!(receipt.surface, TextSurface::FormControl { .. }));
    assert_eq!(receipt.surface.method(), "textarea");
    assert_eq!(page.control_value(receipt.surface.node()), Some(REPLY));
}

#[test]
fn rich_text_is_used_when_no_form_control_is_visible() {
    let mut page = PageDocument::parse(
        "<html><body>\
         <textarea style=\"display: none\"></textarea>\
         <div role=\"textbox\">old draft</div>\
         </body></html>",
    );

    let receipt = ghostwrite(&mut page, REPLY).expect("rich-text target");
    assert!(matches!(receipt.surface, TextSurface::RichText { .. }));
    assert_eq!(receipt.surface.method(), "rich-text");
}

#[test]
fn rich_text_write_replaces_rendered_content() {
    let mut page = PageDocument::parse(
        "<html><body><div contenteditable=\"true\">old draft text</div></body></html>",
    );

    let receipt = ghostwrite(&mut page, REPLY).expect("rich-text target");
    let node = receipt.surface.node();
    let element = page
        .document()
        .tree
        .get(node)
        .and_then(scraper::ElementRef::wrap)
        .expect("target element");
    assert_eq!(page.rendered_text(element), REPLY);
}

#[test]
fn invisible_targets_never_qualify() {
    let page = PageDocument::parse(
        "<html><body>\
         <textarea style=\"width:0\"></textarea>\
         <textarea style=\"opacity: 0\"></textarea>\
         <div contenteditable=\"true\" hidden>x</div>\
         </body></html>",
    );

    assert_eq!(find_target(&page), None);
}

#[test]
fn zero_size_control_falls_through_to_rich_text() {
    let page = PageDocument::parse(
        "<html><body>\
         <textarea height=\"0\"></textarea>\
         <div role=\"textbox\"></div>\
         </body></html>",
    );

    let surface = find_target(&page).expect("rich-text fallback");
    assert!(matches!(surface, TextSurface::RichText { .. }));
}

#[test]
fn missing_target_is_reported_not_thrown() {
    let mut page = PageDocument::parse("<html><body><p>just text</p></body></html>");

    let err = ghostwrite(&mut page, REPLY).expect_err("no editable element");
    assert_eq!(err, NO_TARGET_MESSAGE);
}

#[test]
fn receipt_records_events_and_highlight() {
    let mut page = PageDocument::parse("<html><body><textarea></textarea></body></html>");

    let receipt = ghostwrite(&mut page, REPLY).expect("textarea target");
    assert_eq!(
        receipt.events,
        vec![PageEvent::Input, PageEvent::Change, PageEvent::Focus]
    );
    assert_eq!(receipt.highlight_ms, HIGHLIGHT_MS);
}

#[test]
fn ghostwrite_request_answers_with_method() {
    let mut page = PageDocument::parse("<html><body><textarea></textarea></body></html>");

    let response = handle_request(
        &mut page,
        AgentRequest::Ghostwrite {
            text: REPLY.to_string(),
        },
    );
    assert!(response.success);
    assert_eq!(response.method.as_deref(), Some("textarea"));
}

#[test]
fn ghostwrite_request_failure_is_structured() {
    let mut page = PageDocument::parse("<html><body></body></html>");

    let response = handle_request(
        &mut page,
        AgentRequest::Ghostwrite {
            text: REPLY.to_string(),
        },
    );
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some(NO_TARGET_MESSAGE));
}

#[test]
fn ping_is_always_alive() {
    let mut page = PageDocument::parse("<html><body></body></html>");
    for _ in 0..3 {
        assert!(handle_request(&mut page, AgentRequest::Ping).success);
    }
}

#[test]
fn repeated_writes_keep_the_last_value() {
    let mut page = PageDocument::parse("<html><body><textarea></textarea></body></html>");

    let first = ghostwrite(&mut page, "first draft").expect("target");
    let second = ghostwrite(&mut page, "second draft").expect("target");
    assert_eq!(first.surface, second.surface);
    assert_eq!(page.control_value(second.surface.node()), Some("second draft"));
}
