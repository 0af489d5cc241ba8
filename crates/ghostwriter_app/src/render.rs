use ghostwriter_core::{Phase, PopupViewModel};

/// Draws the popup as a few terminal lines: status, output box, actions.
pub(crate) fn draw(view: &PopupViewModel) {
    println!();
    println!("[{}]", view.status_line);
    if let Some(output) = &view.output {
        println!("  {}", output);
    }
    if busy(view.phase) {
        return;
    }
    if view.show_reply_actions {
        println!("  actions: copy | insert | reset | quit");
    } else {
        let key_hint = if view.has_api_key { "" } else { " (set one with: key <value>)" };
        println!(
            "  actions: generate | tone <name> (now: {}) | key <value>{} | quit",
            view.tone, key_hint
        );
    }
}

/// Copy surface of a headless popup: the reply goes to stdout where the
/// terminal's own selection takes over.
pub(crate) fn print_copied(text: &str) {
    println!("{text}");
}

fn busy(phase: Phase) -> bool {
    matches!(
        phase,
        Phase::Connecting { .. } | Phase::Extracting | Phase::Generating | Phase::Inserting { .. }
    )
}
