use scraper::ElementRef;

/// Visibility from inline evidence alone: a parsed page has no layout, so
/// the check covers what the markup can prove. An element is invisible when
/// it or any ancestor carries `display: none`, `visibility: hidden`, a zero
/// `opacity`, or the `hidden` attribute, or when the element itself declares
/// a zero width or height. Absent dimensions count as nonzero.
pub fn is_visible(element: ElementRef<'_>) -> bool {
    if has_zero_dimension(element) {
        return false;
    }
    let mut current = Some(element);
    while let Some(el) = current {
        if hidden_by_inline_evidence(el) {
            return false;
        }
        current = el.parent().and_then(ElementRef::wrap);
    }
    true
}

fn hidden_by_inline_evidence(element: ElementRef<'_>) -> bool {
    if element.value().attr("hidden").is_some() {
        return true;
    }
    for (property, value) in style_declarations(element) {
        if property.eq_ignore_ascii_case("display") && value.eq_ignore_ascii_case("none") {
            return true;
        }
        if property.eq_ignore_ascii_case("visibility") && value.eq_ignore_ascii_case("hidden") {
            return true;
        }
        if property.eq_ignore_ascii_case("opacity") && parses_to_zero(value) {
            return true;
        }
    }
    false
}

fn has_zero_dimension(element: ElementRef<'_>) -> bool {
    for attr in ["width", "height"] {
        if let Some(value) = element.value().attr(attr) {
            if is_zero_length(value) {
                return true;
            }
        }
    }
    for (property, value) in style_declarations(element) {
        if (property.eq_ignore_ascii_case("width") || property.eq_ignore_ascii_case("height"))
            && is_zero_length(value)
        {
            return true;
        }
    }
    false
}

fn style_declarations<'a>(element: ElementRef<'a>) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    element
        .value()
        .attr("style")
        .into_iter()
        .flat_map(|style| style.split(';'))
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            Some((property.trim(), value.trim()))
        })
}

fn parses_to_zero(value: &str) -> bool {
    matches!(value.trim().parse::<f32>(), Ok(parsed) if parsed == 0.0)
}

fn is_zero_length(value: &str) -> bool {
    let trimmed = value.trim();
    let numeric = trimmed
        .strip_suffix("px")
        .or_else(|| trimmed.strip_suffix('%'))
        .unwrap_or(trimmed)
        .trim();
    matches!(numeric.parse::<f32>(), Ok(parsed) if parsed == 0.0)
}
