use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback(
            "click",
            wasm_bindgen::JsCast::unchecked_ref(closure.as_ref()),
        );
        closure.forget();
    }
}

/// (scroll offset, document height, viewport height) in CSS pixels.
pub fn scroll_metrics(window: &web::Window, document: &web::Document) -> Option<(f64, f64, f64)> {
    let offset = window.page_y_offset().ok()?;
    let doc_height = document.document_element()?.scroll_height() as f64;
    let viewport = window.inner_height().ok()?.as_f64()?;
    Some((offset, doc_height, viewport))
}

/// Current scroll position as a normalized [0, 1] ratio. Browsers restore
/// mid-page positions on reload, so startup must not assume the top.
pub fn scroll_ratio(window: &web::Window, document: &web::Document) -> f64 {
    let Some((offset, doc_height, viewport)) = scroll_metrics(window, document) else {
        return 0.0;
    };
    let span = doc_height - viewport;
    if span > 0.0 {
        (offset / span).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Suspend or restore scroll input while the scare sequence runs.
pub fn set_scroll_locked(document: &web::Document, locked: bool) {
    if let Some(body) = document.body() {
        let style = body.style();
        if locked {
            let _ = style.set_property("overflow", "hidden");
        } else {
            let _ = style.remove_property("overflow");
        }
    }
}

/// Instant scroll jump to a normalized document ratio. Runs while the scare
/// cover is opaque, so the user never sees the move.
pub fn jump_to_ratio(window: &web::Window, document: &web::Document, ratio: f64) {
    let Some((_, doc_height, viewport)) = scroll_metrics(window, document) else {
        return;
    };
    let top = ratio * (doc_height - viewport).max(0.0);
    let opts = web::ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(web::ScrollBehavior::Instant);
    window.scroll_to_with_scroll_to_options(&opts);
}

/// Publish the current theme for CSS consumers.
pub fn set_theme(document: &web::Document, zone_id: &str) {
    if let Some(body) = document.body() {
        let _ = body.set_attribute("data-theme", zone_id);
    }
}
