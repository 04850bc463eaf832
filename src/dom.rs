use folio_core::{Bounds, Viewport};
use std::str::FromStr;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Every element matching `selector`; an invalid selector matches nothing.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    collect(document.query_selector_all(selector).ok())
}

pub fn query_all_in(root: &web::Element, selector: &str) -> Vec<web::Element> {
    collect(root.query_selector_all(selector).ok())
}

#[inline]
pub fn query_in(root: &web::Element, selector: &str) -> Option<web::Element> {
    root.query_selector(selector).ok().flatten()
}

fn collect(list: Option<web::NodeList>) -> Vec<web::Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn add_listener<E>(target: &web::EventTarget, event: &str, mut handler: impl FnMut(E) + 'static)
where
    E: JsCast + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("listener {event} not attached: {e:?}");
    }
    closure.forget();
}

/// Document-space box of an element (client rect shifted by the scroll offset).
pub fn document_bounds(window: &web::Window, el: &web::Element) -> Option<Bounds> {
    let rect = el.get_bounding_client_rect();
    let scroll_y = window.scroll_y().ok()?;
    Some(Bounds {
        top: (rect.top() + scroll_y) as f32,
        height: rect.height() as f32,
    })
}

#[inline]
pub fn viewport_height(window: &web::Window) -> f32 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32
}

#[inline]
pub fn viewport_width(window: &web::Window) -> f32 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32
}

#[inline]
pub fn element_viewport(el: &web::Element) -> Viewport {
    Viewport {
        width: el.client_width() as f32,
        height: el.client_height() as f32,
    }
}

/// `data-<name>` parsed as `T`; absent or malformed values are `None`.
pub fn data_attr<T: FromStr>(el: &web::Element, name: &str) -> Option<T> {
    let raw = el.get_attribute(&format!("data-{name}"))?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring data-{name}={raw:?}");
            None
        }
    }
}

/// Keep the canvas backing store at CSS size × devicePixelRatio. Returns the pixel size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

/// Create a `<div>` with inline CSS and append it to `<body>`.
pub fn append_overlay_div(
    document: &web::Document,
    class: Option<&str>,
    css: &str,
) -> anyhow::Result<web::HtmlElement> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
    let div = document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!("create_element: {e:?}"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    if let Some(class) = class {
        div.set_class_name(class);
    }
    div.style().set_css_text(css);
    body.append_child(&div)
        .map_err(|e| anyhow::anyhow!("append_child: {e:?}"))?;
    Ok(div)
}
