use crate::dom;
use crate::input;
use folio_core::{FrameInput, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct SceneWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub container: web::Element,
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
    pub input: Rc<RefCell<FrameInput>>,
}

/// Pointer, scroll and resize listeners feeding the background scene.
/// Only the pointer listener writes the shared [`FrameInput`].
pub fn wire_scene_inputs(w: SceneWiring) {
    let SceneWiring {
        window,
        document,
        container,
        canvas,
        scene,
        input,
    } = w;

    // pointer → NDC
    {
        let window = window.clone();
        dom::add_listener(
            document.as_ref(),
            "mousemove",
            move |ev: web::MouseEvent| {
                let ndc = input::pointer_ndc(
                    ev.client_x() as f32,
                    ev.client_y() as f32,
                    dom::viewport_width(&window),
                    dom::viewport_height(&window),
                );
                input.borrow_mut().pointer = Some(ndc);
            },
        );
    }

    // scroll → ratio, applied to the scene immediately
    {
        let window_inner = window.clone();
        let scene = scene.clone();
        dom::add_listener(window.as_ref(), "scroll", move |_: web::Event| {
            let doc_height = document
                .body()
                .map_or(0.0, |b| b.scroll_height() as f32);
            let ratio = input::scroll_ratio(
                window_inner.scroll_y().unwrap_or(0.0) as f32,
                doc_height,
                dom::viewport_height(&window_inner),
            );
            scene.borrow_mut().apply_scroll(ratio);
        });
    }

    // resize → camera aspect and canvas backing size
    dom::add_listener(window.as_ref(), "resize", move |_: web::Event| {
        let viewport = dom::element_viewport(&container);
        scene.borrow_mut().resize(viewport);
        dom::sync_canvas_backing_size(&canvas);
    });
}
