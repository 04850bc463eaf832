#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::frame::Alive;
use crate::stage::Stage;
use folio_core::{FrameInput, SceneConfig};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod animations;
mod constants;
mod dom;
mod events;
mod frame;
mod hover;
mod input;
mod render;
mod stage;

/// Handles kept so `teardown()` can stop everything that `start()` set running.
struct Runtime {
    alive: Alive,
    stage: Stage,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() == "loading" {
        dom::add_listener(document.as_ref(), "DOMContentLoaded", |_: web::Event| {
            run_init()
        });
    } else {
        run_init();
    }
    Ok(())
}

/// Stop both frame loops, drop every animation and remove the elements this
/// crate added to the page. Listeners left on the page register nothing.
#[wasm_bindgen]
pub fn teardown() {
    let Some(rt) = RUNTIME.with(|rt| rt.borrow_mut().take()) else {
        return;
    };
    rt.alive.set(false);
    rt.stage.director.borrow_mut().close();
    let added = format!("canvas.{CANVAS_CLASS}, .{CURSOR_CLASS}, .{PROGRESS_BAR_CLASS}");
    for el in dom::query_all(&rt.stage.document, &added) {
        el.remove();
    }
    log::info!("[director] torn down");
}

fn run_init() {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return;
    }
    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let alive: Alive = Rc::new(Cell::new(true));

    let stage = Stage::new(window.clone(), document);
    let registered = animations::register_all(&stage)?;
    let hover_targets = hover::wire_hover_rules(&stage)?;
    hover::wire_magnetic_buttons(&stage)?;
    hover::wire_custom_cursor(&stage)?;
    hover::wire_form_fields(&stage)?;
    log::info!(
        "[director] registered={} skipped={} hover_targets={}",
        registered.ids.len(),
        registered.skipped,
        hover_targets
    );

    let mut director_frame = frame::DirectorFrame {
        director: stage.director.clone(),
        measure: stage::DomMeasure::new(window.clone()),
        last_instant: Instant::now(),
    };
    frame::start_loop(alive.clone(), move || director_frame.frame());

    schedule_scene(&window, alive.clone());
    RUNTIME.with(|rt| *rt.borrow_mut() = Some(Runtime { alive, stage }));
    Ok(())
}

fn schedule_scene(window: &web::Window, alive: Alive) {
    let boot = Closure::once_into_js(move || {
        if !alive.get() {
            return;
        }
        spawn_local(async move {
            if let Err(e) = boot_scene(alive).await {
                log::error!("[scene] init error: {:?}", e);
            }
        });
    });
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        boot.unchecked_ref(),
        SCENE_START_DELAY_MS,
    ) {
        log::error!("[scene] setTimeout failed: {:?}", e);
    }
}

fn scene_config(window: &web::Window, container: Option<&web::Element>) -> SceneConfig {
    let mut config = SceneConfig::default().for_window_width(dom::viewport_width(window));
    if let Some(el) = container {
        if let Some(n) = dom::data_attr::<usize>(el, "circles") {
            config.circle_count = n;
        }
        if let Some(n) = dom::data_attr::<usize>(el, "particles") {
            config.particle_count = n;
        }
        config.seed = dom::data_attr::<u64>(el, "seed");
    }
    config.capped()
}

fn create_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {e:?}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    canvas.set_class_name(CANVAS_CLASS);
    canvas.style().set_css_text(
        "position: absolute; inset: 0; width: 100%; height: 100%; \
         display: block; pointer-events: none;",
    );
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {e:?}"))?;
    dom::sync_canvas_backing_size(&canvas);
    Ok(canvas)
}

async fn boot_scene(alive: Alive) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = document.get_element_by_id(SCENE_CONTAINER_ID);
    let config = scene_config(&window, container.as_ref());

    let mounted = folio_core::mount(
        container.as_ref().map(dom::element_viewport),
        &config,
        |_viewport| match &container {
            Some(el) => create_canvas(&document, el),
            None => Err(anyhow::anyhow!("container vanished")),
        },
    )?;
    let (Some((scene, canvas)), Some(container)) = (mounted, container) else {
        log::info!("[scene] no #{SCENE_CONTAINER_ID}; background disabled");
        return Ok(());
    };

    let gpu = match render::GpuState::new(&canvas, config.circle_count, config.particle_count).await
    {
        Ok(g) => g,
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            canvas.remove();
            return Ok(());
        }
    };
    if !alive.get() {
        canvas.remove();
        return Ok(());
    }
    log::info!(
        "[scene] circles={} particles={} calm={}",
        scene.circles.len(),
        scene.particles.len(),
        config.calm
    );

    let scene = Rc::new(RefCell::new(scene));
    let input = Rc::new(RefCell::new(FrameInput::default()));
    events::wire_scene_inputs(events::SceneWiring {
        window: window.clone(),
        document,
        container,
        canvas: canvas.clone(),
        scene: scene.clone(),
        input: input.clone(),
    });

    let mut scene_frame = frame::SceneFrame {
        scene,
        input,
        gpu,
        canvas,
        started: Instant::now(),
    };
    frame::start_loop(alive, move || scene_frame.frame());
    Ok(())
}
