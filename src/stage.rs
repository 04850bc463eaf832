//! Binds the platform-free [`Director`] to live DOM elements.
//!
//! The director is generic over its target handle; here the handle is a
//! `web_sys::Element`. [`Stage`] resolves selectors to target ids, seeds
//! starting colors from computed style and registers tweens, and
//! [`apply_style`] writes a flushed [`Style`] back as inline CSS.

use crate::dom;
use folio_core::color::parse_css_color;
use folio_core::{
    AnimationId, Bounds, Director, Measure, Prop, ScrollTrigger, ScrollView, Style, TargetId,
    TweenVars, Value,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedDirector = Rc<RefCell<Director<web::Element>>>;

/// Layout reads for scroll triggers, straight from the live document.
pub struct DomMeasure {
    window: web::Window,
}

impl DomMeasure {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl Measure<web::Element> for DomMeasure {
    fn bounds(&self, target: &web::Element) -> Option<Bounds> {
        if !target.is_connected() {
            return None;
        }
        dom::document_bounds(&self.window, target)
    }

    fn view(&self) -> ScrollView {
        ScrollView {
            scroll_y: self.window.scroll_y().unwrap_or(0.0) as f32,
            viewport_height: dom::viewport_height(&self.window),
        }
    }
}

#[derive(Clone)]
pub struct Stage {
    pub window: web::Window,
    pub document: web::Document,
    pub director: SharedDirector,
}

impl Stage {
    pub fn new(window: web::Window, document: web::Document) -> Self {
        Self {
            window,
            document,
            director: Rc::new(RefCell::new(Director::new())),
        }
    }

    pub fn ids(&self, els: impl IntoIterator<Item = web::Element>) -> Vec<TargetId> {
        self.director.borrow_mut().targets(els)
    }

    pub fn id(&self, el: web::Element) -> TargetId {
        self.director.borrow_mut().target(el)
    }

    pub fn select(&self, selector: &str) -> Vec<TargetId> {
        self.ids(dom::query_all(&self.document, selector))
    }

    /// Free-running tween on everything `selector` matches.
    pub fn tween(&self, selector: &str, vars: TweenVars) -> Option<AnimationId> {
        let ids = self.select(selector);
        if ids.is_empty() {
            log::debug!("[director] skip {selector}: no match");
            return None;
        }
        self.director.borrow_mut().tween(&ids, vars)
    }

    pub fn tween_ids(&self, ids: &[TargetId], vars: TweenVars) -> Option<AnimationId> {
        self.director.borrow_mut().tween(ids, vars)
    }

    /// Tween `ids` driven by a trigger on `trigger_el`. `build` configures anchors and actions.
    pub fn on_scroll(
        &self,
        ids: &[TargetId],
        vars: TweenVars,
        trigger_el: web::Element,
        build: impl FnOnce(ScrollTrigger) -> Result<ScrollTrigger, folio_core::ParseError>,
    ) -> anyhow::Result<Option<AnimationId>> {
        if ids.is_empty() {
            return Ok(None);
        }
        let trigger = build(ScrollTrigger::new(self.id(trigger_el)))?;
        Ok(self
            .director
            .borrow_mut()
            .tween_on_scroll(ids, vars, Some(trigger)))
    }

    /// Seed a color property from the element's computed style so the first
    /// tween starts from what is on screen.
    pub fn seed_color(&self, id: TargetId, el: &web::Element, prop: Prop) {
        let css_name = match prop {
            Prop::BackgroundColor => "background-color",
            Prop::Color => "color",
            _ => return,
        };
        let computed = self
            .window
            .get_computed_style(el)
            .ok()
            .flatten()
            .and_then(|s| s.get_property_value(css_name).ok());
        if let Some(Ok(rgba)) = computed.as_deref().map(parse_css_color) {
            self.director.borrow_mut().seed(id, prop, Value::Rgba(rgba));
        }
    }

    pub fn seed(&self, id: TargetId, prop: Prop, value: impl Into<Value>) {
        self.director.borrow_mut().seed(id, prop, value.into());
    }
}

/// Write composed CSS (and counter text) onto an element.
pub fn apply_style(el: &web::Element, style: &Style) {
    if let Some(text) = style.text() {
        el.set_text_content(Some(&text));
    }
    let Some(html) = el.dyn_ref::<web::HtmlElement>() else {
        return;
    };
    let decl = html.style();
    for (name, value) in style.css() {
        _ = decl.set_property(name, &value);
    }
}
