//! Pointer- and focus-driven tweens: hover enter/leave pairs, magnetic
//! buttons, the custom cursor and floating form labels.
//!
//! Every tween registered here overwrites the same properties on its
//! targets, so a quick leave cancels a half-finished enter.

use crate::constants::*;
use crate::dom;
use crate::input;
use crate::stage::Stage;
use folio_core::{Ease, Prop, TargetId, TweenVars, Value};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

const CYAN_TINT: Value = Value::Rgba([0.0, 212.0 / 255.0, 1.0, 0.1]);
const GLASS: Value = Value::Rgba([1.0, 1.0, 1.0, 0.05]);
const CURSOR_IDLE: Value = Value::Rgba([0.0, 212.0 / 255.0, 1.0, 0.8]);
const CURSOR_HOT: Value = Value::Rgba([78.0 / 255.0, 205.0 / 255.0, 196.0 / 255.0, 0.8]);
const LABEL_FOCUS: Value = Value::Rgba([0.0, 212.0 / 255.0, 1.0, 1.0]);
const LABEL_IDLE: Value = Value::Rgba([160.0 / 255.0, 160.0 / 255.0, 160.0 / 255.0, 1.0]);

type Props = &'static [(Prop, Value)];

/// One side of a hover pair.
struct Pose {
    props: Props,
    duration: f32,
    ease: &'static str,
}

impl Pose {
    const fn new(props: Props, duration: f32, ease: &'static str) -> Self {
        Self {
            props,
            duration,
            ease,
        }
    }

    fn vars(&self) -> anyhow::Result<TweenVars> {
        let mut vars = TweenVars::to(self.duration)
            .ease(self.ease.parse()?)
            .overwrite(true);
        for &(prop, value) in self.props {
            vars = vars.prop(prop, value);
        }
        Ok(vars)
    }
}

struct HoverRule {
    selector: &'static str,
    enter: Pose,
    leave: Pose,
    /// Child element animated alongside the host.
    child: Option<(&'static str, Pose, Pose)>,
}

fn hover_rules() -> [HoverRule; 6] {
    const OUT: &str = "power2.out";
    [
        HoverRule {
            selector: ".btn",
            enter: Pose::new(&[(Prop::Scale, Value::Num(1.05))], HOVER_FAST_SEC, OUT),
            leave: Pose::new(&[(Prop::Scale, Value::Num(1.0))], HOVER_FAST_SEC, OUT),
            child: Some((
                "i",
                Pose::new(&[(Prop::X, Value::Num(5.0))], HOVER_FAST_SEC, OUT),
                Pose::new(&[(Prop::X, Value::Num(0.0))], HOVER_FAST_SEC, OUT),
            )),
        },
        HoverRule {
            selector: ".skill-category",
            enter: Pose::new(
                &[
                    (Prop::Y, Value::Num(-15.0)),
                    (Prop::ShadowY, Value::Num(30.0)),
                    (Prop::ShadowBlur, Value::Num(60.0)),
                    (Prop::ShadowAlpha, Value::Num(0.4)),
                ],
                HOVER_SLOW_SEC,
                OUT,
            ),
            leave: Pose::new(
                &[
                    (Prop::Y, Value::Num(0.0)),
                    (Prop::ShadowY, Value::Num(0.0)),
                    (Prop::ShadowBlur, Value::Num(30.0)),
                    (Prop::ShadowAlpha, Value::Num(0.3)),
                ],
                HOVER_SLOW_SEC,
                OUT,
            ),
            child: Some((
                ".category-header i",
                Pose::new(
                    &[(Prop::Rotation, Value::Num(360.0)), (Prop::Scale, Value::Num(1.2))],
                    HOVER_FAST_SEC,
                    OUT,
                ),
                Pose::new(
                    &[(Prop::Rotation, Value::Num(0.0)), (Prop::Scale, Value::Num(1.0))],
                    HOVER_FAST_SEC,
                    OUT,
                ),
            )),
        },
        HoverRule {
            selector: ".achievement-card",
            enter: Pose::new(
                &[(Prop::Y, Value::Num(-10.0)), (Prop::Scale, Value::Num(1.02))],
                HOVER_FAST_SEC,
                OUT,
            ),
            leave: Pose::new(
                &[(Prop::Y, Value::Num(0.0)), (Prop::Scale, Value::Num(1.0))],
                HOVER_FAST_SEC,
                OUT,
            ),
            child: Some((
                ".achievement-icon",
                Pose::new(
                    &[(Prop::Rotation, Value::Num(10.0)), (Prop::Scale, Value::Num(1.1))],
                    HOVER_FAST_SEC,
                    OUT,
                ),
                Pose::new(
                    &[(Prop::Rotation, Value::Num(0.0)), (Prop::Scale, Value::Num(1.0))],
                    HOVER_FAST_SEC,
                    OUT,
                ),
            )),
        },
        HoverRule {
            selector: ".social-link",
            enter: Pose::new(
                &[
                    (Prop::Y, Value::Num(-5.0)),
                    (Prop::Rotation, Value::Num(15.0)),
                    (Prop::Scale, Value::Num(1.1)),
                ],
                HOVER_FAST_SEC,
                "back.out(1.7)",
            ),
            leave: Pose::new(
                &[
                    (Prop::Y, Value::Num(0.0)),
                    (Prop::Rotation, Value::Num(0.0)),
                    (Prop::Scale, Value::Num(1.0)),
                ],
                HOVER_FAST_SEC,
                OUT,
            ),
            child: None,
        },
        HoverRule {
            selector: ".project-card",
            enter: Pose::new(
                &[
                    (Prop::Y, Value::Num(-15.0)),
                    (Prop::Scale, Value::Num(1.02)),
                    (Prop::RotationY, Value::Num(5.0)),
                ],
                HOVER_SLOW_SEC,
                OUT,
            ),
            leave: Pose::new(
                &[
                    (Prop::Y, Value::Num(0.0)),
                    (Prop::Scale, Value::Num(1.0)),
                    (Prop::RotationY, Value::Num(0.0)),
                ],
                HOVER_SLOW_SEC,
                OUT,
            ),
            child: Some((
                ".project-image",
                Pose::new(&[(Prop::Scale, Value::Num(1.1))], HOVER_SLOW_SEC, OUT),
                Pose::new(&[(Prop::Scale, Value::Num(1.0))], HOVER_SLOW_SEC, OUT),
            )),
        },
        HoverRule {
            selector: ".contact-item",
            enter: Pose::new(
                &[(Prop::X, Value::Num(15.0)), (Prop::BackgroundColor, CYAN_TINT)],
                HOVER_FAST_SEC,
                OUT,
            ),
            leave: Pose::new(
                &[(Prop::X, Value::Num(0.0)), (Prop::BackgroundColor, GLASS)],
                HOVER_FAST_SEC,
                OUT,
            ),
            child: Some((
                ".contact-icon",
                Pose::new(
                    &[(Prop::Rotation, Value::Num(360.0)), (Prop::Scale, Value::Num(1.1))],
                    HOVER_FAST_SEC,
                    OUT,
                ),
                Pose::new(
                    &[(Prop::Rotation, Value::Num(0.0)), (Prop::Scale, Value::Num(1.0))],
                    HOVER_FAST_SEC,
                    OUT,
                ),
            )),
        },
    ]
}

/// Register a tween pair on `mouseenter`/`mouseleave` for one element.
fn wire_pair(
    stage: &Stage,
    el: &web::Element,
    ids: Vec<TargetId>,
    enter: TweenVars,
    leave: TweenVars,
) {
    let target: &web::EventTarget = el.as_ref();
    let on_enter = stage.clone();
    let enter_ids = ids.clone();
    dom::add_listener(target, "mouseenter", move |_: web::MouseEvent| {
        on_enter.tween_ids(&enter_ids, enter.clone());
    });
    let on_leave = stage.clone();
    dom::add_listener(target, "mouseleave", move |_: web::MouseEvent| {
        on_leave.tween_ids(&ids, leave.clone());
    });
}

pub fn wire_hover_rules(stage: &Stage) -> anyhow::Result<usize> {
    let mut wired = 0;
    for rule in hover_rules() {
        let (enter, leave) = (rule.enter.vars()?, rule.leave.vars()?);
        let child = match &rule.child {
            Some((sel, c_enter, c_leave)) => Some((*sel, c_enter.vars()?, c_leave.vars()?)),
            None => None,
        };
        for el in dom::query_all(&stage.document, rule.selector) {
            let id = stage.id(el.clone());
            if enter.props.iter().any(|p| p.prop == Prop::BackgroundColor) {
                stage.seed_color(id, &el, Prop::BackgroundColor);
            }
            wire_pair(stage, &el, vec![id], enter.clone(), leave.clone());
            if let Some((sel, c_enter, c_leave)) = &child {
                if let Some(inner) = dom::query_in(&el, sel) {
                    let inner_id = stage.id(inner);
                    wire_pair(stage, &el, vec![inner_id], c_enter.clone(), c_leave.clone());
                }
            }
            wired += 1;
        }
    }
    Ok(wired)
}

/// Buttons lean toward the pointer and spring back on leave.
pub fn wire_magnetic_buttons(stage: &Stage) -> anyhow::Result<()> {
    let spring: Ease = "elastic.out(1, 0.3)".parse()?;
    let follow: Ease = "power2.out".parse()?;
    for button in dom::query_all(&stage.document, ".btn") {
        let id = stage.id(button.clone());
        let target: &web::EventTarget = button.as_ref();

        let on_move = stage.clone();
        let rect_of = button.clone();
        dom::add_listener(target, "mousemove", move |ev: web::MouseEvent| {
            let rect = rect_of.get_bounding_client_rect();
            let pull = input::magnetic_offset(
                Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
                rect.left() as f32,
                rect.top() as f32,
                Vec2::new(rect.width() as f32, rect.height() as f32),
                MAGNETIC_PULL,
            );
            on_move.tween_ids(
                &[id],
                TweenVars::to(HOVER_FAST_SEC)
                    .prop(Prop::X, pull.x)
                    .prop(Prop::Y, pull.y)
                    .ease(follow)
                    .overwrite(true),
            );
        });

        let on_leave = stage.clone();
        dom::add_listener(target, "mouseleave", move |_: web::MouseEvent| {
            on_leave.tween_ids(
                &[id],
                TweenVars::to(0.5)
                    .prop(Prop::X, 0.0)
                    .prop(Prop::Y, 0.0)
                    .ease(spring)
                    .overwrite(true),
            );
        });
    }
    Ok(())
}

/// A glowing dot that trails the pointer and swells over interactive elements.
pub fn wire_custom_cursor(stage: &Stage) -> anyhow::Result<()> {
    let css = format!(
        "position: fixed; left: 0; top: 0; width: {s}px; height: {s}px; \
         background: radial-gradient(circle, rgba(0,212,255,0.8) 0%, rgba(0,212,255,0) 70%); \
         border-radius: 50%; pointer-events: none; z-index: 10000; mix-blend-mode: difference;",
        s = CURSOR_SIZE_PX
    );
    let cursor = dom::append_overlay_div(&stage.document, Some(CURSOR_CLASS), &css)?;
    let cursor: web::Element = cursor.unchecked_into();
    let id = stage.id(cursor);
    stage.seed(id, Prop::BackgroundColor, CURSOR_IDLE);
    let follow: Ease = "power2.out".parse()?;

    let on_move = stage.clone();
    dom::add_listener(
        stage.document.as_ref(),
        "mousemove",
        move |ev: web::MouseEvent| {
            on_move.tween_ids(
                &[id],
                TweenVars::to(HOVER_FAST_SEC)
                    .prop(Prop::X, ev.client_x() as f32 - CURSOR_HALF_PX)
                    .prop(Prop::Y, ev.client_y() as f32 - CURSOR_HALF_PX)
                    .ease(follow)
                    .overwrite(true),
            );
        },
    );

    let swell = |scale: f32, color: Value| {
        TweenVars::to(HOVER_FAST_SEC)
            .prop(Prop::Scale, scale)
            .prop(Prop::BackgroundColor, color)
            .ease(follow)
            .overwrite(true)
    };
    for el in dom::query_all(&stage.document, "a, button, .project-card, .skill-category") {
        wire_pair(
            stage,
            &el,
            vec![id],
            swell(CURSOR_HOVER_SCALE, CURSOR_HOT),
            swell(1.0, CURSOR_IDLE),
        );
    }
    Ok(())
}

fn field_is_empty(el: &web::Element) -> bool {
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        return input.value().is_empty();
    }
    if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        return area.value().is_empty();
    }
    true
}

/// Float the label up on focus; drop it back on blur unless the field has text.
pub fn wire_form_fields(stage: &Stage) -> anyhow::Result<()> {
    let out: Ease = "power2.out".parse()?;
    for field in dom::query_all(&stage.document, ".form-group input, .form-group textarea") {
        let Some(group) = field.parent_element() else {
            continue;
        };
        let label = dom::query_in(&group, "label").map(|l| {
            let id = stage.id(l.clone());
            stage.seed_color(id, &l, Prop::Color);
            id
        });
        let bar = dom::query_in(&group, ".form-bar").map(|b| {
            let id = stage.id(b);
            stage.seed(id, Prop::ScaleX, 0.0);
            id
        });
        let target: &web::EventTarget = field.as_ref();

        let on_focus = stage.clone();
        dom::add_listener(target, "focus", move |_: web::FocusEvent| {
            if let Some(label) = label {
                on_focus.tween_ids(
                    &[label],
                    TweenVars::to(HOVER_FAST_SEC)
                        .prop(Prop::Y, LABEL_LIFT_PX)
                        .prop(Prop::Scale, LABEL_FOCUS_SCALE)
                        .prop(Prop::Color, LABEL_FOCUS)
                        .ease(out)
                        .overwrite(true),
                );
            }
            if let Some(bar) = bar {
                on_focus.tween_ids(
                    &[bar],
                    TweenVars::to(HOVER_FAST_SEC)
                        .prop(Prop::ScaleX, 1.0)
                        .transform_origin("left")
                        .ease(out)
                        .overwrite(true),
                );
            }
        });

        let on_blur = stage.clone();
        let field_for_blur = field.clone();
        dom::add_listener(target, "blur", move |_: web::FocusEvent| {
            if let (Some(label), true) = (label, field_is_empty(&field_for_blur)) {
                on_blur.tween_ids(
                    &[label],
                    TweenVars::to(HOVER_FAST_SEC)
                        .prop(Prop::Y, 0.0)
                        .prop(Prop::Scale, 1.0)
                        .prop(Prop::Color, LABEL_IDLE)
                        .ease(out)
                        .overwrite(true),
                );
            }
            if let Some(bar) = bar {
                on_blur.tween_ids(
                    &[bar],
                    TweenVars::to(HOVER_FAST_SEC)
                        .prop(Prop::ScaleX, 0.0)
                        .transform_origin("right")
                        .ease(out)
                        .overwrite(true),
                );
            }
        });
    }
    Ok(())
}
