//! The page's animation table: every scroll reveal, loop and scrubbed effect
//! registered once at startup. Groups whose elements are missing register
//! nothing.

use crate::constants::*;
use crate::dom;
use crate::input;
use crate::stage::Stage;
use folio_core::{
    AnimationId, Ease, Endpoint, Position, Prop, Scrub, Timeline, Tween, TweenVars,
};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn ease(name: &str) -> anyhow::Result<Ease> {
    Ok(name.parse()?)
}

#[inline]
fn at(pos: &str) -> anyhow::Result<Position> {
    Ok(pos.parse()?)
}

/// Tally of what got registered, for the startup log line.
#[derive(Default, Debug)]
pub struct Registered {
    pub ids: Vec<AnimationId>,
    pub skipped: usize,
}

impl Registered {
    fn push(&mut self, id: Option<AnimationId>) {
        match id {
            Some(id) => self.ids.push(id),
            None => self.skipped += 1,
        }
    }
}

pub fn register_all(stage: &Stage) -> anyhow::Result<Registered> {
    let mut out = Registered::default();
    hero_timeline(stage, &mut out)?;
    floating_icons(stage, &mut out)?;
    section_reveals(stage, &mut out)?;
    skill_bars(stage, &mut out)?;
    grid_reveals(stage, &mut out)?;
    parallax(stage, &mut out)?;
    logo_orbit(stage, &mut out)?;
    text_reveals(stage, &mut out)?;
    hero_background(stage, &mut out)?;
    scroll_effects(stage, &mut out)?;
    stat_counters(stage, &mut out)?;
    loading_screen(stage, &mut out)?;
    Ok(out)
}

fn hero_timeline(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    let mut tl = Timeline::new(HERO_DELAY_SEC);
    let rise = |d: f32, y: f32, e: &str| -> anyhow::Result<TweenVars> {
        Ok(TweenVars::from(d)
            .prop(Prop::Y, y)
            .prop(Prop::Opacity, 0.0)
            .ease(ease(e)?))
    };
    tl.add(
        Tween::new(&stage.select(".greeting"), rise(1.0, 50.0, "power3.out")?),
        Position::Sequence,
    )
    .add(
        Tween::new(&stage.select(".name"), rise(1.2, 80.0, "power3.out")?),
        at("-=0.7")?,
    )
    .add(
        Tween::new(
            &stage.select(".title-highlight"),
            rise(1.0, 50.0, "power3.out")?,
        ),
        at("-=0.5")?,
    )
    .add(
        Tween::new(
            &stage.select(".hero-description"),
            rise(1.0, 30.0, "power2.out")?,
        ),
        at("-=0.3")?,
    )
    .add(
        Tween::new(
            &stage.select(".hero-buttons .btn"),
            rise(0.8, 30.0, "back.out(1.7)")?.stagger(0.2),
        ),
        at("-=0.2")?,
    )
    .add(
        Tween::new(
            &stage.select(".avatar-container"),
            TweenVars::from(1.5)
                .prop(Prop::Scale, 0.5)
                .prop(Prop::Opacity, 0.0)
                .prop(Prop::Rotation, 180.0)
                .ease(ease("elastic.out(1, 0.5)")?),
        ),
        at("-=1")?,
    );
    out.push(stage.director.borrow_mut().add(tl, None));
    Ok(())
}

fn floating_icons(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    let icons = stage.select(".floating-icons i");
    out.push(
        stage.tween_ids(
            &icons,
            TweenVars::to(3.0)
                .prop(Prop::Rotation, 360.0)
                .repeat(-1)
                .ease(Ease::Linear)
                .stagger(0.5),
        ),
    );
    // each icon bobs on its own period
    for (index, id) in icons.iter().enumerate() {
        let i = index as f32;
        out.push(
            stage.tween_ids(
                &[*id],
                TweenVars::to(4.0 + i)
                    .prop(Prop::Y, Endpoint::By(-(20.0 + i * 10.0)))
                    .repeat(-1)
                    .yoyo(true)
                    .ease(ease("power1.inOut")?),
            ),
        );
    }
    Ok(())
}

fn section_reveals(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    for section in dom::query_all(&stage.document, "section") {
        if section.id() == "home" {
            continue;
        }
        let titles = stage.ids(dom::query_all_in(&section, ".section-title"));
        let vars = TweenVars::from(1.0)
            .prop(Prop::Y, 100.0)
            .prop(Prop::Opacity, 0.0)
            .ease(ease("power3.out")?);
        out.push(stage.on_scroll(&titles, vars, section, |t| {
            t.start("top 80%")?
                .end("bottom 20%")?
                .toggle_actions("play none none reverse")
        })?);
    }
    Ok(())
}

fn skill_bars(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    for bar in dom::query_all(&stage.document, ".skill-progress") {
        let Some(width) = bar
            .get_attribute("data-width")
            .and_then(|w| input::percent(&w))
        else {
            log::debug!("[director] skill bar without data-width");
            out.skipped += 1;
            continue;
        };
        let id = stage.id(bar.clone());
        let vars = TweenVars::from_to(2.0)
            .span(Prop::Width, 0.0, width)
            .ease(ease("power2.out")?);
        out.push(stage.on_scroll(&[id], vars, bar, |t| {
            t.start("top 90%")?.toggle_actions("play none none none")
        })?);
    }
    Ok(())
}

/// Staggered card and form reveals, each triggered by its container.
fn grid_reveals(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    let rows: [(&str, &str, TweenVars); 3] = [
        (
            ".project-card",
            ".projects-grid",
            TweenVars::from(1.0)
                .prop(Prop::Y, 100.0)
                .prop(Prop::Opacity, 0.0)
                .stagger(0.3)
                .ease(ease("power3.out")?),
        ),
        (
            ".achievement-card",
            ".achievements-grid",
            TweenVars::from(1.0)
                .prop(Prop::Scale, 0.5)
                .prop(Prop::Opacity, 0.0)
                .stagger(0.2)
                .ease(ease("back.out(1.7)")?),
        ),
        (
            ".contact-form .form-group",
            ".contact-form",
            TweenVars::from(0.8)
                .prop(Prop::X, -50.0)
                .prop(Prop::Opacity, 0.0)
                .stagger(0.1)
                .ease(ease("power2.out")?),
        ),
    ];
    for (targets, container, vars) in rows {
        let Ok(Some(trigger)) = stage.document.query_selector(container) else {
            out.skipped += 1;
            continue;
        };
        let ids = stage.select(targets);
        out.push(stage.on_scroll(&ids, vars, trigger, |t| {
            t.start("top 80%")?
                .toggle_actions("play none none reverse")
        })?);
    }
    Ok(())
}

fn parallax(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    for el in dom::query_all(&stage.document, ".parallax-element") {
        let id = stage.id(el.clone());
        let vars = TweenVars::to(0.5)
            .prop(Prop::YPercent, -50.0)
            .ease(Ease::Linear);
        out.push(stage.on_scroll(&[id], vars, el, |t| {
            Ok(t.start("top bottom")?
                .end("bottom top")?
                .scrub(Scrub::Instant))
        })?);
    }
    Ok(())
}

fn logo_orbit(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    out.push(
        stage.tween(
            ".logo-orbit",
            TweenVars::to(10.0)
                .prop(Prop::Rotation, 360.0)
                .repeat(-1)
                .ease(Ease::Linear),
        ),
    );
    Ok(())
}

fn text_reveals(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    if let Ok(Some(title)) = stage.document.query_selector(".hero-title") {
        let text = title.text_content().unwrap_or_default();
        title.set_inner_html(&input::split_chars_html(&text));
        let chars = stage.ids(dom::query_all_in(&title, ".char"));
        out.push(
            stage.tween_ids(
                &chars,
                TweenVars::from(0.1)
                    .prop(Prop::Opacity, 0.0)
                    .prop(Prop::Y, 50.0)
                    .stagger(CHAR_REVEAL_STAGGER_SEC)
                    .delay(CHAR_REVEAL_DELAY_SEC)
                    .ease(ease("power2.out")?),
            ),
        );
    }

    let reveal = |selector: &str,
                  d: f32,
                  y: f32,
                  e: &str,
                  out: &mut Registered|
     -> anyhow::Result<()> {
        for el in dom::query_all(&stage.document, selector) {
            let id = stage.id(el.clone());
            let vars = TweenVars::from(d)
                .prop(Prop::Y, y)
                .prop(Prop::Opacity, 0.0)
                .ease(ease(e)?);
            out.push(stage.on_scroll(&[id], vars, el, |t| {
                t.start("top 90%")?
                    .toggle_actions("play none none reverse")
            })?);
        }
        Ok(())
    };
    reveal(".section-title", 1.2, 100.0, "power3.out", out)?;
    reveal("p", 0.8, 30.0, "power2.out", out)?;
    Ok(())
}

fn hero_background(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    if let Ok(Some(hero)) = stage.document.query_selector(".hero") {
        let id = stage.id(hero);
        out.push(
            stage.tween_ids(
                &[id],
                TweenVars::to(20.0)
                    .prop(Prop::BackgroundPositionX, 200.0)
                    .ease(Ease::Linear)
                    .repeat(-1)
                    .yoyo(true),
            ),
        );
    }
    Ok(())
}

fn scroll_effects(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    let scrub = |selector: &str,
                 vars: TweenVars,
                 trigger: &str,
                 start: &str,
                 end: &str|
     -> anyhow::Result<Option<AnimationId>> {
        let Ok(Some(trigger_el)) = stage.document.query_selector(trigger) else {
            return Ok(None);
        };
        let ids = stage.select(selector);
        stage.on_scroll(&ids, vars, trigger_el, |t| {
            Ok(t.start(start)?.end(end)?.scrub(Scrub::Instant))
        })
    };

    out.push(scrub(
        ".hero-avatar",
        TweenVars::to(0.5)
            .prop(Prop::YPercent, -30.0)
            .ease(Ease::Linear),
        ".hero",
        "top top",
        "bottom top",
    )?);
    out.push(scrub(
        ".section-line",
        TweenVars::to(0.5)
            .prop(Prop::ScaleX, 0.0)
            .transform_origin("right center")
            .ease(Ease::Linear),
        ".section-line",
        "top 80%",
        "top 20%",
    )?);
    out.push(scrub(
        ".logo-orbit",
        TweenVars::to(0.5)
            .prop(Prop::Rotation, 720.0)
            .ease(Ease::Linear),
        "body",
        "top top",
        "bottom bottom",
    )?);

    let bar = dom::append_overlay_div(
        &stage.document,
        Some(PROGRESS_BAR_CLASS),
        "position: fixed; top: 0; left: 0; width: 0%; height: 4px; \
         background: linear-gradient(90deg, #00d4ff, #4ecdc4); z-index: 10001;",
    )?;
    let bar: web::Element = bar.unchecked_into();
    let Some(body) = stage.document.body() else {
        return Ok(());
    };
    let id = stage.id(bar);
    stage.seed(id, Prop::Width, 0.0);
    out.push(stage.on_scroll(
        &[id],
        TweenVars::to(0.5).prop(Prop::Width, 100.0).ease(Ease::Linear),
        body.unchecked_into(),
        |t| Ok(t.start("top top")?.end("bottom bottom")?.scrub(Scrub::Instant)),
    )?);
    Ok(())
}

fn stat_counters(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    for stat in dom::query_all(&stage.document, ".stat-number") {
        let text = stat.text_content().unwrap_or_default();
        let Some(target) = input::leading_int(&text) else {
            out.skipped += 1;
            continue;
        };
        stat.set_text_content(Some("0"));
        let id = stage.id(stat.clone());
        stage.seed(id, Prop::Counter, 0.0);
        let vars = TweenVars::to(2.0)
            .prop(Prop::Counter, target as f32)
            .snap(1.0)
            .ease(ease("power2.out")?);
        out.push(stage.on_scroll(&[id], vars, stat, |t| {
            t.start("top 80%")?
                .toggle_actions("play none none reverse")
        })?);
    }
    Ok(())
}

fn loading_screen(stage: &Stage, out: &mut Registered) -> anyhow::Result<()> {
    out.push(
        stage.tween(
            ".loading-cube",
            TweenVars::to(2.0)
                .prop(Prop::RotationX, 360.0)
                .prop(Prop::RotationY, 360.0)
                .repeat(-1)
                .ease(Ease::Linear),
        ),
    );
    out.push(
        stage.tween(
            ".loading-progress",
            TweenVars::from_to(3.0)
                .span(Prop::Width, 0.0, 100.0)
                .ease(ease("power2.out")?),
        ),
    );
    Ok(())
}
