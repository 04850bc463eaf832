// Page-level flows through the public director API: the intro timeline,
// endless decorations and a scroll-started counter.

use folio_core::{
    Bounds, Director, Ease, Measure, Position, Prop, ScrollTrigger, ScrollView, Timeline, Tween,
    TweenVars, Value,
};

struct Page {
    stats: Bounds,
    view: ScrollView,
}

impl Page {
    fn new() -> Self {
        Self {
            stats: Bounds {
                top: 3000.0,
                height: 400.0,
            },
            view: ScrollView {
                scroll_y: 0.0,
                viewport_height: 900.0,
            },
        }
    }
}

impl Measure<&'static str> for Page {
    fn bounds(&self, target: &&'static str) -> Option<Bounds> {
        (*target == "stats").then_some(self.stats)
    }
    fn view(&self) -> ScrollView {
        self.view
    }
}

fn run(d: &mut Director<&'static str>, page: &Page, secs: f32) {
    let steps = (secs / 0.05).round() as usize;
    for _ in 0..steps {
        d.tick(0.05, page);
    }
}

fn opacity(d: &Director<&'static str>, id: folio_core::TargetId) -> f32 {
    d.style(id).unwrap().get(Prop::Opacity).num()
}

#[test]
fn intro_timeline_overlaps_and_finishes() {
    let mut d = Director::new();
    let title = d.target("title");
    let subtitle = d.target("subtitle");
    let mut tl = Timeline::new(3.5);
    tl.add(
        Tween::new(
            &[title],
            TweenVars::from(1.2)
                .prop(Prop::Y, 100.0)
                .prop(Prop::Opacity, 0.0)
                .ease(Ease::Linear),
        ),
        Position::Sequence,
    )
    .add(
        Tween::new(
            &[subtitle],
            TweenVars::from(1.0).prop(Prop::Opacity, 0.0).ease(Ease::Linear),
        ),
        "-=0.7".parse().unwrap(),
    );
    assert!((tl.start_of(1).unwrap() - 0.5).abs() < 1e-5);
    d.add(tl, None).unwrap();

    let page = Page::new();
    d.tick(0.05, &page);
    // hidden during the delay
    assert_eq!(opacity(&d, title), 0.0);
    assert_eq!(opacity(&d, subtitle), 0.0);

    // 3.5 s delay + 0.6 s: title half-way, subtitle just started
    run(&mut d, &page, 4.05);
    assert!((opacity(&d, title) - 0.5).abs() < 0.05);
    assert!(opacity(&d, subtitle) < 0.15);

    run(&mut d, &page, 2.0);
    assert_eq!(opacity(&d, title), 1.0);
    assert_eq!(opacity(&d, subtitle), 1.0);
    assert_eq!(d.style(title).unwrap().get(Prop::Y), Value::Num(0.0));
    assert!(d.is_empty());
}

#[test]
fn endless_rotation_stays_registered() {
    let mut d = Director::new();
    let icons = d.targets(["icon-a", "icon-b"]);
    d.tween(
        &icons,
        TweenVars::to(20.0)
            .prop(Prop::Rotation, 360.0)
            .ease(Ease::Linear)
            .repeat(-1)
            .stagger(0.5),
    )
    .unwrap();
    let page = Page::new();
    run(&mut d, &page, 25.0);
    assert_eq!(d.len(), 1);
    let a = d.style(icons[0]).unwrap().get(Prop::Rotation).num();
    let b = d.style(icons[1]).unwrap().get(Prop::Rotation).num();
    // 5 s into the second turn; the second icon trails by half a second
    assert!((a - 90.0).abs() < 1.0, "a = {a}");
    assert!((a - b - 9.0).abs() < 1.0, "b = {b}");
}

#[test]
fn counter_waits_for_its_section() {
    let mut d = Director::new();
    let stats = d.target("stats");
    let number = d.target("number");
    d.seed(number, Prop::Counter, Value::Num(0.0));
    let trigger = ScrollTrigger::new(stats)
        .start("top 80%")
        .unwrap()
        .toggle_actions("play none none none")
        .unwrap();
    d.tween_on_scroll(
        &[number],
        TweenVars::to(2.0).prop(Prop::Counter, 150.0).snap(1.0),
        Some(trigger),
    )
    .unwrap();

    let mut page = Page::new();
    run(&mut d, &page, 3.0);
    assert_eq!(d.style(number).unwrap().text().as_deref(), Some("0"));

    // section top reaches 80% of the viewport at scroll 2280
    page.view.scroll_y = 2400.0;
    run(&mut d, &page, 2.5);
    assert_eq!(d.style(number).unwrap().text().as_deref(), Some("150"));

    // scrolling back up has no action configured
    page.view.scroll_y = 0.0;
    run(&mut d, &page, 1.0);
    assert_eq!(d.style(number).unwrap().text().as_deref(), Some("150"));
}
