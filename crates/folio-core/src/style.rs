//! Animatable properties and the inline CSS they compose into.
//!
//! A [`Style`] holds the current value of every property an animation has
//! touched on one element. Transform components are folded into a single
//! `transform` declaration, shadow components into `box-shadow`.

use crate::color::{css_rgba, Rgba};
use fnv::FnvHashMap;
use smallvec::SmallVec;

/// Glow color shared by every animated box-shadow on the page.
const SHADOW_RGB: [u8; 3] = [0, 212, 255];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    /// px
    X,
    /// px
    Y,
    XPercent,
    YPercent,
    Scale,
    ScaleX,
    /// degrees
    Rotation,
    RotationX,
    RotationY,
    Opacity,
    /// percent of the containing block
    Width,
    /// percent
    BackgroundPositionX,
    BackgroundColor,
    Color,
    /// px
    ShadowY,
    /// px
    ShadowBlur,
    ShadowAlpha,
    /// integer written as the element's text
    Counter,
}

impl Prop {
    /// Value assumed for a property that nothing has written yet.
    pub fn rest_value(self) -> Value {
        match self {
            Prop::Scale | Prop::ScaleX | Prop::Opacity => Value::Num(1.0),
            Prop::Width => Value::Num(100.0),
            Prop::ShadowBlur => Value::Num(30.0),
            Prop::ShadowAlpha => Value::Num(0.3),
            Prop::BackgroundColor | Prop::Color => Value::Rgba([0.0, 0.0, 0.0, 0.0]),
            _ => Value::Num(0.0),
        }
    }

    fn is_transform(self) -> bool {
        matches!(
            self,
            Prop::X
                | Prop::Y
                | Prop::XPercent
                | Prop::YPercent
                | Prop::Scale
                | Prop::ScaleX
                | Prop::Rotation
                | Prop::RotationX
                | Prop::RotationY
        )
    }

    fn is_shadow(self) -> bool {
        matches!(self, Prop::ShadowY | Prop::ShadowBlur | Prop::ShadowAlpha)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Num(f32),
    Rgba(Rgba),
}

impl Value {
    pub fn num(self) -> f32 {
        match self {
            Value::Num(v) => v,
            Value::Rgba(c) => c[3],
        }
    }

    pub fn lerp(self, to: Value, t: f32) -> Value {
        match (self, to) {
            (Value::Num(a), Value::Num(b)) => Value::Num(a + (b - a) * t),
            (Value::Rgba(a), Value::Rgba(b)) => Value::Rgba([
                a[0] + (b[0] - a[0]) * t,
                a[1] + (b[1] - a[1]) * t,
                a[2] + (b[2] - a[2]) * t,
                a[3] + (b[3] - a[3]) * t,
            ]),
            // mismatched kinds jump at the end
            (a, b) => {
                if t >= 1.0 {
                    b
                } else {
                    a
                }
            }
        }
    }

    pub fn offset(self, by: f32) -> Value {
        match self {
            Value::Num(v) => Value::Num(v + by),
            other => other,
        }
    }

    pub fn snapped(self, step: f32) -> Value {
        match self {
            Value::Num(v) if step > 0.0 => Value::Num((v / step).round() * step),
            other => other,
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Num(v)
    }
}

impl From<Rgba> for Value {
    fn from(c: Rgba) -> Self {
        Value::Rgba(c)
    }
}

/// One side of a tween: a fixed value or an offset from the captured start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Endpoint {
    Abs(Value),
    By(f32),
}

impl Endpoint {
    pub fn resolve(self, base: Value) -> Value {
        match self {
            Endpoint::Abs(v) => v,
            Endpoint::By(d) => base.offset(d),
        }
    }
}

impl From<f32> for Endpoint {
    fn from(v: f32) -> Self {
        Endpoint::Abs(Value::Num(v))
    }
}

impl From<Rgba> for Endpoint {
    fn from(c: Rgba) -> Self {
        Endpoint::Abs(Value::Rgba(c))
    }
}

impl From<Value> for Endpoint {
    fn from(v: Value) -> Self {
        Endpoint::Abs(v)
    }
}

pub type CssDecls = SmallVec<[(&'static str, String); 8]>;

#[derive(Clone, Debug, Default)]
pub struct Style {
    values: FnvHashMap<Prop, Value>,
    transform_origin: Option<&'static str>,
}

impl Style {
    pub fn get(&self, prop: Prop) -> Value {
        self.values
            .get(&prop)
            .copied()
            .unwrap_or_else(|| prop.rest_value())
    }

    pub fn is_set(&self, prop: Prop) -> bool {
        self.values.contains_key(&prop)
    }

    pub fn set(&mut self, prop: Prop, value: Value) {
        self.values.insert(prop, value);
    }

    pub fn set_transform_origin(&mut self, origin: &'static str) {
        self.transform_origin = Some(origin);
    }

    /// Counter text, when a counter has been animated.
    pub fn text(&self) -> Option<String> {
        self.values
            .get(&Prop::Counter)
            .map(|v| format!("{}", v.num().round() as i64))
    }

    pub fn css(&self) -> CssDecls {
        let mut out = CssDecls::new();
        let has = |p: Prop| self.values.contains_key(&p);
        let num = |p: Prop| self.get(p).num();

        if self.values.keys().any(|p| p.is_transform()) {
            let mut t = String::new();
            if has(Prop::XPercent) || has(Prop::YPercent) {
                t.push_str(&format!(
                    "translate({}%, {}%) ",
                    fmt_num(num(Prop::XPercent)),
                    fmt_num(num(Prop::YPercent))
                ));
            }
            t.push_str(&format!(
                "translate3d({}px, {}px, 0px)",
                fmt_num(num(Prop::X)),
                fmt_num(num(Prop::Y))
            ));
            if has(Prop::Rotation) {
                t.push_str(&format!(" rotate({}deg)", fmt_num(num(Prop::Rotation))));
            }
            if has(Prop::RotationY) {
                t.push_str(&format!(" rotateY({}deg)", fmt_num(num(Prop::RotationY))));
            }
            if has(Prop::RotationX) {
                t.push_str(&format!(" rotateX({}deg)", fmt_num(num(Prop::RotationX))));
            }
            if has(Prop::Scale) || has(Prop::ScaleX) {
                let s = num(Prop::Scale);
                t.push_str(&format!(
                    " scale({}, {})",
                    fmt_num(s * num(Prop::ScaleX)),
                    fmt_num(s)
                ));
            }
            out.push(("transform", t));
        }
        if let Some(origin) = self.transform_origin {
            out.push(("transform-origin", origin.to_string()));
        }
        if has(Prop::Opacity) {
            out.push(("opacity", fmt_num(num(Prop::Opacity).clamp(0.0, 1.0))));
        }
        if has(Prop::Width) {
            out.push(("width", format!("{}%", fmt_num(num(Prop::Width)))));
        }
        if has(Prop::BackgroundPositionX) {
            out.push((
                "background-position",
                format!("{}% 0%", fmt_num(num(Prop::BackgroundPositionX))),
            ));
        }
        if let Some(Value::Rgba(c)) = self.values.get(&Prop::BackgroundColor) {
            out.push(("background-color", css_rgba(*c)));
        }
        if let Some(Value::Rgba(c)) = self.values.get(&Prop::Color) {
            out.push(("color", css_rgba(*c)));
        }
        if self.values.keys().any(|p| p.is_shadow()) {
            let [r, g, b] = SHADOW_RGB;
            out.push((
                "box-shadow",
                format!(
                    "0 {}px {}px rgba({}, {}, {}, {})",
                    fmt_num(num(Prop::ShadowY)),
                    fmt_num(num(Prop::ShadowBlur).max(0.0)),
                    r,
                    g,
                    b,
                    fmt_num(num(Prop::ShadowAlpha).clamp(0.0, 1.0))
                ),
            ));
        }
        out
    }
}

/// Compact number formatting for inline CSS (at most 3 decimals).
fn fmt_num(v: f32) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        return "0".to_string();
    }
    let s = format!("{r:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
