//! Easing functions and the per-scene lookup table.
//!
//! Every function uses the `(t, b, c, d)` signature: elapsed time, begin
//! value, change in value, duration. `f(0, b, c, d) == b` and
//! `f(d, b, c, d) == b + c` up to rounding.

use std::collections::HashMap;
use std::f32::consts::PI;

/// Pure easing function `(t, b, c, d) -> value`.
pub type EasingFn = fn(f32, f32, f32, f32) -> f32;

/// Easing selection carried by an animation record.
#[derive(Debug, Clone)]
pub enum Easing {
    /// Looked up in the scene's [`EasingTable`], falling back to `linear`.
    Named(String),
    Func(EasingFn),
}

impl Easing {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::Func(linear)
    }
}

impl From<&str> for Easing {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<EasingFn> for Easing {
    fn from(f: EasingFn) -> Self {
        Self::Func(f)
    }
}

/// Name → function table. Owned by a scene; never global.
#[derive(Debug, Clone)]
pub struct EasingTable {
    fns: HashMap<String, EasingFn>,
}

impl EasingTable {
    /// Table holding only `linear`.
    pub fn empty() -> Self {
        let mut fns = HashMap::new();
        fns.insert("linear".to_string(), linear as EasingFn);
        Self { fns }
    }

    pub fn get(&self, name: &str) -> Option<EasingFn> {
        self.fns.get(name).copied()
    }

    /// Adds or replaces `name`.
    pub fn register(&mut self, name: impl Into<String>, f: EasingFn) {
        self.fns.insert(name.into(), f);
    }

    /// Resolves an easing, falling back to `linear` for unknown names.
    pub fn resolve(&self, easing: &Easing) -> EasingFn {
        match easing {
            Easing::Func(f) => *f,
            Easing::Named(name) => self.get(name).unwrap_or_else(|| {
                log::trace!("unknown easing {name:?}, using linear");
                linear as EasingFn
            }),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fns.keys().map(String::as_str)
    }
}

impl Default for EasingTable {
    fn default() -> Self {
        let mut table = Self::empty();
        let builtins: [(&str, EasingFn); 21] = [
            ("ease_in_quad", ease_in_quad),
            ("ease_out_quad", ease_out_quad),
            ("ease_in_out_quad", ease_in_out_quad),
            ("ease_in_cubic", ease_in_cubic),
            ("ease_out_cubic", ease_out_cubic),
            ("ease_in_out_cubic", ease_in_out_cubic),
            ("ease_in_quart", ease_in_quart),
            ("ease_out_quart", ease_out_quart),
            ("ease_in_out_quart", ease_in_out_quart),
            ("ease_in_quint", ease_in_quint),
            ("ease_out_quint", ease_out_quint),
            ("ease_in_out_quint", ease_in_out_quint),
            ("ease_in_sine", ease_in_sine),
            ("ease_out_sine", ease_out_sine),
            ("ease_in_out_sine", ease_in_out_sine),
            ("ease_in_expo", ease_in_expo),
            ("ease_out_expo", ease_out_expo),
            ("ease_in_out_expo", ease_in_out_expo),
            ("ease_in_circ", ease_in_circ),
            ("ease_out_circ", ease_out_circ),
            ("ease_in_out_circ", ease_in_out_circ),
        ];
        for (name, f) in builtins {
            table.register(name, f);
            table.register(camel_case(name), f);
        }
        table
    }
}

/// `ease_in_out_quad` → `easeInOutQuad`.
fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn linear(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * t / d + b
}

pub fn ease_in_quad(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    c * t * t + b
}

pub fn ease_out_quad(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    -c * t * (t - 2.0) + b
}

pub fn ease_in_out_quad(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    let t = t - 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

pub fn ease_in_cubic(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    c * t * t * t + b
}

pub fn ease_out_cubic(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d - 1.0;
    c * (t * t * t + 1.0) + b
}

pub fn ease_in_out_cubic(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t * t + b;
    }
    let t = t - 2.0;
    c / 2.0 * (t * t * t + 2.0) + b
}

pub fn ease_in_quart(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    c * t.powi(4) + b
}

pub fn ease_out_quart(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d - 1.0;
    -c * (t.powi(4) - 1.0) + b
}

pub fn ease_in_out_quart(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t.powi(4) + b;
    }
    let t = t - 2.0;
    -c / 2.0 * (t.powi(4) - 2.0) + b
}

pub fn ease_in_quint(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    c * t.powi(5) + b
}

pub fn ease_out_quint(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d - 1.0;
    c * (t.powi(5) + 1.0) + b
}

pub fn ease_in_out_quint(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t.powi(5) + b;
    }
    let t = t - 2.0;
    c / 2.0 * (t.powi(5) + 2.0) + b
}

pub fn ease_in_sine(t: f32, b: f32, c: f32, d: f32) -> f32 {
    -c * (t / d * (PI / 2.0)).cos() + c + b
}

pub fn ease_out_sine(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * (t / d * (PI / 2.0)).sin() + b
}

pub fn ease_in_out_sine(t: f32, b: f32, c: f32, d: f32) -> f32 {
    -c / 2.0 * ((PI * t / d).cos() - 1.0) + b
}

pub fn ease_in_expo(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * 2f32.powf(10.0 * (t / d - 1.0)) + b
}

pub fn ease_out_expo(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * (-(2f32.powf(-10.0 * t / d)) + 1.0) + b
}

pub fn ease_in_out_expo(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * 2f32.powf(10.0 * (t - 1.0)) + b;
    }
    let t = t - 1.0;
    c / 2.0 * (-(2f32.powf(-10.0 * t)) + 2.0) + b
}

pub fn ease_in_circ(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    -c * ((1.0 - t * t).sqrt() - 1.0) + b
}

pub fn ease_out_circ(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d - 1.0;
    c * (1.0 - t * t).sqrt() + b
}

pub fn ease_in_out_circ(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b;
    }
    let t = t - 2.0;
    c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
}
