//! Slider, checkbox and option-list controls.
//!
//! The types here hold control state only. A frontend (see
//! [`crate::registry::Frontend`]) renders them and feeds user input back
//! through [`dispatch`]. User input reaches the widget callback;
//! `update_value` never does, so application state can be pushed into the
//! controls without feedback loops.

use std::cell::RefCell;
use std::rc::Rc;

use crate::model::{Value, ValueKind};
use crate::overrides::NameOverrides;

/// Invoked with the new value after user input.
pub type Callback = Rc<dyn Fn(Value)>;

pub type SharedWidget = Rc<RefCell<Widget>>;

/// Slider configuration. Zero `step` and zero `ui_mult` fall back to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderOptions {
    pub name: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Decimal places shown.
    pub precision: usize,
    /// Display-only override of `precision`.
    pub ui_precision: Option<usize>,
    /// Display-only scale factor.
    pub ui_mult: f64,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: 0.0,
            min: 0.0,
            max: 1.0,
            step: 1.0,
            precision: 0,
            ui_precision: None,
            ui_mult: 1.0,
        }
    }
}

impl SliderOptions {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }
}

fn or_one(x: f64) -> f64 {
    if x == 0.0 || x.is_nan() {
        1.0
    } else {
        x
    }
}

/// Range control working on integer positions: `raw = value / step`.
pub struct Slider {
    label: String,
    step: f64,
    ui_mult: f64,
    ui_precision: usize,
    raw_min: f64,
    raw_max: f64,
    raw: f64,
    slide: Option<Callback>,
}

impl Slider {
    pub fn new(options: SliderOptions, overrides: &NameOverrides) -> Self {
        let step = or_one(options.step);
        Self {
            label: overrides.label(&options.name).to_owned(),
            step,
            ui_mult: or_one(options.ui_mult),
            ui_precision: options.ui_precision.unwrap_or(options.precision),
            raw_min: options.min / step,
            raw_max: options.max / step,
            raw: options.value / step,
            slide: None,
        }
    }

    pub fn on_slide(mut self, slide: impl Fn(f64) + 'static) -> Self {
        self.slide = Some(Rc::new(move |v: Value| slide(v.as_number())));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn raw_min(&self) -> f64 {
        self.raw_min
    }

    pub fn raw_max(&self) -> f64 {
        self.raw_max
    }

    /// Position of the range control.
    pub fn raw(&self) -> f64 {
        self.raw
    }

    pub fn value(&self) -> f64 {
        self.raw * self.step
    }

    /// Text shown next to the control.
    pub fn display(&self) -> String {
        format_fixed(self.raw * self.step * self.ui_mult, self.ui_precision)
    }

    /// Applies a raw position reported by the range control and returns
    /// the de-quantized value. Unparsable input leaves the slider as is.
    pub fn input(&mut self, raw: &str) -> Option<f64> {
        let raw = parse_int(raw)?;
        self.raw = raw as f64;
        Some(self.value())
    }

    pub fn update_value(&mut self, value: f64) {
        self.raw = value / self.step;
    }
}

pub struct Checkbox {
    label: String,
    checked: bool,
    change: Option<Callback>,
}

impl Checkbox {
    pub fn new(name: &str, value: bool, overrides: &NameOverrides) -> Self {
        Self {
            label: overrides.label(name).to_owned(),
            checked: value,
            change: None,
        }
    }

    pub fn on_change(mut self, change: impl Fn(bool) + 'static) -> Self {
        self.change = Some(Rc::new(move |v: Value| change(v.is_truthy())));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn toggle(&mut self, checked: bool) -> bool {
        self.checked = checked;
        checked
    }

    pub fn update_value(&mut self, value: Value) {
        self.checked = value.is_truthy();
    }
}

/// Select control over a fixed list of labels.
pub struct OptionList {
    label: String,
    options: Vec<String>,
    selected: Option<usize>,
    change: Option<Callback>,
}

impl OptionList {
    pub fn new<S: AsRef<str>>(
        name: &str,
        options: &[S],
        value: usize,
        overrides: &NameOverrides,
    ) -> Self {
        let options: Vec<String> = options
            .iter()
            .map(|o| overrides.label(o.as_ref()).to_owned())
            .collect();
        let selected = (value < options.len()).then_some(value);
        Self {
            label: overrides.label(name).to_owned(),
            options,
            selected,
            change: None,
        }
    }

    pub fn on_change(mut self, change: impl Fn(usize) + 'static) -> Self {
        self.change = Some(Rc::new(move |v: Value| {
            if let Some(index) = v.as_index() {
                change(index)
            }
        }));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Display labels, overrides applied.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// `None` when nothing is selected.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index >= self.options.len() {
            return None;
        }
        self.selected = Some(index);
        Some(index)
    }

    /// Out-of-range values clear the selection.
    pub fn update_value(&mut self, value: Value) {
        self.selected = value.as_index().filter(|&i| i < self.options.len());
    }
}

/// User interaction reported by a frontend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    /// Raw text of the range control.
    Slide(&'a str),
    Toggle(bool),
    Select(usize),
}

pub enum Widget {
    Slider(Slider),
    Checkbox(Checkbox),
    Option(OptionList),
}

impl Widget {
    pub fn label(&self) -> &str {
        match self {
            Widget::Slider(s) => s.label(),
            Widget::Checkbox(c) => c.label(),
            Widget::Option(o) => o.label(),
        }
    }

    /// Kind of value the widget produces.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Widget::Slider(_) => ValueKind::Number,
            Widget::Checkbox(_) => ValueKind::Bool,
            Widget::Option(_) => ValueKind::Index,
        }
    }

    /// `None` for an option list with nothing selected.
    pub fn value(&self) -> Option<Value> {
        match self {
            Widget::Slider(s) => Some(Value::Number(s.value())),
            Widget::Checkbox(c) => Some(Value::Bool(c.checked())),
            Widget::Option(o) => o.selected().map(Value::Index),
        }
    }

    /// Pushes an externally-held value into the control. Never invokes the
    /// widget callback.
    pub fn update_value(&mut self, value: Value) {
        match self {
            Widget::Slider(s) => s.update_value(value.as_number()),
            Widget::Checkbox(c) => c.update_value(value),
            Widget::Option(o) => o.update_value(value),
        }
    }

    /// Applies user input without running the callback. Input meant for a
    /// different kind of control is ignored.
    pub fn apply(&mut self, input: Input<'_>) -> Option<Value> {
        match (self, input) {
            (Widget::Slider(s), Input::Slide(raw)) => s.input(raw).map(Value::Number),
            (Widget::Checkbox(c), Input::Toggle(checked)) => Some(Value::Bool(c.toggle(checked))),
            (Widget::Option(o), Input::Select(index)) => o.select(index).map(Value::Index),
            _ => None,
        }
    }

    fn callback(&self) -> Option<Callback> {
        match self {
            Widget::Slider(s) => s.slide.clone(),
            Widget::Checkbox(c) => c.change.clone(),
            Widget::Option(o) => o.change.clone(),
        }
    }

    pub fn into_shared(self) -> SharedWidget {
        Rc::new(RefCell::new(self))
    }
}

impl From<Slider> for Widget {
    fn from(s: Slider) -> Self {
        Widget::Slider(s)
    }
}

impl From<Checkbox> for Widget {
    fn from(c: Checkbox) -> Self {
        Widget::Checkbox(c)
    }
}

impl From<OptionList> for Widget {
    fn from(o: OptionList) -> Self {
        Widget::Option(o)
    }
}

/// Routes user input to a widget, then runs its callback with the widget
/// borrow released so the callback may touch the widget again.
pub fn dispatch(widget: &SharedWidget, input: Input<'_>) -> Option<Value> {
    let (value, callback) = {
        let mut widget = widget.borrow_mut();
        let value = widget.apply(input)?;
        (value, widget.callback())
    };
    if let Some(callback) = callback {
        callback(value);
    }
    Some(value)
}

/// `Number.prototype.toFixed` for the magnitudes a slider shows: exact
/// ties round away from zero, where `{:.*}` alone would round to even.
pub fn format_fixed(x: f64, digits: usize) -> String {
    // -0 + 0 == +0, so negative zero prints as "0".
    let x = x + 0.0;
    // Every finite f64 has a terminating expansion within 1074 places.
    let exact = format!("{x:.1074}");
    let tie = exact.split_once('.').is_some_and(|(_, fraction)| {
        let rest = fraction.get(digits..).unwrap_or("");
        rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0')
    });
    // One ulp away from zero is still nearer the same rounded result.
    let x = if tie { f64::from_bits(x.to_bits() + 1) } else { x };
    format!("{:.*}", digits, x)
}

/// Leading integer of `text`, ignoring anything after the digits.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let n: i64 = digits[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}
