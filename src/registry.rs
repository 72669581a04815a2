//! Declarative binding of model fields to widgets.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::BindError;
use crate::model::{SharedModel, Value, ValueKind};
use crate::overrides::NameOverrides;
use crate::widget::{Checkbox, OptionList, SharedWidget, Slider, SliderOptions, Widget};

/// Zero-argument notification, typically "redraw".
pub type Notify = Rc<dyn Fn()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Slider,
    Checkbox,
    Option,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Slider => "slider",
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::Option => "option",
        }
    }

    /// Model value kind the widget reads and writes.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            WidgetKind::Slider => ValueKind::Number,
            WidgetKind::Checkbox => ValueKind::Bool,
            WidgetKind::Option => ValueKind::Index,
        }
    }
}

impl FromStr for WidgetKind {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slider" => Ok(WidgetKind::Slider),
            "checkbox" => Ok(WidgetKind::Checkbox),
            "option" => Ok(WidgetKind::Option),
            other => Err(BindError::UnsupportedType(other.to_owned())),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One control to create for `key`. Unset slider options take the
/// [`SliderOptions`] defaults; `name` defaults to `key`.
#[derive(Clone)]
pub struct Descriptor {
    pub kind: WidgetKind,
    pub key: String,
    pub name: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub precision: Option<usize>,
    pub ui_precision: Option<usize>,
    pub ui_mult: Option<f64>,
    pub options: Vec<String>,
    /// Runs after the model has been updated, before the shared callback.
    pub change: Option<Notify>,
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("kind", &self.kind)
            .field("key", &self.key)
            .field("name", &self.name)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("precision", &self.precision)
            .field("options", &self.options)
            .field("change", &self.change.is_some())
            .finish_non_exhaustive()
    }
}

impl Descriptor {
    pub fn new(kind: WidgetKind, key: &str) -> Self {
        Self {
            kind,
            key: key.to_owned(),
            name: None,
            min: None,
            max: None,
            step: None,
            precision: None,
            ui_precision: None,
            ui_mult: None,
            options: Vec::new(),
            change: None,
        }
    }

    /// Descriptor from a `type` string such as `"slider"`.
    pub fn parse(type_name: &str, key: &str) -> Result<Self, BindError> {
        Ok(Self::new(type_name.parse()?, key))
    }

    pub fn slider(key: &str) -> Self {
        Self::new(WidgetKind::Slider, key)
    }

    pub fn checkbox(key: &str) -> Self {
        Self::new(WidgetKind::Checkbox, key)
    }

    pub fn option<S: Into<String>>(key: &str, options: impl IntoIterator<Item = S>) -> Self {
        Self::new(WidgetKind::Option, key).options(options)
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn ui_precision(mut self, ui_precision: usize) -> Self {
        self.ui_precision = Some(ui_precision);
        self
    }

    pub fn ui_mult(mut self, ui_mult: f64) -> Self {
        self.ui_mult = Some(ui_mult);
        self
    }

    pub fn options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn on_change(mut self, change: impl Fn() + 'static) -> Self {
        self.change = Some(Rc::new(change));
        self
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }

    fn slider_options(&self, value: f64) -> SliderOptions {
        let defaults = SliderOptions::default();
        SliderOptions {
            name: self.display_name().to_owned(),
            value,
            min: self.min.unwrap_or(defaults.min),
            max: self.max.unwrap_or(defaults.max),
            step: self.step.unwrap_or(defaults.step),
            precision: self.precision.unwrap_or(defaults.precision),
            ui_precision: self.ui_precision,
            ui_mult: self.ui_mult.unwrap_or(defaults.ui_mult),
        }
    }
}

/// Host-side rendering of a widget.
pub trait View {
    /// Re-reads the widget state after an external update.
    fn refresh(&self, widget: &Widget);
}

/// Creates the host UI for widgets as the registry binds them.
pub trait Frontend {
    type View: View;

    fn mount(&mut self, key: &str, widget: &SharedWidget) -> Result<Self::View, BindError>;
}

/// Frontend without host UI. Interaction is simulated through
/// [`crate::widget::dispatch`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl View for () {
    fn refresh(&self, _widget: &Widget) {}
}

impl Frontend for Headless {
    type View = ();

    fn mount(&mut self, _key: &str, _widget: &SharedWidget) -> Result<(), BindError> {
        Ok(())
    }
}

pub struct WidgetHandle<V> {
    widget: SharedWidget,
    element: V,
}

impl<V: View> WidgetHandle<V> {
    pub fn new(widget: SharedWidget, element: V) -> Self {
        Self { widget, element }
    }

    pub fn element(&self) -> &V {
        &self.element
    }

    pub fn widget(&self) -> &SharedWidget {
        &self.widget
    }

    /// Moves the control to `value` without invoking any callback.
    pub fn update_value(&self, value: Value) {
        self.widget.borrow_mut().update_value(value);
        self.element.refresh(&self.widget.borrow());
    }
}

/// Widgets created by [`bind`], keyed by model field.
pub struct Registry<V> {
    widgets: BTreeMap<String, WidgetHandle<V>>,
}

impl<V: View> Registry<V> {
    pub fn get(&self, key: &str) -> Option<&WidgetHandle<V>> {
        self.widgets.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Pushes every value of `data` whose key has a widget into that
    /// widget. The model is left alone and no callback fires.
    pub fn push_update(&self, data: &crate::model::Model) {
        for (key, handle) in &self.widgets {
            if let Some(value) = data.get(key) {
                handle.update_value(value);
            }
        }
    }
}

fn check(descriptor: &Descriptor, model: &crate::model::Model) -> Result<Value, BindError> {
    let key = &descriptor.key;
    let value = model
        .get(key)
        .ok_or_else(|| BindError::MissingKey { key: key.clone() })?;
    let expected = descriptor.kind.value_kind();
    if value.kind() != expected {
        return Err(BindError::KindMismatch {
            key: key.clone(),
            expected,
            found: value.kind(),
        });
    }
    if let Value::Index(index) = value {
        if index >= descriptor.options.len() {
            return Err(BindError::OptionOutOfRange {
                key: key.clone(),
                index,
                len: descriptor.options.len(),
            });
        }
    }
    Ok(value)
}

fn build(
    descriptor: &Descriptor,
    initial: Value,
    model: &SharedModel,
    overrides: &NameOverrides,
    on_change: Option<Notify>,
) -> Widget {
    let key = descriptor.key.clone();
    let model = Rc::clone(model);
    let change = descriptor.change.clone();
    let write_back = move |value: Value| {
        model.borrow_mut().set(&key, value);
        if let Some(change) = &change {
            change();
        }
        if let Some(on_change) = &on_change {
            on_change();
        }
    };

    let name = descriptor.display_name();
    match descriptor.kind {
        WidgetKind::Slider => {
            let options = descriptor.slider_options(initial.as_number());
            Slider::new(options, overrides)
                .on_slide(move |v| write_back(Value::Number(v)))
                .into()
        }
        WidgetKind::Checkbox => Checkbox::new(name, initial.is_truthy(), overrides)
            .on_change(move |v| write_back(Value::Bool(v)))
            .into(),
        WidgetKind::Option => {
            let index = initial.as_index().unwrap_or_default();
            OptionList::new(name, &descriptor.options, index, overrides)
                .on_change(move |i| write_back(Value::Index(i)))
                .into()
        }
    }
}

/// Creates one widget per descriptor, initialised from `model`.
///
/// User input writes the new value into `model[key]`, then runs the
/// descriptor's `change` and finally `on_change`. Every descriptor is
/// validated before anything is mounted. When two descriptors share a key
/// the later one replaces the earlier in the returned registry.
pub fn bind<F: Frontend>(
    frontend: &mut F,
    model: &SharedModel,
    descriptors: impl IntoIterator<Item = Descriptor>,
    overrides: &NameOverrides,
    on_change: Option<Notify>,
) -> Result<Registry<F::View>, BindError> {
    let checked = {
        let model = model.borrow();
        descriptors
            .into_iter()
            .map(|d| check(&d, &model).map(|initial| (d, initial)))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut widgets = BTreeMap::new();
    for (descriptor, initial) in checked {
        let widget = build(&descriptor, initial, model, overrides, on_change.clone()).into_shared();
        let element = frontend.mount(&descriptor.key, &widget)?;
        log::debug!("bound {} `{}`", descriptor.kind, descriptor.key);
        if widgets
            .insert(descriptor.key.clone(), WidgetHandle::new(widget, element))
            .is_some()
        {
            log::warn!("duplicate widget key `{}`, keeping the last one", descriptor.key);
        }
    }
    Ok(Registry { widgets })
}
