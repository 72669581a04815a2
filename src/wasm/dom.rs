//! DOM rendering of widgets.

use std::cell::Cell;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::error::BindError;
use crate::overrides::NameOverrides;
use crate::registry::{Frontend, View, WidgetHandle};
use crate::widget::{dispatch, Input, SharedWidget, Slider, SliderOptions, Widget};

thread_local! {
    static NEXT_WIDGET_ID: Cell<usize> = const { Cell::new(0) };
}

fn widget_id() -> String {
    let id = NEXT_WIDGET_ID.with(|next| next.replace(next.get() + 1));
    format!("__widget_{id}")
}

enum Parts {
    Slider {
        input: HtmlInputElement,
        value: Element,
    },
    Checkbox {
        input: HtmlInputElement,
    },
    Option {
        select: HtmlSelectElement,
    },
}

/// Elements backing one widget. `element()` is the container that was
/// filled or created.
pub struct DomView {
    root: HtmlElement,
    parts: Parts,
}

impl DomView {
    pub fn element(&self) -> &HtmlElement {
        &self.root
    }

    /// Range input of a slider.
    pub fn range_input(&self) -> Option<&HtmlInputElement> {
        match &self.parts {
            Parts::Slider { input, .. } => Some(input),
            _ => None,
        }
    }

    pub fn checkbox_input(&self) -> Option<&HtmlInputElement> {
        match &self.parts {
            Parts::Checkbox { input } => Some(input),
            _ => None,
        }
    }

    pub fn select(&self) -> Option<&HtmlSelectElement> {
        match &self.parts {
            Parts::Option { select } => Some(select),
            _ => None,
        }
    }

    /// Text shown next to a slider.
    pub fn value_text(&self) -> Option<String> {
        match &self.parts {
            Parts::Slider { value, .. } => value.text_content(),
            _ => None,
        }
    }
}

impl View for DomView {
    fn refresh(&self, widget: &Widget) {
        match (&self.parts, widget) {
            (Parts::Slider { input, value }, Widget::Slider(slider)) => {
                input.set_value(&slider.raw().to_string());
                value.set_text_content(Some(&slider.display()));
            }
            (Parts::Checkbox { input }, Widget::Checkbox(checkbox)) => {
                input.set_checked(checkbox.checked());
            }
            (Parts::Option { select }, Widget::Option(list)) => {
                select.set_selected_index(list.selected().map_or(-1, |i| i as i32));
            }
            _ => log::error!("widget kind changed under its view"),
        }
    }
}

fn create<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element.dyn_into::<T>()?)
}

fn listen(target: &Element, events: &[&str], handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    for event in events {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    }
    // Widgets live as long as the page.
    closure.forget();
    Ok(())
}

fn render_slider(
    document: &Document,
    parent: HtmlElement,
    widget: &SharedWidget,
    slider: &Slider,
) -> Result<DomView, JsValue> {
    let outer: Element = create(document, "div", "gman-widget-outer")?;
    let label: Element = create(document, "div", "gman-widget-label")?;
    label.set_text_content(Some(slider.label()));
    let value: Element = create(document, "div", "gman-widget-value")?;
    value.set_text_content(Some(&slider.display()));
    let input: HtmlInputElement = create(document, "input", "gman-widget-slider")?;
    input.set_type("range");
    input.set_min(&slider.raw_min().to_string());
    input.set_max(&slider.raw_max().to_string());
    input.set_value(&slider.raw().to_string());

    outer.append_child(&label)?;
    outer.append_child(&value)?;
    outer.append_child(&input)?;
    parent.set_inner_html("");
    parent.append_child(&outer)?;

    {
        let widget = widget.clone();
        let target = input.clone();
        let value = value.clone();
        listen(&input, &["input", "change"], move || {
            if dispatch(&widget, Input::Slide(&target.value())).is_none() {
                return;
            }
            if let Widget::Slider(slider) = &*widget.borrow() {
                value.set_text_content(Some(&slider.display()));
            }
        })?;
    }

    Ok(DomView {
        root: parent,
        parts: Parts::Slider { input, value },
    })
}

fn render_checkbox(
    document: &Document,
    widget: &SharedWidget,
    label_text: &str,
    checked: bool,
) -> Result<DomView, JsValue> {
    let root: HtmlElement = create(document, "div", "gman-widget-outer")?;
    let id = widget_id();
    let label: Element = create(document, "label", "gman-checkbox-label")?;
    label.set_attribute("for", &id)?;
    label.set_text_content(Some(label_text));
    let input: HtmlInputElement = create(document, "input", "gman-widget-checkbox")?;
    input.set_type("checkbox");
    input.set_checked(checked);
    input.set_id(&id);
    root.append_child(&label)?;
    root.append_child(&input)?;

    {
        let widget = widget.clone();
        let target = input.clone();
        listen(&input, &["change"], move || {
            dispatch(&widget, Input::Toggle(target.checked()));
        })?;
    }

    Ok(DomView {
        root,
        parts: Parts::Checkbox { input },
    })
}

fn render_option(
    document: &Document,
    widget: &SharedWidget,
    label_text: &str,
    options: &[String],
    selected: Option<usize>,
) -> Result<DomView, JsValue> {
    let root: HtmlElement = create(document, "div", "gman-widget-outer")?;
    let id = widget_id();
    let label: Element = create(document, "label", "gman-widget-label")?;
    label.set_attribute("for", &id)?;
    label.set_text_content(Some(label_text));
    let select: HtmlSelectElement = create(document, "select", "gman-widget-select")?;
    select.set_id(&id);
    for (index, text) in options.iter().enumerate() {
        let option = document.create_element("option")?;
        option.set_text_content(Some(text));
        option.set_attribute("value", &index.to_string())?;
        select.append_child(&option)?;
    }
    select.set_selected_index(selected.map_or(-1, |i| i as i32));
    root.append_child(&label)?;
    root.append_child(&select)?;

    {
        let widget = widget.clone();
        let target = select.clone();
        listen(&select, &["change"], move || {
            if let Ok(index) = usize::try_from(target.selected_index()) {
                dispatch(&widget, Input::Select(index));
            }
        })?;
    }

    Ok(DomView {
        root,
        parts: Parts::Option { select },
    })
}

/// Builds the DOM for `widget`. Sliders fill `container` (replacing its
/// contents) or a new `div` when none is given; the other kinds always
/// create their own container.
pub fn render(
    document: &Document,
    widget: &SharedWidget,
    container: Option<HtmlElement>,
) -> Result<DomView, JsValue> {
    let state = widget.borrow();
    match &*state {
        Widget::Slider(slider) => {
            let parent = match container {
                Some(parent) => parent,
                None => create(document, "div", "")?,
            };
            render_slider(document, parent, widget, slider)
        }
        Widget::Checkbox(checkbox) => {
            render_checkbox(document, widget, checkbox.label(), checkbox.checked())
        }
        Widget::Option(list) => {
            render_option(document, widget, list.label(), list.options(), list.selected())
        }
    }
}

/// Mounts bound widgets as children of `parent`.
pub struct DomFrontend {
    document: Document,
    parent: Element,
}

impl DomFrontend {
    pub fn new(document: Document, parent: Element) -> Self {
        Self { document, parent }
    }
}

impl Frontend for DomFrontend {
    type View = DomView;

    fn mount(&mut self, key: &str, widget: &SharedWidget) -> Result<DomView, BindError> {
        let mount_error = |err: JsValue| BindError::Mount {
            key: key.to_owned(),
            reason: format!("{:?}", err),
        };
        let view = render(&self.document, widget, None).map_err(mount_error)?;
        self.parent
            .append_child(view.element())
            .map_err(mount_error)?;
        Ok(view)
    }
}

/// Slider in a detached `div`.
pub fn make_slider(
    document: &Document,
    options: SliderOptions,
    overrides: &NameOverrides,
    slide: impl Fn(f64) + 'static,
) -> Result<WidgetHandle<DomView>, JsValue> {
    let widget = Widget::from(Slider::new(options, overrides).on_slide(slide)).into_shared();
    let view = render(document, &widget, None)?;
    Ok(WidgetHandle::new(widget, view))
}

/// Slider inside the element matching `selector`. Returns `Ok(None)` when
/// nothing matches. An empty `options.name` becomes the selector without
/// its leading `#` or `.`.
pub fn setup_slider(
    document: &Document,
    selector: &str,
    mut options: SliderOptions,
    overrides: &NameOverrides,
    slide: impl Fn(f64) + 'static,
) -> Result<Option<WidgetHandle<DomView>>, JsValue> {
    let Some(parent) = document.query_selector(selector)? else {
        log::debug!("no element matches `{}`, skipping slider", selector);
        return Ok(None);
    };
    if options.name.is_empty() {
        options.name = selector.chars().skip(1).collect();
    }
    let widget = Widget::from(Slider::new(options, overrides).on_slide(slide)).into_shared();
    let view = render(document, &widget, Some(parent.dyn_into()?))?;
    Ok(Some(WidgetHandle::new(widget, view)))
}
