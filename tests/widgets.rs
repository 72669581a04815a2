use std::cell::{Cell, RefCell};
use std::rc::Rc;

use transform_viz::widget::{dispatch, Checkbox, Input, OptionList, Slider, SliderOptions, Widget};
use transform_viz::{NameOverrides, Value};

fn slider(options: SliderOptions) -> Slider {
    Slider::new(options, &NameOverrides::new())
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn slider_defaults() {
    let s = slider(SliderOptions::named("n"));
    assert_eq!(s.raw_min(), 0.0);
    assert_eq!(s.raw_max(), 1.0);
    assert_eq!(s.raw(), 0.0);
    assert_eq!(s.display(), "0");
    assert_eq!(s.label(), "n");
}

#[test]
fn slider_range_is_quantized_by_step() {
    let s = slider(SliderOptions {
        value: 1.0,
        min: -5.0,
        max: 5.0,
        step: 0.01,
        precision: 2,
        ..SliderOptions::named("scaleX")
    });
    assert!(approx_eq(s.raw_min(), -500.0));
    assert!(approx_eq(s.raw_max(), 500.0));
    assert!(approx_eq(s.raw(), 100.0));
    assert_eq!(s.display(), "1.00");
}

#[test]
fn slide_reports_raw_times_step() {
    let cases = [
        // step, ui_mult, ui_precision, raw, expected value, expected text
        (1.0, 1.0, 0, "250", 250.0, "250"),
        (0.01, 1.0, 2, "150", 1.5, "1.50"),
        (0.01, 100.0, 0, "37", 0.37, "37"),
        (0.5, 2.0, 1, "-3", -1.5, "-3.0"),
    ];
    for (step, ui_mult, ui_precision, raw, value, text) in cases {
        let seen = Rc::new(Cell::new(f64::NAN));
        let s = {
            let seen = seen.clone();
            slider(SliderOptions {
                min: -1000.0,
                max: 1000.0,
                step,
                ui_mult,
                ui_precision: Some(ui_precision),
                ..SliderOptions::named("s")
            })
            .on_slide(move |v| seen.set(v))
        };
        let widget = Widget::from(s).into_shared();

        let reported = dispatch(&widget, Input::Slide(raw)).expect("raw input accepted");
        assert!(approx_eq(reported.as_number(), value), "step {step}: {reported:?}");
        assert!(approx_eq(seen.get(), value), "step {step}: callback got {}", seen.get());
        match &*widget.borrow() {
            Widget::Slider(s) => assert_eq!(s.display(), text),
            _ => unreachable!(),
        };
    }
}

#[test]
fn display_rounds_halves_away_from_zero() {
    let cases = [
        // step, precision, value, expected text
        (0.5, 0, 2.5, "3"),
        (0.5, 0, -2.5, "-3"),
        (0.25, 1, 0.25, "0.3"),
        (0.25, 1, -0.75, "-0.8"),
    ];
    for (step, precision, value, text) in cases {
        let s = slider(SliderOptions {
            value,
            min: -10.0,
            max: 10.0,
            step,
            precision,
            ..SliderOptions::named("s")
        });
        assert_eq!(s.display(), text, "step {step}, value {value}");
        assert!(approx_eq(s.value(), value));
    }
}

#[test]
fn ui_precision_overrides_precision_for_display_only() {
    let s = slider(SliderOptions {
        value: 0.25,
        step: 0.05,
        precision: 2,
        ui_precision: Some(0),
        ui_mult: 100.0,
        ..SliderOptions::named("percent")
    });
    assert_eq!(s.display(), "25");
    assert!(approx_eq(s.value(), 0.25));
}

#[test]
fn unparsable_slide_is_ignored() {
    let calls = Rc::new(Cell::new(0));
    let widget = {
        let calls = calls.clone();
        Widget::from(
            slider(SliderOptions {
                value: 3.0,
                max: 10.0,
                ..SliderOptions::named("s")
            })
            .on_slide(move |_| calls.set(calls.get() + 1)),
        )
        .into_shared()
    };
    assert_eq!(dispatch(&widget, Input::Slide("")), None);
    assert_eq!(calls.get(), 0);
    assert_eq!(widget.borrow().value(), Some(Value::Number(3.0)));
}

#[test]
fn update_value_never_invokes_callbacks() {
    let calls = Rc::new(Cell::new(0));
    let bump = {
        let calls = calls.clone();
        move || calls.set(calls.get() + 1)
    };
    let overrides = NameOverrides::new();

    let mut widgets: Vec<Widget> = vec![
        {
            let bump = bump.clone();
            slider(SliderOptions {
                max: 100.0,
                ..SliderOptions::named("s")
            })
            .on_slide(move |_| bump())
            .into()
        },
        {
            let bump = bump.clone();
            Checkbox::new("c", false, &overrides)
                .on_change(move |_| bump())
                .into()
        },
        OptionList::new("o", &["a", "b", "c"], 0, &overrides)
            .on_change(move |_| bump())
            .into(),
    ];

    widgets[0].update_value(Value::Number(42.0));
    widgets[1].update_value(Value::Bool(true));
    widgets[2].update_value(Value::Index(2));
    assert_eq!(calls.get(), 0);

    assert_eq!(widgets[0].value(), Some(Value::Number(42.0)));
    assert_eq!(widgets[1].value(), Some(Value::Bool(true)));
    assert_eq!(widgets[2].value(), Some(Value::Index(2)));
}

#[test]
fn update_value_round_trips_through_display() {
    let mut s = slider(SliderOptions {
        min: -5.0,
        max: 5.0,
        step: 0.01,
        precision: 2,
        ..SliderOptions::named("scaleY")
    });
    for (v, text) in [(0.37, "0.37"), (-2.5, "-2.50"), (4.99, "4.99"), (0.0, "0.00")] {
        s.update_value(v);
        assert_eq!(s.display(), text);
        assert!(approx_eq(s.value(), v));
    }
}

#[test]
fn checkbox_toggle_and_truthiness() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let widget = {
        let seen = seen.clone();
        Widget::from(
            Checkbox::new("enabled", false, &NameOverrides::new())
                .on_change(move |v| seen.borrow_mut().push(v)),
        )
        .into_shared()
    };

    assert_eq!(dispatch(&widget, Input::Toggle(true)), Some(Value::Bool(true)));
    assert_eq!(dispatch(&widget, Input::Toggle(false)), Some(Value::Bool(false)));
    assert_eq!(*seen.borrow(), vec![true, false]);

    let mut widget = widget.borrow_mut();
    widget.update_value(Value::Number(3.0));
    assert_eq!(widget.value(), Some(Value::Bool(true)));
    widget.update_value(Value::Number(0.0));
    assert_eq!(widget.value(), Some(Value::Bool(false)));
}

#[test]
fn option_preselects_and_reports_index() {
    let seen = Rc::new(Cell::new(usize::MAX));
    let list = {
        let seen = seen.clone();
        OptionList::new("mode", &["fill", "wire", "points"], 1, &NameOverrides::new())
            .on_change(move |i| seen.set(i))
    };
    assert_eq!(list.selected(), Some(1));

    let widget = Widget::from(list).into_shared();
    assert_eq!(dispatch(&widget, Input::Select(2)), Some(Value::Index(2)));
    assert_eq!(seen.get(), 2);

    assert_eq!(dispatch(&widget, Input::Select(3)), None);
    assert_eq!(seen.get(), 2);
    assert_eq!(widget.borrow().value(), Some(Value::Index(2)));
}

#[test]
fn option_update_out_of_range_clears_selection() {
    let mut widget = Widget::from(OptionList::new("o", &["a", "b"], 0, &NameOverrides::new()));
    widget.update_value(Value::Index(5));
    assert_eq!(widget.value(), None);
}

#[test]
fn labels_use_name_overrides() {
    let overrides = NameOverrides::from_pairs([
        ("ui-angle", "Rotation"),
        ("ui-fill", "Solid"),
        ("ui-mode", "Draw mode"),
    ]);
    let s = Slider::new(SliderOptions::named("angle"), &overrides);
    assert_eq!(s.label(), "Rotation");

    let list = OptionList::new("mode", &["fill", "wire"], 0, &overrides);
    assert_eq!(list.label(), "Draw mode");
    assert_eq!(list.options(), ["Solid".to_owned(), "wire".to_owned()]);

    let checkbox = Checkbox::new("enabled", true, &overrides);
    assert_eq!(checkbox.label(), "enabled");
}

#[test]
fn empty_override_falls_back_to_name() {
    let overrides = NameOverrides::from_pairs([("ui-angle", ""), ("ui-fill", "")]);
    assert_eq!(Slider::new(SliderOptions::named("angle"), &overrides).label(), "angle");
    let list = OptionList::new("mode", &["fill"], 0, &overrides);
    assert_eq!(list.options(), ["fill".to_owned()]);
}
