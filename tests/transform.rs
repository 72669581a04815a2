use transform_viz::scene::{
    controls, default_model, rotation_from_degrees, Transform2d, F_GEOMETRY, VERTEX_COUNT,
};
use transform_viz::widget::Widget;
use transform_viz::{bind, Headless, NameOverrides};

fn approx_eq2(a: [f32; 2], b: [f32; 2], eps: f32) -> bool {
    (a[0] - b[0]).abs() < eps && (a[1] - b[1]).abs() < eps
}

#[test]
fn geometry_is_six_triangles() {
    assert_eq!(F_GEOMETRY.len(), VERTEX_COUNT as usize * 2);
    let max_x = F_GEOMETRY.iter().step_by(2).cloned().fold(f32::MIN, f32::max);
    let max_y = F_GEOMETRY.iter().skip(1).step_by(2).cloned().fold(f32::MIN, f32::max);
    assert_eq!((max_x, max_y), (100.0, 150.0));
}

#[test]
fn rotation_runs_clockwise_on_screen() {
    assert!(approx_eq2(rotation_from_degrees(0.0), [0.0, 1.0], 1e-6));
    assert!(approx_eq2(rotation_from_degrees(90.0), [-1.0, 0.0], 1e-6));

    let quarter = Transform2d {
        translation: [0.0, 0.0],
        rotation: rotation_from_degrees(90.0),
        scale: [1.0, 1.0],
    };
    // +x turns into +y, which points down the screen
    assert!(approx_eq2(quarter.apply([10.0, 0.0]), [0.0, 10.0], 1e-5));
}

#[test]
fn default_transform_places_origin_at_translation() {
    let t = Transform2d::default();
    assert_eq!(t.apply([0.0, 0.0]), [100.0, 150.0]);
    assert!(approx_eq2(t.to_clip([0.0, 0.0], [200.0, 300.0]), [0.0, 0.0], 1e-6));
    assert!(approx_eq2(t.to_clip([-100.0, -150.0], [200.0, 300.0]), [-1.0, 1.0], 1e-6));
}

#[test]
fn negative_scale_mirrors() {
    let mut model = default_model();
    model.set("scaleX", -1.0);
    let t = Transform2d::from_model(&model);
    assert_eq!(t.apply([30.0, 0.0]), [70.0, 150.0]);
}

#[test]
fn rotation_keeps_distance_from_translation() {
    let samples = [[0.0, 0.0], [30.0, 0.0], [100.0, 30.0], [67.0, 90.0], [0.0, 150.0]];
    for degrees in [0.0, 30.0, 135.0, 270.0, 359.0] {
        let mut model = default_model();
        model.set("angle", degrees);
        let t = Transform2d::from_model(&model);
        for p in samples {
            let [x, y] = t.apply(p);
            let moved = ((x - 100.0).powi(2) + (y - 150.0).powi(2)).sqrt();
            let original = (p[0].powi(2) + p[1].powi(2)).sqrt();
            assert!((moved - original).abs() < 1e-3, "{degrees}°: {p:?}");
        }
    }
}

#[test]
fn controls_bind_to_default_model() {
    let model = default_model().into_shared();
    let registry = bind(
        &mut Headless,
        &model,
        controls(640.0, 480.0),
        &NameOverrides::new(),
        None,
    )
    .unwrap();
    assert_eq!(registry.len(), 5);

    let texts: Vec<(String, String)> = registry
        .keys()
        .map(|key| match &*registry.get(key).unwrap().widget().borrow() {
            Widget::Slider(s) => (key.to_owned(), s.display()),
            _ => panic!("{key} is not a slider"),
        })
        .collect();
    let expected = [
        ("angle", "0"),
        ("scaleX", "1.00"),
        ("scaleY", "1.00"),
        ("x", "100"),
        ("y", "150"),
    ];
    assert_eq!(
        texts,
        expected.map(|(k, v)| (k.to_owned(), v.to_owned())).to_vec()
    );

    match &*registry.get("x").unwrap().widget().borrow() {
        Widget::Slider(s) => assert_eq!(s.raw_max(), 640.0),
        _ => unreachable!(),
    };
}
