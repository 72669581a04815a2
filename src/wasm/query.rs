use js_sys::{Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

use crate::overrides::{query_pairs, NameOverrides};

fn decode(component: &str) -> String {
    js_sys::decode_uri_component(component)
        .map(String::from)
        .unwrap_or_else(|_| component.to_owned())
}

/// Override table for this page: `window.hackedParams` first, then the
/// query string.
pub fn load_overrides(window: &Window) -> NameOverrides {
    let mut overrides = NameOverrides::new();

    if let Ok(injected) = Reflect::get(window, &JsValue::from_str("hackedParams")) {
        if injected.is_object() {
            let entries = Object::entries(injected.unchecked_ref::<Object>());
            overrides.extend(entries.iter().filter_map(|entry| {
                let pair: Array = entry.dyn_into().ok()?;
                let value = pair.get(1);
                let value = value.as_string().or_else(|| value.as_f64().map(|n| n.to_string()))?;
                Some((pair.get(0).as_string()?, value))
            }));
        }
    }

    match window.location().search() {
        Ok(search) => overrides.extend(
            query_pairs(&search).map(|(key, value)| (decode(key), decode(value))),
        ),
        Err(err) => log::warn!("could not read query string: {:?}", err),
    }

    log::debug!("{} name overrides", overrides.len());
    overrides
}
