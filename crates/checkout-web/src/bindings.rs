//! Bindings to the Checkout Web Components library
//!
//! The library is a plain script tag that installs
//! `window.CheckoutWebComponents`. Calls go through `js_sys` reflection so a
//! missing or half-loaded script surfaces as an error value instead of a
//! thrown exception.
//!
//! ```js
//! const checkout = await CheckoutWebComponents({ publicKey, paymentSession, ... });
//! checkout.create("flow").mount(element);
//! checkout.unmount();
//! ```

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

const FACTORY: &str = "CheckoutWebComponents";

/// `window.CheckoutWebComponents`, if the script has run
fn factory() -> Option<Function> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str(FACTORY))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

pub fn library_loaded() -> bool {
    factory().is_some()
}

/// Resolved widget instance
#[derive(Clone, Debug)]
pub struct CheckoutInstance(JsValue);

/// Mountable component returned by `instance.create(type)`
#[derive(Clone, Debug)]
pub struct Component(JsValue);

/// Call the factory and await the instance it resolves to
pub async fn create_instance(options: &JsValue) -> Result<CheckoutInstance, JsValue> {
    let factory = factory().ok_or_else(|| JsValue::from_str("CheckoutWebComponents is not loaded"))?;
    let value = factory.call1(&JsValue::NULL, options)?;
    let instance = JsFuture::from(Promise::resolve(&value)).await?;
    Ok(CheckoutInstance(instance))
}

impl CheckoutInstance {
    pub fn create(&self, component_type: &str) -> Result<Component, JsValue> {
        call_method(&self.0, "create", &[JsValue::from_str(component_type)]).map(Component)
    }

    pub fn unmount(&self) -> Result<(), JsValue> {
        call_method(&self.0, "unmount", &[]).map(drop)
    }
}

impl Component {
    pub fn mount(&self, element: &web_sys::Element) -> Result<(), JsValue> {
        call_method(&self.0, "mount", &[JsValue::from(element.clone())]).map(drop)
    }
}

fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("`{name}` is not a function")))?;

    match args {
        [] => method.call0(target),
        [arg] => method.call1(target, arg),
        _ => method.apply(target, &args.iter().collect::<js_sys::Array>()),
    }
}

/// Readable text for a thrown JS value
pub fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
