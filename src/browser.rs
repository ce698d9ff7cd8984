use anyhow::{anyhow, Result};
use futures::channel::oneshot::channel;
use std::future::Future;
use wasm_bindgen::closure::{Closure, WasmClosure, WasmClosureFnOnce};
use wasm_bindgen::JsCast;

#[rustfmt::skip]
use web_sys::{
    CanvasRenderingContext2d,
    Document,
    EventTarget,
    HtmlCanvasElement,
    HtmlElement,
    HtmlImageElement,
    Window,
};

// ==================== Constants ====================
// Constants related to HTML elements
mod html {
    pub const CANVAS_ID: &str = "gameCanvas";
    pub const CONTEXT_2D: &str = "2d";
}

pub type LoopClosure = Closure<dyn FnMut(f64)>;

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("Window not found"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow!("No Document Found"))
}

pub fn canvas() -> Result<HtmlCanvasElement> {
    element_by_id::<HtmlCanvasElement>(html::CANVAS_ID)
}

pub fn context() -> Result<CanvasRenderingContext2d> {
    canvas()?
        .get_context(html::CONTEXT_2D)
        // Result<Option<Object>, JsValue> : map the JsValue error to anyhow,
        // then map the None case to an error of its own
        .map_err(|js_value| anyhow!("Error getting context : {:#?}", js_value))?
        .ok_or_else(|| anyhow!("No 2d context found"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|element| {
            anyhow!(
                "Error converting {:#?} to CanvasRenderingContext2d",
                element
            )
        })
}

/// Size the canvas to the viewport, once, and return (width, height)
pub fn fit_canvas_to_viewport() -> Result<(f64, f64)> {
    let window = window()?;
    let width = window
        .inner_width()
        .map_err(|err| anyhow!("Could not read viewport width : {:#?}", err))?
        .as_f64()
        .ok_or_else(|| anyhow!("Viewport width is not a number"))?;
    let height = window
        .inner_height()
        .map_err(|err| anyhow!("Could not read viewport height : {:#?}", err))?
        .as_f64()
        .ok_or_else(|| anyhow!("Viewport height is not a number"))?;

    let canvas = canvas()?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    Ok((f64::from(canvas.width()), f64::from(canvas.height())))
}

pub fn element_by_id<T: JsCast>(id: &str) -> Result<T> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("No Element found with ID : '{}'", id))?
        .dyn_into::<T>()
        .map_err(|element| anyhow!("Error converting {:#?} for ID '{}'", element, id))
}

pub fn set_display(element: &HtmlElement, visible: bool) -> Result<()> {
    element
        .style()
        .set_property("display", if visible { "block" } else { "none" })
        .map_err(|err| anyhow!("Could not set display : {:#?}", err))
}

pub fn create_html_image_element() -> Result<HtmlImageElement> {
    HtmlImageElement::new().map_err(|err| anyhow!("Could not create image element : {:#?}", err))
}

pub fn closure_once<F, A, R>(f: F) -> Closure<F::FnMut>
where
    F: 'static + WasmClosureFnOnce<A, R>,
{
    Closure::once(f)
}

pub fn closure_wrap<T: WasmClosure + ?Sized>(data: Box<T>) -> Closure<T> {
    Closure::wrap(data)
}

pub fn create_raf_closure(f: impl FnMut(f64) + 'static) -> LoopClosure {
    closure_wrap(Box::new(f) as Box<dyn FnMut(f64)>)
}

/// Returns the handle needed to cancel the request
pub fn request_animation_frame(callback: &LoopClosure) -> Result<i32> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Cannot request animation frame : {:#?}", err))
}

pub fn cancel_animation_frame(handle: i32) -> Result<()> {
    window()?
        .cancel_animation_frame(handle)
        .map_err(|err| anyhow!("Cannot cancel animation frame {} : {:#?}", handle, err))
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Resolves once `millis` have elapsed
pub async fn sleep(millis: i32) -> Result<()> {
    let (tx, rx) = channel::<()>();
    let callback = closure_once(move || {
        let _ = tx.send(());
    });
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis,
        )
        .map_err(|err| anyhow!("Cannot set timeout : {:#?}", err))?;
    // keep callback alive until the timer fires
    callback.forget();

    rx.await
        .map_err(|err| anyhow!("Timeout of {}ms was dropped : {:#?}", millis, err))
}

/// Resolves the first time `target` dispatches `event`
pub async fn next_event(target: &EventTarget, event: &str) -> Result<()> {
    let (tx, rx) = channel::<()>();
    let callback = closure_once(move || {
        let _ = tx.send(());
    });
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Cannot listen for '{}' : {:#?}", event, err))?;
    callback.forget();

    rx.await
        .map_err(|err| anyhow!("Listener for '{}' was dropped : {:#?}", event, err))
}
