use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Create the full-window canvas the renderer draws into and attach it to the
/// document body.
pub fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas
        .style()
        .set_css_text("position:fixed;left:0;top:0;width:100vw;height:100vh;display:block;");
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no document body"))?;
    body.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Floating control for the gravity sensor: "Gyro On" until the first motion
/// sample arrives, then relabeled to "Reset" (calibrate).
pub fn create_sensor_button(document: &web::Document) -> anyhow::Result<web::HtmlElement> {
    let button: web::HtmlElement = document
        .create_element("a")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    button.set_text_content(Some("Gyro On"));
    button.style().set_css_text(
        "position:fixed;height:8vmin;font-size:4vmin;right:2vmin;bottom:2vmin;\
         background:white;color:black;text-align:center;line-height:8vmin;\
         padding:0 2vmin;border-radius:1vmin;cursor:pointer;opacity:0.8;",
    );
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no document body"))?;
    body.append_child(&button)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(button)
}

pub fn upgrade_sensor_button(button: &web::HtmlElement) {
    button.set_text_content(Some("Reset"));
    let _ = button.style().set_property("display", "block");
}

pub fn hide_element(el: &web::HtmlElement) {
    let _ = el.style().set_property("display", "none");
}

#[inline]
pub fn add_click_listener(el: &web::HtmlElement, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
