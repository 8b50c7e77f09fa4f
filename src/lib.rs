// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod logging;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use config::{ConfigError, ControllerConfig};
pub use controller::{ControlRequest, FirstPersonController, FrameClock, FrameLoopContext, InputEvent, InputState};
pub use model::{Camera, CameraUniform, OrientationState, PlayerPose};
pub use view::PoseSink;

#[cfg(target_arch = "wasm32")]
pub use web::start;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, MouseEvent, Window};

    use crate::controller::input::wasm::{keyboard_event_to_input, mouse_click_to_input, mouse_move_to_input};
    use crate::controller::{ControlRequest, FirstPersonController, FrameLoopContext, InputEvent};
    use crate::logging;
    use crate::model::Camera;
    use crate::view::{HudSink, LogSink};
    use crate::ControllerConfig;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        logging::init();

        let window = web_sys::window().ok_or_else(|| js_error("no global `window`"))?;
        let document = window.document().ok_or_else(|| js_error("no document on window"))?;
        let body = document.body().ok_or_else(|| js_error("no body on document"))?;

        let hud = document.create_element("div")?;
        hud.set_id("walker-hud");
        body.append_child(&hud)?;

        let controller = Rc::new(RefCell::new(FirstPersonController::new(ControllerConfig::default())));
        setup_input_listeners(&document, &window, &body, controller.clone())?;

        let (width, height) = window_size(&window);
        let sink = HudSink::new(hud, LogSink::new(Camera::new(width, height)));
        let mut frame_ctx = FrameLoopContext::new(controller, sink);
        tracing::info!("walker started");

        let window_for_loop = window.clone();
        RcCellCallback::new(window, move || {
            let now = window_for_loop.performance().map(|p| p.now()).unwrap_or(0.0);
            frame_ctx.update(now);
        })
        .start()
    }

    /// Forward DOM input events to the controller
    fn setup_input_listeners(
        document: &Document,
        window: &Window,
        body: &HtmlElement,
        controller: Rc<RefCell<FirstPersonController>>,
    ) -> Result<(), JsValue> {
        // Applies a request the controller hands back (pointer lock lives in the DOM).
        fn apply(request: Option<ControlRequest>, document: &Document) {
            match request {
                Some(ControlRequest::CapturePointer) => {
                    if let Some(body) = document.body() {
                        body.request_pointer_lock();
                    }
                }
                Some(ControlRequest::ReleasePointer) => document.exit_pointer_lock(),
                None => {}
            }
        }

        // Keyboard down
        {
            let controller = controller.clone();
            let doc = document.clone();
            let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                let event = keyboard_event_to_input(&e, true);
                if controller.borrow().config().bindings.is_bound(&e.key()) {
                    e.prevent_default();
                }
                let request = controller.borrow_mut().handle_event(&event);
                apply(request, &doc);
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
            keydown.forget();
        }

        // Keyboard up
        {
            let controller = controller.clone();
            let keyup = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                controller.borrow_mut().handle_event(&keyboard_event_to_input(&e, false));
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
            keyup.forget();
        }

        // Focus loss - clear all keys
        {
            let controller = controller.clone();
            let blur = Closure::wrap(Box::new(move |_e: Event| {
                controller.borrow_mut().handle_event(&InputEvent::FocusLost);
            }) as Box<dyn FnMut(Event)>);
            window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
            blur.forget();
        }

        // Visibility change - clear all keys when hidden
        {
            let controller = controller.clone();
            let doc = document.clone();
            let visibility = Closure::wrap(Box::new(move |_e: Event| {
                let visible = !doc.hidden();
                controller.borrow_mut().handle_event(&InputEvent::VisibilityChanged { visible });
            }) as Box<dyn FnMut(Event)>);
            document.add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())?;
            visibility.forget();
        }

        // Pointer lock change
        {
            let controller = controller.clone();
            let doc = document.clone();
            let body_el: Element = body.clone().into();
            let plc = Closure::wrap(Box::new(move |_e: Event| {
                let locked = doc.pointer_lock_element().as_ref() == Some(&body_el);
                controller.borrow_mut().handle_event(&InputEvent::PointerLockChanged { locked });
            }) as Box<dyn FnMut(Event)>);
            document.add_event_listener_with_callback("pointerlockchange", plc.as_ref().unchecked_ref())?;
            plc.forget();
        }

        // Click to enter pointer lock
        {
            let controller = controller.clone();
            let doc = document.clone();
            let click = Closure::wrap(Box::new(move |e: MouseEvent| {
                let request = controller.borrow_mut().handle_event(&mouse_click_to_input(&e, true));
                apply(request, &doc);
            }) as Box<dyn FnMut(MouseEvent)>);
            body.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
            click.forget();
        }

        // Mouse move
        {
            let controller = controller.clone();
            let mm = Closure::wrap(Box::new(move |e: MouseEvent| {
                controller.borrow_mut().handle_event(&mouse_move_to_input(&e));
            }) as Box<dyn FnMut(MouseEvent)>);
            document.add_event_listener_with_callback("mousemove", mm.as_ref().unchecked_ref())?;
            mm.forget();
        }

        Ok(())
    }

    fn window_size(window: &Window) -> (u32, u32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w as u32, h as u32)
    }

    fn js_error<E: Into<String>>(msg: E) -> JsValue {
        JsValue::from_str(&msg.into())
    }

    /// requestAnimationFrame loop that keeps re-scheduling itself
    struct RcCellCallback {
        inner: Rc<RefCell<Box<dyn FnMut()>>>,
        window: Window,
    }

    impl RcCellCallback {
        fn new(window: Window, f: impl FnMut() + 'static) -> Self {
            Self {
                inner: Rc::new(RefCell::new(Box::new(f))),
                window,
            }
        }

        fn start(self) -> Result<(), JsValue> {
            let inner = self.inner.clone();
            let window = self.window.clone();

            let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
            let callback_clone = callback.clone();

            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                inner.borrow_mut().as_mut()();

                if let Some(cb) = callback_clone.borrow().as_ref() {
                    if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        tracing::error!("requestAnimationFrame failed: {:?}", e);
                    }
                }
            }) as Box<dyn FnMut()>));

            if let Some(cb) = callback.borrow().as_ref() {
                self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            }

            // The closure re-arms itself every frame and must outlive this call
            std::mem::forget(callback);
            Ok(())
        }
    }
}
