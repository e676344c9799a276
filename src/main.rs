//! Neon Ripple entry point
//!
//! Web: binds the scene to a Canvas2D element and the browser frame clock.
//! Native: plays a seeded, scripted touch session through the headless frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent as DomPointerEvent};

    use glam::Vec2;
    use neon_ripple::platform::{DOM_POINTER_EVENTS, dom_pointer_kind};
    use neon_ripple::sim::{Haptics, PointerEvent, PointerKind};
    use neon_ripple::{DrawCommand, DrawSurface, NeonRippleScene, Settings};

    /// Canvas2D draw surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
    }

    impl DrawSurface for CanvasSurface {
        fn begin_frame(&mut self, width: f32, height: f32) {
            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn draw(&mut self, command: &DrawCommand) {
            let ctx = &self.ctx;
            match command {
                DrawCommand::FillCircle { color, .. } => {
                    ctx.set_fill_style_str(&color.to_css());
                }
                DrawCommand::RadialGradientCircle {
                    center,
                    radius,
                    stops,
                } => {
                    let (x, y, r) = (center.x as f64, center.y as f64, *radius as f64);
                    let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, r) else {
                        log::warn!("Radial gradient rejected at radius {}", radius);
                        return;
                    };
                    for stop in stops {
                        if let Err(e) = gradient.add_color_stop(stop.offset, &stop.color.to_css()) {
                            log::warn!("Gradient stop {} rejected: {:?}", stop.offset, e);
                        }
                    }
                    ctx.set_fill_style_canvas_gradient(&gradient);
                }
            }
            let center = command.center();
            ctx.begin_path();
            let _ = ctx.arc(
                center.x as f64,
                center.y as f64,
                command.radius() as f64,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
        }
    }

    /// Short vibration pulses through the Vibration API
    struct WebHaptics;

    impl Haptics for WebHaptics {
        fn on_press_start(&mut self) {
            if let Some(window) = web_sys::window() {
                window.navigator().vibrate_with_duration(20);
            }
        }

        fn on_press_end(&mut self) {
            if let Some(window) = web_sys::window() {
                window.navigator().vibrate_with_duration(10);
            }
        }
    }

    struct App {
        scene: NeonRippleScene,
        surface: CanvasSurface,
    }

    fn now_ms() -> u64 {
        js_sys::Date::now() as u64
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Neon Ripple starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let scene = NeonRippleScene::with_haptics(
            settings,
            width as f32,
            height as f32,
            Box::new(WebHaptics),
        );
        canvas.set_attribute("data-testid", scene.tag())?;

        let app = Rc::new(RefCell::new(App {
            scene,
            surface: CanvasSurface { ctx },
        }));

        setup_pointer_handlers(&canvas, app.clone())?;
        setup_visibility_cancel(app.clone())?;
        request_animation_frame(app, canvas);

        log::info!("Neon Ripple running!");
        Ok(())
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        for name in DOM_POINTER_EVENTS {
            let Some(kind) = dom_pointer_kind(name) else {
                continue;
            };
            let app = app.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DomPointerEvent| {
                let position = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                // Hover moves without a press carry no gesture
                if kind == PointerKind::Move && event.buttons() == 0 {
                    return;
                }
                // Keep move/up flowing to the canvas when the finger leaves it
                if kind == PointerKind::Down {
                    if let Err(e) = target.set_pointer_capture(event.pointer_id()) {
                        log::warn!("Pointer capture failed for {}: {:?}", event.pointer_id(), e);
                    }
                }
                let pointer = PointerEvent::new(event.pointer_id() as u32, kind, position, now_ms());
                app.borrow_mut().scene.handle_pointer(&pointer);
                event.prevent_default();
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_visibility_cancel(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                app.borrow_mut().scene.cancel_gestures(now_ms());
                log::info!("Gestures released (tab hidden)");
            }
        });
        document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, canvas: HtmlCanvasElement) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame(app, canvas);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, canvas: HtmlCanvasElement) {
        // Canvas removed from the page: the scene is gone, stop the loop
        if !canvas.is_connected() {
            app.borrow_mut().scene.teardown();
            return;
        }
        {
            let mut guard = app.borrow_mut();
            let App { scene, surface } = &mut *guard;
            let (width, height) = (canvas.client_width() as f32, canvas.client_height() as f32);
            if (width, height) != scene.size() && width > 0.0 && height > 0.0 {
                canvas.set_width(width as u32);
                canvas.set_height(height as u32);
                scene.resize(width, height);
            }
            let needs_clear = scene.needs_frame();
            let commands = scene.frame(now_ms());
            if needs_clear {
                surface.begin_frame(width, height);
                for command in &commands {
                    surface.draw(command);
                }
                surface.end_frame();
            }
            let _ = canvas.set_attribute("aria-description", &scene.state_description());
        }
        request_animation_frame(app, canvas);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use neon_ripple::platform::{EventQueue, FixedTicker, FrameLoop, FrameStats};
    use neon_ripple::renderer::{shapes, vertex};
    use neon_ripple::sim::PointerEvent;
    use neon_ripple::{NeonRippleScene, RecordingSurface, Settings};

    const WIDTH: f32 = 1080.0;
    const HEIGHT: f32 = 1920.0;
    const GESTURES: u32 = 24;
    /// Upper bound on frames so a bad script can't spin forever
    const MAX_FRAMES: usize = 60 * 120;

    /// Random taps, long presses and drags, some overlapping, a few cancelled
    fn scripted_session(rng: &mut Pcg32) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let mut start = 0u64;

        for pointer_id in 0..GESTURES {
            start += rng.random_range(60..700);
            let mut pos = Vec2::new(rng.random_range(0.0..WIDTH), rng.random_range(0.0..HEIGHT));
            let press = rng.random_range(30..1500u64);
            events.push(PointerEvent::down(pointer_id, pos, start));

            let mut t = start;
            if rng.random_bool(0.5) {
                let heading = Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU));
                let speed = rng.random_range(0.1..3.0f32);
                while t + 20 < start + press {
                    let step = rng.random_range(8..20u64);
                    t += step;
                    pos += heading * speed * step as f32;
                    events.push(PointerEvent::moved(pointer_id, pos, t));
                }
            }

            let end = start + press;
            if rng.random_bool(0.1) {
                events.push(PointerEvent::cancel(pointer_id, end));
            } else {
                events.push(PointerEvent::up(pointer_id, pos, end));
            }
        }

        events.sort_by_key(|e| e.time);
        events
    }

    pub fn run(settings: Settings, seed: u64) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut queue: EventQueue = scripted_session(&mut rng).into_iter().collect();
        log::info!("Scripted {} pointer events (seed {})", queue.len(), seed);

        let segments = settings.quality.gradient_segments();
        let mut scene = NeonRippleScene::new(settings, WIDTH, HEIGHT);
        let mut surface = RecordingSurface::new();
        let mut frame_loop = FrameLoop::new(FixedTicker::default());
        let mut stats = FrameStats::default();
        let mut peak_vertices = 0;

        for frame in 0..MAX_FRAMES {
            if frame_loop
                .tick(&mut scene, &mut queue, &mut surface, &mut stats)
                .is_none()
            {
                break;
            }
            let vertices = shapes::tessellate_all(&surface.commands, segments);
            peak_vertices = peak_vertices.max(vertices.len());
            if frame % 60 == 0 {
                log::info!(
                    "t={}ms {} particles:{} vertex bytes:{}",
                    scene.last_frame(),
                    scene.state_description(),
                    scene.store().particle_count(),
                    vertex::as_bytes(&vertices).len()
                );
            }
            if queue.is_empty() && !scene.needs_frame() {
                break;
            }
        }

        log::info!(
            "Done: {} frames, {} events, {} draw commands, peak {} ripples, peak {} vertices",
            stats.frames,
            stats.events,
            stats.draw_commands,
            stats.peak_ripples,
            peak_vertices
        );
        scene.teardown();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Ripple (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => neon_ripple::Settings::load_or_default(path),
        None => neon_ripple::Settings {
            particle_trails: true,
            ..Default::default()
        },
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);

    demo::run(settings, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
