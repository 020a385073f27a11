use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use terrain_rider::camera::Camera;
use terrain_rider::input::InputEvent;
use terrain_rider::renderer;
use terrain_rider::scaler::FrameScaler;
use terrain_rider::terrain::load_heightmap;
use terrain_rider::{Control, Game, Hud, RuntimeConfig};

const INTERNAL_HEIGHT: usize = 240;
const FOV_X_DEG: f32 = 60.0;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    game: Game,

    // Internal low-res frame, upscaled on present
    fb_small: Vec<u32>,
    fb_w: usize,
    fb_h: usize,
    scaler: FrameScaler,

    // Fixed-step clock
    last_tick: Instant,
    lag: Duration,

    last_title: String,
}

impl App {
    fn new(game: Game) -> Self {
        Self {
            window: None,
            surface: None,
            game,
            fb_small: vec![0; 320 * INTERNAL_HEIGHT],
            fb_w: 320,
            fb_h: INTERNAL_HEIGHT,
            scaler: FrameScaler::new(0, 0, 320, INTERNAL_HEIGHT),
            last_tick: Instant::now(),
            lag: Duration::ZERO,
            last_title: String::new(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Terrain Rider")
            .with_inner_size(LogicalSize::new(800.0, 600.0));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Rc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        let surface = match surface {
            Ok(s) => s,
            Err(e) => {
                log::error!("failed to create drawing surface: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.rebuild_internal_fb(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        window.request_redraw();
        self.window = Some(window);
        self.last_tick = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                // Held keys repeat, same as discrete presses.
                if let Some(input) = InputEvent::from_key(code) {
                    if self.game.handle_input(input) == Control::Quit {
                        event_loop.exit();
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.advance();

                let size = match &self.window {
                    Some(w) if w.id() == id => w.inner_size(),
                    _ => return,
                };
                let (dw, dh) = (size.width as usize, size.height as usize);
                if self.scaler.target_size() != (dw, dh) {
                    self.rebuild_internal_fb(dw, dh);
                }

                let (window, surface) = match (&self.window, &mut self.surface) {
                    (Some(w), Some(s)) if w.id() == id => (w, s),
                    _ => return,
                };

                let (Some(nw), Some(nh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                else {
                    return; // Minimized window, skip drawing
                };
                if let Err(e) = surface.resize(nw, nh) {
                    log::error!("surface resize failed: {e}");
                    return;
                }

                let frame = self.game.frame();
                let mut camera = Camera::look_at(frame.eye, frame.target);
                camera.set_fov_from_horizontal(self.fb_w as f32, FOV_X_DEG);
                renderer::render_frame(&mut self.fb_small, self.fb_w, self.fb_h, &frame, &camera);

                let present = surface.buffer_mut().and_then(|mut buf| {
                    self.scaler.blit(&mut buf, &self.fb_small);
                    buf.present()
                });
                if let Err(e) = present {
                    log::error!("present failed: {e}");
                }

                let title = window_title(&frame.hud);
                if title != self.last_title {
                    window.set_title(&title);
                    self.last_title = title;
                }

                window.request_redraw();
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_internal_fb(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl App {
    /// Runs every tick that has come due since the last frame.
    fn advance(&mut self) {
        let now = Instant::now();
        // Cap so a stalled frame doesn't unleash a burst of ticks
        let dt = now.duration_since(self.last_tick).min(Duration::from_millis(100));
        self.last_tick = now;

        let period = self.game.config().tick_period;
        self.lag += dt;
        while self.lag >= period {
            self.game.tick();
            self.lag -= period;
        }
    }

    fn rebuild_internal_fb(&mut self, dst_w: usize, dst_h: usize) {
        let aspect = if dst_h > 0 {
            dst_w as f32 / dst_h as f32
        } else {
            1.0
        };
        let target_w = ((INTERNAL_HEIGHT as f32 * aspect).round() as usize).max(160);

        if target_w != self.fb_w {
            self.fb_w = target_w;
            self.fb_small = vec![0u32; self.fb_w * self.fb_h];
        }
        self.scaler = FrameScaler::new(dst_w, dst_h, self.fb_w, self.fb_h);
    }
}

fn window_title(hud: &Hud) -> String {
    let mut title = format!(
        "Terrain Rider | Score: {} | Time: {}{}",
        hud.score,
        hud.time_remaining,
        if hud.time_low && !hud.game_over { " (!)" } else { "" }
    );
    if let Some(banner) = hud.banner {
        title.push_str(" | ");
        title.push_str(banner);
    }
    title
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let runtime = RuntimeConfig::from_env();
    let terrain = load_heightmap(&runtime.heightmap, runtime.terrain_scale)?;
    let seed = runtime.seed.unwrap_or_else(rand::random);
    log::info!("collectible seed {seed}");

    let game = Game::new(terrain, runtime.game_config(), seed);

    let event_loop = EventLoop::new()?;
    // Continuous redraws drive the fixed-step clock.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(game);
    event_loop.run_app(&mut app)?;
    Ok(())
}
