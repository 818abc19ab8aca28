//! Player application implementing winit ApplicationHandler
//!
//! Maps window events onto loop events and runs one dispatch pass per
//! redraw. While paused the event loop parks in `ControlFlow::Wait`, so
//! nothing busy-polls until the resume (or quit) event arrives.

use crate::config::PlayerConfig;
use crate::game::ParticleGame;
use cinder_core::{Color, Vec2};
use cinder_particles::{EmitterConfig, ParticleSystem};
use cinder_render::{ParticleInstanceGpu, ParticleRenderer, RenderContext};
use cinder_runtime::{
    Clock, EventOutcome, GameLoop, LoopConfig, LoopEvent, LoopPhase, Subdivisions, SystemClock,
};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const CLEAR_COLOR: Color = Color::new(0.05, 0.05, 0.05, 1.0);

pub struct PlayerApp {
    game_loop: GameLoop,
    clock: SystemClock,
    game: ParticleGame,

    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    renderer: Option<ParticleRenderer>,
    instances: Vec<ParticleInstanceGpu>,
    window_size: PhysicalSize<u32>,
}

impl PlayerApp {
    pub fn new(config: PlayerConfig) -> Self {
        let loop_config = LoopConfig::new(config.updates_per_second)
            .with_subdivisions(Subdivisions::from_count(config.subdivision_count))
            .with_max_frame_skip(config.max_frame_skip)
            .with_pause_key(KeyCode::Space);

        let emitter = EmitterConfig {
            count: config.particle_count,
            origin: Vec2::new(config.window_width as f32 / 2.0, 50.0),
            bounds: Vec2::new(config.window_width as f32, config.window_height as f32),
            ..Default::default()
        };
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as u32)
            .unwrap_or(1);

        Self {
            game_loop: GameLoop::new(loop_config),
            clock: SystemClock::new(),
            game: ParticleGame::new(ParticleSystem::new(emitter, seed)),
            window: None,
            render_context: None,
            renderer: None,
            instances: Vec::new(),
            window_size: PhysicalSize::new(config.window_width, config.window_height),
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) {
        let window_attrs = Window::default_attributes()
            .with_title("Cinder Particles")
            .with_inner_size(self.window_size);

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );
        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window))
            .expect("Failed to create render context");
        self.renderer = Some(ParticleRenderer::new(&render_context));
        self.render_context = Some(render_context);

        self.game_loop.start(self.clock.now_ms());
    }

    /// Map a window event onto a loop event, if it concerns the loop.
    fn map_event(event: &WindowEvent) -> Option<LoopEvent> {
        match event {
            WindowEvent::CloseRequested => Some(LoopEvent::Quit),
            WindowEvent::Focused(false) => Some(LoopEvent::FocusLost),
            WindowEvent::Focused(true) => Some(LoopEvent::FocusGained),
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key_code) = event.physical_key else {
                    return None;
                };
                if event.repeat {
                    return None;
                }
                match event.state {
                    ElementState::Pressed if key_code == KeyCode::Escape => Some(LoopEvent::Quit),
                    ElementState::Pressed => Some(LoopEvent::KeyPressed(key_code)),
                    ElementState::Released => Some(LoopEvent::KeyReleased(key_code)),
                }
            }
            _ => None,
        }
    }

    fn handle_loop_event(&mut self, event: LoopEvent, event_loop: &ActiveEventLoop) {
        // A paused loop only listens for its resume event or a quit.
        if self.game_loop.phase() == LoopPhase::Paused {
            if self.game_loop.offer_resume(&event, self.clock.now_ms()) {
                event_loop.set_control_flow(ControlFlow::Poll);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            } else if self.game_loop.phase() == LoopPhase::Terminated {
                event_loop.exit();
            }
            return;
        }

        match self.game_loop.dispatch_event(&event, &mut self.game) {
            Ok(EventOutcome::Continue) => {}
            Ok(EventOutcome::Paused) => {
                event_loop.set_control_flow(ControlFlow::Wait);
            }
            Ok(EventOutcome::Terminated) => {
                event_loop.exit();
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                event_loop.exit();
            }
        }
    }

    /// One running pass: accumulate fixed updates, partition a render,
    /// and draw if one fell due.
    fn dispatch_pass(&mut self, event_loop: &ActiveEventLoop) {
        if self.game_loop.phase() != LoopPhase::Running {
            return;
        }

        let now = self.clock.now_ms();
        if let Err(e) = self.game_loop.advance(now, &mut self.game) {
            eprintln!("Loop error: {e}");
            event_loop.exit();
            return;
        }

        if self.game.take_render_request() {
            self.draw_frame();
        }
    }

    fn draw_frame(&mut self) {
        let Some(context) = &self.render_context else {
            return;
        };
        let Some(renderer) = &mut self.renderer else {
            return;
        };

        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                return;
            }
            Err(e) => {
                eprintln!("Surface error: {:?}", e);
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let emitter = self.game.particles().config();
        let radius_span = (emitter.max_radius - emitter.min_radius).max(f32::EPSILON);
        let min_radius = emitter.min_radius;

        self.instances.clear();
        for particle in self.game.particles().particles() {
            let ratio = ((particle.radius - min_radius) / radius_span).clamp(0.0, 1.0);
            self.instances.push(ParticleInstanceGpu::new(
                particle.display_position.to_array(),
                particle.radius,
                ember_color(ratio).to_array(),
            ));
        }

        renderer.render(context, &view, &self.instances, CLEAR_COLOR);
        output.present();
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.initialize(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(*new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.dispatch_pass(event_loop);
                return;
            }
            _ => {}
        }

        if let Some(loop_event) = Self::map_event(&event) {
            self.handle_loop_event(loop_event, event_loop);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.game_loop.phase() == LoopPhase::Running {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

/// Small particles glow hot, large ones run cooler.
fn ember_color(radius_ratio: f32) -> Color {
    let hot = Color::from_hex(0xFFD27D);
    let cool = Color::from_hex(0xE2572B);
    Color::new(
        hot.r + (cool.r - hot.r) * radius_ratio,
        hot.g + (cool.g - hot.g) * radius_ratio,
        hot.b + (cool.b - hot.b) * radius_ratio,
        1.0,
    )
}
