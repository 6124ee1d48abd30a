use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use starlane_camera::{FlyCamera, apply_input};
use starlane_input::{InputState, Key};
use starlane_nav::SceneNavigator;
use starlane_pick::{Hover, cast_screen, resolve_hover};
use starlane_render_wgpu::WgpuRenderer;
use starlane_scene::{SceneSet, StarChart, factory};
use starlane_tools::SceneInspector;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "starlane-desktop", about = "Interactive star cluster viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Star chart JSON file (defaults to the built-in cluster)
    #[arg(long)]
    chart: Option<String>,
}

/// Pixel tolerance separating a click from a look-drag.
const CLICK_SLOP_PX: f32 = 4.0;

/// Application state.
struct AppState {
    scenes: SceneSet,
    nav: SceneNavigator,
    input: InputState,
    camera: FlyCamera,
    hover: Option<Hover>,
    show_hud: bool,
    viewport: Vec2,
    press_px: Option<Vec2>,
    last_frame: Instant,
}

impl AppState {
    fn new(chart: &StarChart) -> Self {
        let scenes = factory::universe(chart);
        let nav = SceneNavigator::new(scenes.outer());
        Self {
            scenes,
            nav,
            input: InputState::new(),
            camera: FlyCamera::default(),
            hover: None,
            show_hud: true,
            viewport: Vec2::new(1280.0, 720.0),
            press_px: None,
            last_frame: Instant::now(),
        }
    }

    /// Per-frame update: camera motion, then hover resolution against the
    /// active scene.
    fn update(&mut self, dt: f32) {
        apply_input(&mut self.camera, &mut self.input, dt);

        let active = self.nav.active();
        let ndc = self.input.mouse_ndc();
        let hits = self
            .scenes
            .get(active)
            .map(|scene| cast_screen(scene, &self.camera, ndc))
            .unwrap_or_default();
        self.hover = self
            .scenes
            .get_mut(active)
            .and_then(|scene| resolve_hover(scene, &hits));
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        let Some(key) = map_key(code) else {
            return;
        };
        self.input.on_key(key, pressed);

        if pressed && key == Key::LeaveScene {
            self.leave_scene();
        }
    }

    fn handle_button(&mut self, pressed: bool) {
        if pressed {
            self.press_px = Some(self.input.mouse_px());
            self.input.on_button(true);
        } else {
            self.input.on_button(false);
            let was_click = self
                .press_px
                .take()
                .is_some_and(|p| (self.input.mouse_px() - p).length() <= CLICK_SLOP_PX);
            if was_click {
                self.handle_click();
            }
        }
    }

    /// A click re-casts the pick ray independently of the per-frame hover
    /// and enters the nearest hit's inner scene, if one is registered.
    fn handle_click(&mut self) {
        let active = self.nav.active();
        let Some(scene) = self.scenes.get(active) else {
            return;
        };
        let hits = cast_screen(scene, &self.camera, self.input.mouse_ndc());
        let Some(nearest) = hits.first() else {
            return;
        };
        let node = nearest.node;
        if self.nav.enter_portal(&self.scenes, node) {
            // Hide the label and drop the tint in the scene being left.
            self.hover = None;
            if let Some(left) = self.scenes.get_mut(active) {
                left.clear_hover();
            }
        }
    }

    fn leave_scene(&mut self) {
        if self.nav.back() {
            self.hover = None;
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if let Some(hover) = &self.hover {
            if let Some(label) = &hover.label {
                let pos = self.input.mouse_px() / ctx.pixels_per_point();
                egui::Area::new(egui::Id::new("hover_label"))
                    .fixed_pos(egui::pos2(pos.x + 12.0, pos.y + 12.0))
                    .interactable(false)
                    .show(ctx, |ui| {
                        egui::Frame::popup(ui.style()).show(ui, |ui| {
                            ui.label(label);
                        });
                    });
            }
        }

        if !self.show_hud {
            return;
        }

        let summary = SceneInspector::summary(&self.scenes, &self.nav);
        egui::SidePanel::left("hud")
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Starlane");
                ui.separator();
                ui.label(format!("Scene: {}", summary.active_scene));
                if let Some(scene) = self.scenes.get(self.nav.active()) {
                    let info = SceneInspector::describe(scene);
                    ui.label(format!(
                        "{} nodes ({} interactive), {} lights",
                        info.nodes, info.interactive, info.lights
                    ));
                }
                ui.label(format!(
                    "Camera: ({:.1}, {:.1}, {:.1})",
                    self.camera.position.x, self.camera.position.y, self.camera.position.z
                ));
                if let Some(label) = &summary.hovered_label {
                    ui.label(format!("Hovering: {label}"));
                }
                ui.separator();
                if !self.nav.at_outer() && ui.button("Back to cluster (Esc)").clicked() {
                    self.leave_scene();
                }
                ui.small("WASD: move | Q/E: up/down");
                ui.small("Drag: look | Arrows: turn");
                ui.small("Click a star to enter | F1: HUD");
            });
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyW => Key::MoveForward,
        KeyCode::KeyS => Key::MoveBack,
        KeyCode::KeyA => Key::StrafeLeft,
        KeyCode::KeyD => Key::StrafeRight,
        KeyCode::KeyQ => Key::Ascend,
        KeyCode::KeyE => Key::Descend,
        KeyCode::ArrowLeft => Key::YawLeft,
        KeyCode::ArrowRight => Key::YawRight,
        KeyCode::ArrowUp => Key::PitchUp,
        KeyCode::ArrowDown => Key::PitchDown,
        KeyCode::Escape => Key::LeaveScene,
        _ => return None,
    })
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(chart: &StarChart) -> Self {
        Self {
            state: AppState::new(chart),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Starlane")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("starlane_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.camera.aspect = size.width as f32 / size.height.max(1) as f32;
        self.state.viewport = Vec2::new(size.width as f32, size.height as f32);

        let renderer = WgpuRenderer::new(&device, surface_format, size.width, size.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.camera.aspect = config.width as f32 / config.height.max(1) as f32;
                    self.state.viewport = Vec2::new(config.width as f32, config.height as f32);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::F1 && key_state == ElementState::Pressed {
                    self.state.show_hud = !self.state.show_hud;
                    return;
                }
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.input.on_pointer_move(
                    Vec2::new(position.x as f32, position.y as f32),
                    self.state.viewport,
                );
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state.handle_button(btn_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &mut self.renderer {
                    if let Some(scene) = self.state.scenes.get(self.state.nav.active()) {
                        renderer.render(device, queue, &view, scene, &self.state.camera);
                    }
                }

                let config = self.config.as_ref().unwrap();
                render_overlay(
                    device,
                    queue,
                    &view,
                    self.window.as_ref().unwrap(),
                    &self.egui_ctx,
                    self.egui_winit.as_mut().unwrap(),
                    self.egui_renderer.as_mut().unwrap(),
                    [config.width, config.height],
                    &mut self.state,
                );

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run the egui frame and composite it over the rendered scene.
#[allow(clippy::too_many_arguments)]
fn render_overlay(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    view: &wgpu::TextureView,
    window: &Window,
    egui_ctx: &EguiContext,
    egui_winit: &mut egui_winit::State,
    egui_renderer: &mut egui_wgpu::Renderer,
    size_in_pixels: [u32; 2],
    state: &mut AppState,
) {
    let raw_input = egui_winit.take_egui_input(window);
    let full_output = egui_ctx.run(raw_input, |ctx| {
        state.draw_ui(ctx);
    });
    egui_winit.handle_platform_output(window, full_output.platform_output);

    let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
    let screen_descriptor = egui_wgpu::ScreenDescriptor {
        size_in_pixels,
        pixels_per_point: full_output.pixels_per_point,
    };

    for (id, image_delta) in &full_output.textures_delta.set {
        egui_renderer.update_texture(device, queue, *id, image_delta);
    }
    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("egui_encoder"),
    });
    egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
    {
        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            })
            .forget_lifetime();
        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
    }
    queue.submit(std::iter::once(encoder.finish()));
    for id in &full_output.textures_delta.free {
        egui_renderer.free_texture(id);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("starlane-desktop starting");

    let chart = match &cli.chart {
        Some(path) => StarChart::load(path)?,
        None => StarChart::default(),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&chart);
    event_loop.run_app(&mut app)?;

    Ok(())
}
