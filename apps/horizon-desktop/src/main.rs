use anyhow::Result;
use clap::Parser;
use glam::Vec3;
use horizon_config::SceneConfig;
use horizon_kernel::FrameSupplier;
use horizon_render_wgpu::{FlyCamera, SkyRenderer};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "horizon-desktop", about = "Horizon sky viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene file to start from (.json, .yaml, .yml)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Far render distance used by the grid fade
    #[arg(long)]
    view_distance: Option<f32>,
}

/// Application state.
struct AppState {
    camera: FlyCamera,
    frames: FrameSupplier,
    player_origin: Vec3,
    view_distance: f32,
    // Input state
    keys_held: HashSet<KeyCode>,
    mouse_captured: bool,
    started: Instant,
    last_frame: Instant,
}

impl AppState {
    fn new(scene: &SceneConfig) -> Self {
        let cam = &scene.camera;
        let forward = (cam.target - cam.eye).normalize();
        let camera = FlyCamera {
            position: cam.eye,
            yaw: forward.z.atan2(forward.x),
            pitch: forward.y.asin(),
            fov: cam.fov_degrees.to_radians(),
            aspect: cam.aspect,
            near: cam.near,
            far: cam.far,
            ..FlyCamera::default()
        };

        let now = Instant::now();
        Self {
            camera,
            frames: FrameSupplier::new(),
            player_origin: scene.player_origin,
            view_distance: scene.view_distance,
            keys_held: HashSet::new(),
            mouse_captured: false,
            started: now,
            last_frame: now,
        }
    }

    fn update(&mut self, dt: f32) {
        let speed_mult = if self.keys_held.contains(&KeyCode::ShiftLeft) {
            3.0
        } else {
            1.0
        };
        let dt_scaled = dt * speed_mult;

        if self.keys_held.contains(&KeyCode::KeyW) {
            self.camera.move_forward(dt_scaled);
        }
        if self.keys_held.contains(&KeyCode::KeyS) {
            self.camera.move_backward(dt_scaled);
        }
        if self.keys_held.contains(&KeyCode::KeyA) {
            self.camera.move_left(dt_scaled);
        }
        if self.keys_held.contains(&KeyCode::KeyD) {
            self.camera.move_right(dt_scaled);
        }
        if self.keys_held.contains(&KeyCode::Space) {
            self.camera.move_up(dt_scaled);
        }
        if self.keys_held.contains(&KeyCode::ControlLeft) {
            self.camera.move_down(dt_scaled);
        }

        // The player walks the floor under the camera.
        self.player_origin = Vec3::new(self.camera.position.x, 0.0, self.camera.position.z);
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }

        if !pressed {
            return;
        }

        match key {
            KeyCode::Equal => {
                self.view_distance *= 1.25;
                tracing::info!(view_distance = self.view_distance, "view distance");
            }
            KeyCode::Minus => {
                self.view_distance = (self.view_distance / 1.25).max(10.0);
                tracing::info!(view_distance = self.view_distance, "view distance");
            }
            KeyCode::KeyR => {
                let p = self.camera.position;
                tracing::info!(
                    frame = self.frames.frame_count(),
                    "camera at ({:.1}, {:.1}, {:.1})",
                    p.x,
                    p.y,
                    p.z
                );
            }
            _ => {}
        }
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<SkyRenderer>,
}

impl GpuApp {
    fn new(scene: &SceneConfig) -> Self {
        Self {
            state: AppState::new(scene),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
        self.state.last_frame = now;
        self.state.update(dt);

        let (Some(surface), Some(device), Some(queue)) = (&self.surface, &self.device, &self.queue)
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

        let time = (now - self.state.started).as_secs_f32();
        let state = self.state.camera.frame_state(
            self.state.player_origin,
            self.state.view_distance,
            time,
        );
        let frame = self.state.frames.begin_frame(state);

        if let Some(renderer) = &self.renderer {
            renderer.render(device, queue, &view, frame.state());
        }

        output.present();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Horizon")
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
                label: Some("horizon_device"),
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

        let renderer = SkyRenderer::new(&device, surface_format, size.width, size.height);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);

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
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!(frames = self.state.frames.frame_count(), "closing");
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
                if key == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: btn_state,
                ..
            } => {
                self.state.mouse_captured = btn_state == ElementState::Pressed;
                if let Some(window) = &self.window {
                    window.set_cursor_visible(!self.state.mouse_captured);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.mouse_captured {
                self.state.camera.rotate(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("horizon-desktop starting");

    let mut scene = match &cli.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(view_distance) = cli.view_distance {
        scene.view_distance = view_distance;
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&scene);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_starts_looking_at_scene_target() {
        let scene = SceneConfig::default();
        let state = AppState::new(&scene);
        let expected = (scene.camera.target - scene.camera.eye).normalize();
        assert!(state.camera.forward().abs_diff_eq(expected, 1e-5));
        assert_eq!(state.camera.position, scene.camera.eye);
    }

    #[test]
    fn view_distance_keys_scale_and_clamp() {
        let mut state = AppState::new(&SceneConfig::default());
        state.handle_key(KeyCode::Equal, true);
        assert_eq!(state.view_distance, 1250.0);
        for _ in 0..100 {
            state.handle_key(KeyCode::Minus, true);
        }
        assert_eq!(state.view_distance, 10.0);
    }

    #[test]
    fn player_follows_camera_on_floor() {
        let mut state = AppState::new(&SceneConfig::default());
        state.handle_key(KeyCode::KeyW, true);
        state.update(1.0);
        assert_eq!(state.player_origin.y, 0.0);
        assert_eq!(state.player_origin.x, state.camera.position.x);
        assert_eq!(state.player_origin.z, state.camera.position.z);
    }
}
