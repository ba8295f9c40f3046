mod controls;
mod detector;
mod gpu;

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

use controls::{command_for_key, Command};
use detector::{CursorHand, CursorState, SharedCursor};
use gpu::GpuState;
use nebula_core::{
    Color, ParticleEngine, Shape, VisualConfig, Visualizer, DEFAULT_DIFFUSION,
    DEFAULT_PARTICLE_DENSITY, MAX_PARTICLES,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "nebula", version, about = "Gesture-reactive 3D particle nebula")]
struct Args {
    /// Fraction of particles drawn, 0..1
    #[arg(long, default_value_t = DEFAULT_PARTICLE_DENSITY)]
    density: f32,

    /// Slider diffusion, 0..1
    #[arg(long, default_value_t = DEFAULT_DIFFUSION)]
    diffusion: f32,

    /// Particle color as #rrggbb
    #[arg(long, default_value_t = Color::default())]
    color: Color,

    /// Target shape: nebula or heart
    #[arg(long, default_value_t = Shape::default())]
    shape: Shape,

    /// Start with the simulated camera enabled
    #[arg(long, default_value_t = false)]
    camera: bool,

    #[arg(long, default_value_t = MAX_PARTICLES)]
    particles: usize,

    /// Seed for repeatable shapes
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn visual_config(&self) -> VisualConfig {
        VisualConfig::default()
            .with_density(self.density)
            .with_diffusion(self.diffusion)
            .with_color(self.color)
            .with_shape(self.shape)
    }
}

fn window_title(vis: &Visualizer) -> String {
    let ui = vis.ui_config();
    let effective = vis.effective_config();
    format!(
        "Nebula | {} {} | density {:.2} | diffusion {:.2}{}",
        ui.shape,
        ui.particle_color,
        ui.particle_density,
        effective.diffusion,
        if vis.gesture().enabled { " | camera" } else { "" }
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    log::info!("[main] starting with {:?}", args);

    let engine = match args.seed {
        Some(seed) => ParticleEngine::with_seed(args.particles, seed),
        None => ParticleEngine::new(args.particles),
    }
    .context("particle engine")?;
    let mut visualizer = Visualizer::with_engine(engine, args.visual_config())?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Nebula")
        .build(&event_loop)
        .context("window")?;

    let cursor = SharedCursor::new(std::cell::Cell::new(CursorState {
        position: None,
        window_height: window.inner_size().height as f32,
    }));
    visualizer.attach_gesture_source(CursorHand::new(cursor.clone()));
    visualizer.set_camera_enabled(args.camera)?;
    window.set_title(&window_title(&visualizer));

    let mut gpu = pollster::block_on(GpuState::new(&window, &visualizer.frame()))?;
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                gpu.resize(size);
                cursor.set(CursorState {
                    window_height: size.height as f32,
                    ..cursor.get()
                });
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let Some(command) = command_for_key(&event.logical_key, visualizer.ui_config())
                else {
                    return;
                };
                log::debug!("[input] {:?}", command);
                let result = match command {
                    Command::Quit => {
                        elwt.exit();
                        Ok(())
                    }
                    Command::ToggleCamera => {
                        let enabled = !visualizer.gesture().enabled;
                        visualizer.set_camera_enabled(enabled)
                    }
                    Command::Edit(ui) => visualizer.set_ui_config(ui),
                };
                if let Err(err) = result {
                    log::warn!("[input] {err}");
                }
                gpu.window.set_title(&window_title(&visualizer));
            }
            WindowEvent::CursorMoved { position, .. } => cursor.set(CursorState {
                position: Some([position.x as f32, position.y as f32]),
                ..cursor.get()
            }),
            WindowEvent::CursorLeft { .. } => cursor.set(CursorState {
                position: None,
                ..cursor.get()
            }),
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = now - last_frame;
            last_frame = now;
            let frame = visualizer.tick(dt);
            match gpu.render(&frame) {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory");
                    elwt.exit();
                }
                Err(err) => log::debug!("[gpu] skipped frame: {err:?}"),
            }
        }
        Event::LoopExiting => visualizer.dispose(),
        _ => {}
    })?;
    Ok(())
}
