use nebula_core::{Color, Shape, VisualConfig};
use winit::keyboard::{Key, NamedKey};

const SLIDER_STEP: f32 = 0.05;

pub const COLOR_PRESETS: [Color; 4] = [
    Color::rgb(0x00, 0xff, 0xff), // cyan
    Color::rgb(0xff, 0x00, 0xff), // magenta
    Color::rgb(0xff, 0xd7, 0x00), // gold
    Color::rgb(0xff, 0xff, 0xff), // white
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Edit(VisualConfig),
    ToggleCamera,
    Quit,
}

/// Map a key press onto an edit of the current UI snapshot.
pub fn command_for_key(key: &Key, ui: &VisualConfig) -> Option<Command> {
    let ui = *ui;
    match key {
        Key::Named(NamedKey::Escape) => Some(Command::Quit),
        Key::Named(NamedKey::ArrowUp) => Some(Command::Edit(
            ui.with_density(nudge(ui.particle_density, SLIDER_STEP)),
        )),
        Key::Named(NamedKey::ArrowDown) => Some(Command::Edit(
            ui.with_density(nudge(ui.particle_density, -SLIDER_STEP)),
        )),
        Key::Named(NamedKey::ArrowRight) => Some(Command::Edit(
            ui.with_diffusion(nudge(ui.diffusion, SLIDER_STEP)),
        )),
        Key::Named(NamedKey::ArrowLeft) => Some(Command::Edit(
            ui.with_diffusion(nudge(ui.diffusion, -SLIDER_STEP)),
        )),
        Key::Character(c) => match c.as_str() {
            "n" | "N" => Some(Command::Edit(ui.with_shape(Shape::Nebula))),
            "h" | "H" => Some(Command::Edit(ui.with_shape(Shape::Heart))),
            "c" | "C" => Some(Command::ToggleCamera),
            digit => color_preset_for_digit(digit).map(|c| Command::Edit(ui.with_color(c))),
        },
        _ => None,
    }
}

#[inline]
fn color_preset_for_digit(key: &str) -> Option<Color> {
    let index = key.parse::<usize>().ok()?.checked_sub(1)?;
    COLOR_PRESETS.get(index).copied()
}

// Slider semantics: stays in [0, 1], snapped to the step grid.
#[inline]
fn nudge(value: f32, delta: f32) -> f32 {
    let snapped = ((value + delta) / SLIDER_STEP).round() * SLIDER_STEP;
    snapped.clamp(0.0, 1.0)
}
