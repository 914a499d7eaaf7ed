//! Terminal implementation of the display surface
//!
//! Used by the demo binary: mutations update an in-memory card which can be
//! printed once the engine settles.

use std::sync::Mutex;

use crate::display::surface::{BannerKind, DisplaySurface};

#[derive(Default)]
struct CardState {
    busy: bool,
    phase_name: String,
    countdown: String,
    rituals: Vec<String>,
    image: String,
    banner: Option<(BannerKind, String)>,
}

#[derive(Default)]
pub struct TerminalSurface {
    state: Mutex<CardState>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the lunar card in its current state.
    pub fn print_card(&self) {
        let state = self.state.lock().unwrap();
        println!("\n=== ЛУННЫЙ КАЛЕНДАРЬ ===");
        if state.busy {
            println!("(загрузка...)");
        }
        if let Some((kind, message)) = &state.banner {
            let marker = match kind {
                BannerKind::Info => "[i]",
                BannerKind::Warning => "[!]",
            };
            println!("{} {}", marker, message);
        }
        println!("Фаза:        {}", state.phase_name);
        println!("До смены:    {}", state.countdown);
        println!("Изображение: {}", state.image);
        for ritual in &state.rituals {
            println!("  - {}", ritual);
        }
        println!();
    }
}

impl DisplaySurface for TerminalSurface {
    fn set_busy(&self, busy: bool) {
        self.state.lock().unwrap().busy = busy;
    }

    fn set_phase_name(&self, name: &str) {
        self.state.lock().unwrap().phase_name = name.to_string();
    }

    fn set_countdown(&self, text: &str) {
        self.state.lock().unwrap().countdown = text.to_string();
    }

    fn set_rituals(&self, items: &[&str]) {
        self.state.lock().unwrap().rituals = items.iter().map(|s| s.to_string()).collect();
    }

    fn set_image(&self, path: &str) {
        self.state.lock().unwrap().image = path.to_string();
    }

    fn show_banner(&self, kind: BannerKind, message: &str) {
        self.state.lock().unwrap().banner = Some((kind, message.to_string()));
    }

    fn clear_banner(&self) {
        self.state.lock().unwrap().banner = None;
    }
}
