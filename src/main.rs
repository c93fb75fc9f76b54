mod app;
mod tui;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tui::run()
}
