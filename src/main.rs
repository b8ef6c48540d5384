use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod config;
mod core;
mod engine;
mod game;

use config::GameConfig;
use engine::game_loop::{GameLoop, TICKS_PER_SECOND};
use engine::input::{Action, InputManager};
use game::characters::{Actor, ControlState};
use game::GameSession;

/// Top-down room-crawling brawler
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// INI file overriding the default tuning
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run this many ticks without a window and print a summary
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };

    info!("Starting Tile Brawler...");

    match args.headless {
        Some(ticks) => run_headless(&config, ticks),
        None => run_windowed(&config),
    }
}

/// Idle the player for `ticks` ticks and report what happened
fn run_headless(config: &GameConfig, ticks: u64) -> Result<()> {
    let mut session = GameSession::demo(config);

    for _ in 0..ticks {
        if let Some(room) = session.tick(ControlState::default()) {
            info!("Tick {}: entered {}", session.tick_count(), room);
        }
        if session.is_game_over() {
            info!("Player died after {} ticks", session.tick_count());
            break;
        }
    }

    let manager = session.manager();
    let health = manager.player().map_or(0, |p| p.entity().health());
    info!(
        "Ran {} ticks ({:.1}s): {}, player health {}, {} of {} enemies alive",
        session.tick_count(),
        session.tick_count() as f32 / TICKS_PER_SECOND as f32,
        manager.current_room(),
        health,
        manager.alive_enemy_count(),
        manager.enemy_count()
    );

    Ok(())
}

fn run_windowed(config: &GameConfig) -> Result<()> {
    let (width, height) = config.window_size();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Tile Brawler")
        .with_inner_size(winit::dpi::LogicalSize::new(width, height))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut session = GameSession::demo(config);
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut title = String::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => {
                input.process_mouse_event(button, state);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Keys released while unfocused never reach us
                input.reset();
            }
            Event::AboutToWait => {
                let toggled = input.just_pressed(Action::Pause);
                if toggled {
                    game_loop.toggle_pause();
                }

                let ticks = game_loop.begin_frame();
                if ticks > 0 {
                    let mut controls = input.controls();
                    for _ in 0..ticks {
                        session.tick(controls);
                        // One press is one swing, not one per catch-up tick
                        controls.attack = false;
                    }
                }
                // Keep unconsumed presses for the next frame that ticks
                if ticks > 0 || toggled || game_loop.is_paused() {
                    input.update();
                }

                let next = status_line(&session, game_loop.is_paused());
                if next != title {
                    window.set_title(&next);
                    title = next;
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

fn status_line(session: &GameSession, paused: bool) -> String {
    let manager = session.manager();
    let health = manager.player().map_or(0, |p| p.entity().health());

    if session.is_game_over() {
        return "Tile Brawler - game over".to_string();
    }
    format!(
        "Tile Brawler - {} - HP {} - enemies {}{}",
        manager.current_room(),
        health,
        manager.alive_enemy_count(),
        if paused { " - paused" } else { "" }
    )
}
