// Keyboard and mouse input
//
// winit events go through `InputConfig` to become `Action`s, `PlayerInput`
// tracks them per frame, and `InputManager::controls` hands the result to
// the simulation as a `ControlState`. Call `InputManager::update` once a
// frame has been simulated so edges are not reported twice.

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

pub use action::{Action, InputSource};
pub use config::InputConfig;
pub use manager::InputManager;
pub use player::PlayerInput;
