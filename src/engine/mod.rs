// Engine modules: fixed-tick loop and input

pub mod game_loop;
pub mod input;
