mod kb;

pub use kb::KbCommands;
