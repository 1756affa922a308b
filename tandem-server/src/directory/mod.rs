mod directory;

pub use directory::{Departure, Directory, JoinError, ROOM_CAPACITY};
