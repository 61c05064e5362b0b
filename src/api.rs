pub mod interface;
pub mod server;

pub use interface::{BaseAPI, DynAPI, PatrolAPI, ZoneAPI, API};
pub use server::serve;
