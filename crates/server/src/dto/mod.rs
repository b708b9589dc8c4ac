mod departure;
mod route;
mod stop;

pub use departure::*;
pub use route::*;
pub use stop::*;
