mod departure;
mod mode;
mod route;
mod stop;

pub use departure::*;
pub use mode::*;
pub use route::*;
pub use stop::*;
