pub mod integrator;
pub mod series;
pub mod steady_state;
pub mod summary;

pub use integrator::*;
pub use series::*;
pub use steady_state::*;
pub use summary::*;
