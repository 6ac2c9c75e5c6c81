pub mod data;
pub mod radix;
pub mod transit;

pub use data::{AngularPoint, BodyPosition, NatalChart, TransitResult};
pub use radix::ChartComputer;
pub use transit::TransitComputer;
