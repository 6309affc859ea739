pub mod process;
pub mod project;
pub mod serve;
pub mod simulate;

pub use process::process;
pub use project::project;
pub use serve::serve;
pub use simulate::{StrategyChoice, simulate};
