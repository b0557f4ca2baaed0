pub mod defaults;
pub mod definition;

pub use defaults::*;
pub use definition::*;
