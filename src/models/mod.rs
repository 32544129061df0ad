pub mod call;
pub mod contact;
pub mod settings;

pub use call::*;
pub use contact::*;
pub use settings::*;
