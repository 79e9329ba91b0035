pub mod enums;
pub mod error_codes;
pub mod models;
pub mod timeframe;
pub mod traits;

pub use enums::*;
pub use error_codes::*;
pub use models::*;
pub use timeframe::*;
pub use traits::*;
