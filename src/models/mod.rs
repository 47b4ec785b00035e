pub mod alert;
pub mod calendar;
pub mod crop;
pub mod recommendation;
pub mod season;
pub mod snapshot;

pub use alert::*;
pub use calendar::*;
pub use crop::*;
pub use recommendation::*;
pub use season::*;
pub use snapshot::*;
