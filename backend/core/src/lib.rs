pub mod error;
pub mod printf;
pub mod traits;
pub mod types;
pub mod value;

pub use error::{LogError, Result};
pub use printf::sprintf;
pub use traits::{CallSite, CallerResolver, ConsoleWriter};
pub use types::{ParseSeverityError, Persistence, Severity};
pub use value::LogValue;
