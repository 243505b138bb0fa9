pub mod clock;
pub mod digest;
pub mod progress;
pub mod scanner;

pub use clock::{Clock, FixedClock, SystemClock, to_iso8601};
pub use digest::ContentDigester;
pub use progress::{NoopReporter, ProgressReporter};
pub use scanner::{FileScanner, ScanError};
