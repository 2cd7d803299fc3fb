pub mod cookie;
pub mod directory;
pub mod password;
pub mod session;

pub use directory::{SharedDirectory, UserDirectory};
pub use session::{Claims, SessionService};
