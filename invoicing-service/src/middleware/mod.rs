pub mod session;

pub use session::{require_session, LOGIN_PATH, USER_KEY};
