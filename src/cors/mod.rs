pub mod origin;

pub use origin::{strip_scheme, AllowList, OriginRejected, ORIGIN_ENV_KEYS};
