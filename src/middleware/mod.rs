pub mod cors;
pub mod error;
pub mod request_id;

pub use cors::{CorsState, cors_layer, origin_gate};
pub use error::{error_handling_middleware, panic_response, route_not_found};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
