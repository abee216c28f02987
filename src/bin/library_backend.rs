use lender_backend::{config::ServiceKind, server};

/// Students and books API, plus the built frontend
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    server::run(ServiceKind::Library).await
}
