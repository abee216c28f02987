use lender_backend::{config::ServiceKind, server};

/// Dashboard summary and loans API
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    server::run(ServiceKind::Dashboard).await
}
