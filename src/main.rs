#[tokio::main]
async fn main() {
    if let Err(e) = reservation_backend::run().await {
        eprintln!("reservation-backend failed to start: {}", e);
        std::process::exit(1);
    }
}
