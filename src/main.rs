#[tokio::main]
async fn main() {
    if let Err(error) = moodboard::app::run().await {
        eprintln!("fatal: {error}");
        std::process::exit(1);
    }
}
