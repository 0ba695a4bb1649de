use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = apiforge::cli::run_cli() {
        eprintln!("API generation failed because: {e}");
        std::process::exit(1);
    }
}
