use docker_tag_exists::cli::{Args, Runner};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args().from_env();
    let runner = Runner::new(args);

    // Both "exist" and "noexist" are successful checks and exit 0; only
    // argument, transport, and auth errors exit 1.
    if let Err(e) = runner.run().await {
        println!("{e}");
        process::exit(1);
    }
}
