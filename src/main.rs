fn main() {
    if let Err(e) = dash_wire::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
