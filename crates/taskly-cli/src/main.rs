use taskly_cli::{logging, Cli, Parser};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = cli.run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
