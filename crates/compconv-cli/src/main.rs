mod cli;
mod config;
mod logging;

fn main() {
    std::process::exit(cli::run_from_env());
}
