//! Binary entrypoint for typin-cli (made by FontLab https://www.fontlab.com/)

fn main() {
    if let Err(err) = typin_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
