fn main() {
    std::process::exit(etcfile::run(std::env::args_os()));
}
